//! Spec validation.
//!
//! Validation only covers what can be checked from the parameters alone.
//! Pole stability and stage-count limits depend on the digital design and
//! are enforced when the filter is built.

use crate::error::{SpecError, SpecResult};
use crate::spec::{AllpassKind, AllpassSpec};

/// Lowest accepted truncation SNR in dB.
pub const MIN_SNR_DB: f64 = 10.0;

/// Highest accepted truncation SNR in dB. Beyond this the truncation floor
/// sits under double-precision resolution.
pub const MAX_SNR_DB: f64 = 300.0;

/// Validates a spec.
///
/// # Example
/// ```
/// use riir_spec::{validate, AllpassSpec};
///
/// assert!(validate(&AllpassSpec::first_order(48000, 100.0, 80.0)).is_ok());
/// assert!(validate(&AllpassSpec::first_order(48000, 0.0, 80.0)).is_err());
/// ```
pub fn validate(spec: &AllpassSpec) -> SpecResult<()> {
    if spec.sample_rate == 0 {
        return Err(SpecError::InvalidSampleRate {
            rate: spec.sample_rate,
        });
    }

    validate_pole_frequency(spec.allpass.pole_frequency(), spec.nyquist())?;

    if let AllpassKind::Second { q, .. } = spec.allpass {
        validate_q(q)?;
    }

    validate_snr(spec.snr_db)
}

/// Validates a pole frequency against the Nyquist limit: `0 < fp <= nyquist`.
pub fn validate_pole_frequency(frequency: f64, nyquist: f64) -> SpecResult<()> {
    if !frequency.is_finite() || frequency <= 0.0 || frequency > nyquist {
        return Err(SpecError::FrequencyOutOfRange { frequency, nyquist });
    }
    Ok(())
}

/// Validates a pole Q.
pub fn validate_q(q: f64) -> SpecResult<()> {
    if !q.is_finite() || q <= 0.0 {
        return Err(SpecError::InvalidQ { q });
    }
    Ok(())
}

/// Validates a truncation SNR target.
pub fn validate_snr(snr_db: f64) -> SpecResult<()> {
    if !snr_db.is_finite() || !(MIN_SNR_DB..=MAX_SNR_DB).contains(&snr_db) {
        return Err(SpecError::SnrOutOfRange {
            snr_db,
            min: MIN_SNR_DB,
            max: MAX_SNR_DB,
        });
    }
    Ok(())
}
