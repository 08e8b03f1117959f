//! Error types for reverse all-pass configuration.

use thiserror::Error;

/// Result type for spec parsing and validation.
pub type SpecResult<T> = Result<T, SpecError>;

/// Errors raised while parsing or validating an [`AllpassSpec`](crate::AllpassSpec).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// Sample rate of zero.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The rejected sample rate.
        rate: u32,
    },

    /// Pole frequency outside (0, sample_rate / 2].
    #[error("pole frequency {frequency} Hz is outside (0, {nyquist}] Hz")]
    FrequencyOutOfRange {
        /// The rejected pole frequency.
        frequency: f64,
        /// Half the sample rate.
        nyquist: f64,
    },

    /// Q that is not a positive finite number.
    #[error("pole Q must be positive and finite, got {q}")]
    InvalidQ {
        /// The rejected Q.
        q: f64,
    },

    /// SNR target outside the usable range.
    #[error("SNR target {snr_db} dB is outside [{min}, {max}] dB")]
    SnrOutOfRange {
        /// The rejected SNR.
        snr_db: f64,
        /// Smallest accepted SNR.
        min: f64,
        /// Largest accepted SNR.
        max: f64,
    },

    /// JSON could not be parsed into a spec.
    #[error("failed to parse spec JSON: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
}

impl SpecError {
    /// Returns the stable error code (e.g. "SPEC_001").
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::InvalidSampleRate { .. } => "SPEC_001",
            SpecError::FrequencyOutOfRange { .. } => "SPEC_002",
            SpecError::InvalidQ { .. } => "SPEC_003",
            SpecError::SnrOutOfRange { .. } => "SPEC_004",
            SpecError::Parse { .. } => "SPEC_005",
        }
    }
}

impl From<serde_json::Error> for SpecError {
    fn from(err: serde_json::Error) -> Self {
        SpecError::Parse {
            message: err.to_string(),
        }
    }
}
