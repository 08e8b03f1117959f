//! Reverse all-pass configuration.

use serde::{Deserialize, Serialize};

use crate::error::SpecResult;

/// Analog all-pass prototype and its pole parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "order", rename_all = "snake_case")]
pub enum AllpassKind {
    /// First-order all-pass `(s - Wp) / (s + Wp)`.
    First {
        /// Pole frequency in Hz.
        pole_frequency: f64,
    },
    /// Second-order all-pass `(s² - (Wp/Q)s + Wp²) / (s² + (Wp/Q)s + Wp²)`.
    Second {
        /// Pole frequency in Hz.
        pole_frequency: f64,
        /// Pole quality factor.
        q: f64,
    },
}

impl AllpassKind {
    /// Returns the pole frequency in Hz.
    pub fn pole_frequency(&self) -> f64 {
        match *self {
            AllpassKind::First { pole_frequency } => pole_frequency,
            AllpassKind::Second { pole_frequency, .. } => pole_frequency,
        }
    }

    /// Returns the pole Q, or `None` for a first-order prototype.
    pub fn q(&self) -> Option<f64> {
        match *self {
            AllpassKind::First { .. } => None,
            AllpassKind::Second { q, .. } => Some(q),
        }
    }

    /// Returns the filter order (1 or 2).
    pub fn order(&self) -> usize {
        match self {
            AllpassKind::First { .. } => 1,
            AllpassKind::Second { .. } => 2,
        }
    }
}

/// A complete reverse all-pass configuration.
///
/// `snr_db` controls where the reversed impulse response is truncated:
/// higher values follow the tail further and cost more latency. 80 dB is a
/// conservative choice for crossover work.
///
/// # Example
/// ```
/// use riir_spec::AllpassSpec;
///
/// let spec = AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0);
/// assert_eq!(spec.allpass.order(), 2);
/// assert!(riir_spec::validate(&spec).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllpassSpec {
    /// Stream sample rate in Hz.
    pub sample_rate: u32,
    /// Truncation SNR floor in dB.
    pub snr_db: f64,
    /// All-pass prototype.
    pub allpass: AllpassKind,
}

impl AllpassSpec {
    /// Creates a first-order spec.
    pub fn first_order(sample_rate: u32, pole_frequency: f64, snr_db: f64) -> Self {
        Self {
            sample_rate,
            snr_db,
            allpass: AllpassKind::First { pole_frequency },
        }
    }

    /// Creates a second-order spec.
    pub fn second_order(sample_rate: u32, pole_frequency: f64, q: f64, snr_db: f64) -> Self {
        Self {
            sample_rate,
            snr_db,
            allpass: AllpassKind::Second { pole_frequency, q },
        }
    }

    /// Sample rate as a float.
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate as f64
    }

    /// Half the sample rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate_hz() * 0.5
    }

    /// Parses a spec from JSON. The result is not validated.
    pub fn from_json(json: &str) -> SpecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to compact JSON.
    pub fn to_json(&self) -> SpecResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the spec to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
