//! Latency reports returned by filter configuration.

use serde::{Deserialize, Serialize};

/// How the denominator poles of the design are realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoleTopology {
    /// One real pole (first order).
    SingleReal,
    /// Two real poles realized by two ladders in series (second order, Q <= 0.5).
    RealPair,
    /// One complex-conjugate pair realized by a single ladder (second order, Q > 0.5).
    ComplexPair,
}

impl std::fmt::Display for PoleTopology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoleTopology::SingleReal => write!(f, "single real pole"),
            PoleTopology::RealPair => write!(f, "two real poles"),
            PoleTopology::ComplexPair => write!(f, "complex-conjugate pair"),
        }
    }
}

/// Per-ladder summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderReport {
    /// Highest stage index N; the ladder holds stages 0..=N.
    pub stages: u32,
    /// Startup samples contributed by this ladder (2^N).
    pub startup_samples: u64,
    /// Magnitude of the pole the ladder realizes.
    pub pole_magnitude: f64,
}

/// Latency of a configured reverse all-pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    /// Stream sample rate in Hz.
    pub sample_rate: u32,
    /// Pole realization.
    pub topology: PoleTopology,
    /// Ladders in processing order.
    pub ladders: Vec<LadderReport>,
    /// Samples muted after activation; the reported latency.
    pub startup_samples: u64,
    /// Exact delay between the ideal non-causal response and the realized output.
    pub alignment_samples: u64,
}

impl LatencyReport {
    /// Reported latency in seconds.
    pub fn seconds(&self) -> f64 {
        self.startup_samples as f64 / self.sample_rate as f64
    }

    /// Reported latency in milliseconds.
    pub fn milliseconds(&self) -> f64 {
        1000.0 * self.seconds()
    }

    /// Alignment delay in seconds.
    pub fn alignment_seconds(&self) -> f64 {
        self.alignment_samples as f64 / self.sample_rate as f64
    }
}
