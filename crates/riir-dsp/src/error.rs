//! Error types for reverse all-pass construction and processing.

use riir_spec::SpecError;
use thiserror::Error;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for instance operations.
pub type DspResult<T> = Result<T, DspError>;

/// A configuration that cannot be realized.
///
/// All of these are raised while configuring, never while processing.
/// Nothing is retried: the caller configures again with corrected parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The spec failed parameter validation.
    #[error(transparent)]
    InvalidSpec(#[from] SpecError),

    /// A designed pole lies on or outside the unit circle, so its reversed
    /// response never decays and cannot be truncated.
    #[error("pole magnitude {magnitude} is not inside the unit circle")]
    UnstablePole {
        /// Magnitude of the offending pole.
        magnitude: f64,
    },

    /// The SNR target would need more doubling stages than allowed.
    #[error("{stages} stages required, maximum is {max}")]
    StageCountExceeded {
        /// Stage count the formula produced.
        stages: f64,
        /// Largest supported stage index.
        max: u32,
    },
}

impl ConfigError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::InvalidSpec(e) => e.code(),
            ConfigError::UnstablePole { .. } => "RIIR_001",
            ConfigError::StageCountExceeded { .. } => "RIIR_002",
        }
    }

    /// Returns the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            ConfigError::InvalidSpec(_) => "spec",
            ConfigError::UnstablePole { .. } | ConfigError::StageCountExceeded { .. } => "design",
        }
    }
}

/// Errors from the host-facing instance lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// Configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Processing was requested before a successful configuration.
    #[error("instance has no valid configuration")]
    NotConfigured,

    /// Input and output blocks differ in length.
    #[error("block length mismatch: input has {input} samples, output has {output}")]
    BlockLengthMismatch {
        /// Input block length.
        input: usize,
        /// Output block length.
        output: usize,
    },
}

impl DspError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            DspError::Config(e) => e.code(),
            DspError::NotConfigured => "RIIR_003",
            DspError::BlockLengthMismatch { .. } => "RIIR_004",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_passes_code_through() {
        let err = ConfigError::from(SpecError::InvalidQ { q: 0.0 });
        assert_eq!(err.code(), "SPEC_003");
        assert_eq!(err.category(), "spec");
        assert!(err.to_string().contains("Q"));
    }

    #[test]
    fn test_design_errors() {
        let err = ConfigError::UnstablePole { magnitude: 1.0 };
        assert_eq!(err.code(), "RIIR_001");
        assert_eq!(err.category(), "design");

        let err = DspError::from(ConfigError::StageCountExceeded {
            stages: 23.0,
            max: 20,
        });
        assert_eq!(err.code(), "RIIR_002");
        assert!(err.to_string().contains("maximum is 20"));
    }
}
