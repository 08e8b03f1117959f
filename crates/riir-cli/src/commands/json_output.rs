//! Serializable results for the `--json` mode of every command.
//!
//! Each `*Output` has `success` and `failure` builders and a `success` flag.

use riir_dsp::{ConfigError, DigitalCoefficients, Pole, ReverseAllpass};
use riir_spec::{AllpassSpec, LatencyReport};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI-level failures. Spec and design errors keep their
/// own codes (`SPEC_xxx`, `RIIR_xxx`).
pub mod error_codes {
    /// WAV file could not be read or written
    pub const WAV_IO: &str = "CLI_004";
    /// Requested sample rate differs from the input file
    pub const SAMPLE_RATE_MISMATCH: &str = "CLI_005";
    /// Output could not be serialized
    pub const JSON_SERIALIZE: &str = "CLI_006";
    /// Measurement failed for a reason other than the spec
    pub const ANALYSIS: &str = "CLI_007";
}

/// One error entry, carrying a stable code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "SPEC_002", "RIIR_001")
    pub code: String,
    /// Message for humans
    pub message: String,
    /// Spec or WAV file the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&InputError> for JsonError {
    fn from(err: &InputError) -> Self {
        let json = JsonError::new(err.code(), err.to_string());
        match err {
            InputError::FileRead { path, .. } | InputError::Parse { path, .. } => {
                json.with_file(path.clone())
            }
            InputError::MissingParameter { .. } => json,
        }
    }
}

impl From<&ConfigError> for JsonError {
    fn from(err: &ConfigError) -> Self {
        JsonError::new(err.code(), err.to_string())
    }
}

/// Designed coefficients, `a0` normalized to 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct JsonCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl From<&DigitalCoefficients> for JsonCoefficients {
    fn from(c: &DigitalCoefficients) -> Self {
        Self {
            b0: c.b0,
            b1: c.b1,
            b2: c.b2,
            a1: c.a1,
            a2: c.a2,
        }
    }
}

/// A z-plane pole.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct JsonPole {
    pub re: f64,
    pub im: f64,
    pub magnitude: f64,
}

impl From<&Pole> for JsonPole {
    fn from(pole: &Pole) -> Self {
        let (re, im) = match *pole {
            Pole::Real(p) => (p, 0.0),
            Pole::Complex(c) => (c.re, c.im),
        };
        Self {
            re,
            im,
            magnitude: pole.magnitude(),
        }
    }
}

/// Everything `design` knows about a configured filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignResult {
    pub spec: AllpassSpec,
    /// Pre-warped analog pole frequency in rad/s
    pub warped_frequency: f64,
    pub coefficients: JsonCoefficients,
    pub poles: Vec<JsonPole>,
    pub latency: LatencyReport,
}

impl DesignResult {
    pub fn from_filter(filter: &ReverseAllpass) -> Self {
        Self {
            spec: *filter.spec(),
            warped_frequency: filter.design().warped_frequency,
            coefficients: JsonCoefficients::from(&filter.design().coeffs),
            poles: filter.placement().poles().iter().map(JsonPole::from).collect(),
            latency: filter.latency_report(),
        }
    }
}

/// JSON output for the `design` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DesignResult>,
}

impl DesignOutput {
    pub fn success(result: DesignResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Result of a `process` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessResult {
    pub input: String,
    pub output: String,
    pub sample_rate: u32,
    pub channels: usize,
    pub frames: usize,
    pub latency: LatencyReport,
    /// BLAKE3 hash of the output PCM
    pub pcm_hash: String,
}

/// JSON output for the `process` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessResult>,
}

impl ProcessOutput {
    pub fn success(result: ProcessResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Measurements made by `verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyResult {
    pub spec: AllpassSpec,
    pub latency: LatencyReport,
    pub samples: usize,
    pub seed: u32,
    pub max_abs_error: f64,
    pub max_rel_error: f64,
    pub tolerance: f64,
    pub magnitude_deviation_db: f64,
    pub cascade_peak_index: usize,
    pub cascade_expected_centre: usize,
    pub cascade_asymmetry: f64,
    /// Relative error within tolerance
    pub passed: bool,
}

/// JSON output for the `verify` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<VerifyResult>,
}

impl VerifyOutput {
    pub fn success(result: VerifyResult) -> Self {
        Self {
            success: result.passed,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Prints any output type as pretty JSON.
pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(output).map_err(|e| {
        anyhow::anyhow!("{}: failed to serialize output: {}", error_codes::JSON_SERIALIZE, e)
    })?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failure_omits_result() {
        let output = DesignOutput::failure(vec![JsonError::new("SPEC_002", "bad frequency")]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["code"], "SPEC_002");
        assert!(json.get("result").is_none());
        assert!(json["errors"][0].get("file").is_none());
    }

    #[test]
    fn test_design_result_serializes_latency() {
        let filter =
            ReverseAllpass::new(&AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0)).unwrap();
        let output = DesignOutput::success(DesignResult::from_filter(&filter));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["result"]["latency"]["topology"], "complex_pair");
        assert_eq!(json["result"]["latency"]["startup_samples"], 128);
        // One entry per conjugate pair
        assert_eq!(json["result"]["poles"].as_array().unwrap().len(), 1);
        assert!(json["result"]["poles"][0]["im"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_input_error_keeps_file() {
        let err = InputError::FileRead {
            path: "a.json".into(),
            message: "not found".into(),
        };
        let json = JsonError::from(&err);
        assert_eq!(json.code, "CLI_001");
        assert_eq!(json.file.as_deref(), Some("a.json"));
    }

    #[test]
    fn test_verify_success_follows_pass() {
        let filter = ReverseAllpass::new(&AllpassSpec::first_order(48000, 100.0, 80.0)).unwrap();
        let result = VerifyResult {
            spec: *filter.spec(),
            latency: filter.latency_report(),
            samples: 10,
            seed: 1,
            max_abs_error: 1.0,
            max_rel_error: 1.0,
            tolerance: 1e-6,
            magnitude_deviation_db: 0.0,
            cascade_peak_index: 0,
            cascade_expected_centre: 0,
            cascade_asymmetry: 0.0,
            passed: false,
        };
        assert!(!VerifyOutput::success(result).success);
    }
}
