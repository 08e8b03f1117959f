//! Resolves an [`AllpassSpec`] from a JSON config file or command-line flags.

use riir_spec::{AllpassKind, AllpassSpec, SpecError};
use std::path::Path;
use thiserror::Error;

/// Sample rate used when neither flags nor an input file provide one.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// SNR floor used when `--snr` is not given.
pub const DEFAULT_SNR_DB: f64 = 80.0;

/// Spec parameters as collected from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecOptions {
    /// Path to a JSON spec; when set the other fields are ignored.
    pub config: Option<String>,
    pub sample_rate: Option<u32>,
    /// Pole frequency in Hz.
    pub fp: Option<f64>,
    /// Pole Q. Present means second order.
    pub q: Option<f64>,
    pub snr_db: Option<f64>,
}

/// Errors that can occur while building a spec from user input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("invalid spec in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: SpecError,
    },

    #[error("missing --{name} (or pass --config)")]
    MissingParameter { name: &'static str },
}

impl InputError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::FileRead { .. } => "CLI_001",
            InputError::Parse { .. } => "CLI_002",
            InputError::MissingParameter { .. } => "CLI_003",
        }
    }
}

/// Loads a spec from a JSON file.
pub fn load_spec(path: &Path) -> Result<AllpassSpec, InputError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: display.clone(),
        message: e.to_string(),
    })?;
    AllpassSpec::from_json(&content).map_err(|source| InputError::Parse {
        path: display,
        source,
    })
}

impl SpecOptions {
    /// Builds the spec. `fallback_rate` replaces a missing `--sample-rate`.
    ///
    /// The result is not validated; configuring a filter does that.
    pub fn resolve(&self, fallback_rate: u32) -> Result<AllpassSpec, InputError> {
        if let Some(path) = &self.config {
            return load_spec(Path::new(path));
        }

        let pole_frequency = self
            .fp
            .ok_or(InputError::MissingParameter { name: "fp" })?;
        let allpass = match self.q {
            Some(q) => AllpassKind::Second { pole_frequency, q },
            None => AllpassKind::First { pole_frequency },
        };

        Ok(AllpassSpec {
            sample_rate: self.sample_rate.unwrap_or(fallback_rate),
            snr_db: self.snr_db.unwrap_or(DEFAULT_SNR_DB),
            allpass,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_resolve_first_order_from_flags() {
        let options = SpecOptions {
            fp: Some(100.0),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(DEFAULT_SAMPLE_RATE).unwrap(),
            AllpassSpec::first_order(48000, 100.0, 80.0)
        );
    }

    #[test]
    fn test_resolve_second_order_from_flags() {
        let options = SpecOptions {
            sample_rate: Some(44100),
            fp: Some(1000.0),
            q: Some(0.7071),
            snr_db: Some(96.0),
            ..Default::default()
        };
        assert_eq!(
            options.resolve(DEFAULT_SAMPLE_RATE).unwrap(),
            AllpassSpec::second_order(44100, 1000.0, 0.7071, 96.0)
        );
    }

    #[test]
    fn test_missing_frequency() {
        let err = SpecOptions::default().resolve(48000).unwrap_err();
        assert_eq!(err.code(), "CLI_003");
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let spec = AllpassSpec::second_order(96000, 250.0, 2.0, 100.0);
        write!(file, "{}", spec.to_json_pretty().unwrap()).unwrap();

        let options = SpecOptions {
            config: Some(file.path().to_string_lossy().into_owned()),
            fp: Some(1.0),
            ..Default::default()
        };
        assert_eq!(options.resolve(48000).unwrap(), spec);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_spec(Path::new("/nonexistent/riir/spec.json")).unwrap_err();
        assert_eq!(err.code(), "CLI_001");
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"sample_rate\": 48000").unwrap();
        let err = load_spec(file.path()).unwrap_err();
        assert_eq!(err.code(), "CLI_002");
    }
}
