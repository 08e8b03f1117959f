//! Verify command implementation
//!
//! Checks a configured filter against the direct-form reverse reference,
//! then measures magnitude flatness and forward/reverse cascade symmetry.

use anyhow::Result;
use colored::Colorize;
use riir_dsp::{analysis, rng, ReverseAllpass};
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, VerifyOutput, VerifyResult};
use crate::input::{SpecOptions, DEFAULT_SAMPLE_RATE};

/// Verification settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifySettings {
    /// White-noise samples compared against the reference.
    pub samples: usize,
    pub seed: u32,
    /// Largest accepted relative reference error.
    pub tolerance: f64,
    /// Minimum FFT length for the flatness check.
    pub fft_len: usize,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            samples: 10000,
            seed: 42,
            tolerance: 1e-6,
            fft_len: 8192,
        }
    }
}

/// Run the verify command
///
/// # Returns
/// Exit code: 0 if the relative reference error is within tolerance, 1 otherwise
pub fn run(options: &SpecOptions, settings: &VerifySettings, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let output = match measure(options, settings) {
            Ok(result) => VerifyOutput::success(result),
            Err(e) => VerifyOutput::failure(vec![error_to_json(&e)]),
        };
        print_json(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let result = measure(options, settings)?;
    println!(
        "{} {} samples, seed {}",
        "Verifying:".cyan().bold(),
        result.samples,
        result.seed
    );
    println!(
        "{} {} samples ({:.3} ms), alignment {}",
        "Latency:".dimmed(),
        result.latency.startup_samples,
        result.latency.milliseconds(),
        result.latency.alignment_samples
    );
    println!(
        "{} abs {:.3e}, rel {:.3e} (tolerance {:.1e})",
        "Reference error:".dimmed(),
        result.max_abs_error,
        result.max_rel_error,
        result.tolerance
    );
    println!(
        "{} {:.6} dB",
        "Magnitude deviation:".dimmed(),
        result.magnitude_deviation_db
    );
    println!(
        "{} peak {} (expected {}), asymmetry {:.3e}",
        "Cascade:".dimmed(),
        result.cascade_peak_index,
        result.cascade_expected_centre,
        result.cascade_asymmetry
    );

    if result.passed {
        println!("{}", "PASS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "FAIL".red().bold());
        Ok(ExitCode::from(1))
    }
}

/// Runs all measurements.
pub fn measure(options: &SpecOptions, settings: &VerifySettings) -> Result<VerifyResult> {
    let spec = options.resolve(DEFAULT_SAMPLE_RATE)?;
    let filter = ReverseAllpass::new(&spec)?;

    let signal = rng::white_noise(settings.seed, settings.samples);
    let error = analysis::reference_error(&spec, &signal)?;
    let deviation = analysis::magnitude_deviation_db(&spec, settings.fft_len)?;
    let symmetry = analysis::cascade_symmetry(&spec, settings.fft_len)?;

    let passed = error.max_rel <= settings.tolerance;
    if !passed {
        tracing::warn!(
            max_rel = error.max_rel,
            tolerance = settings.tolerance,
            "reference error above tolerance"
        );
    }

    Ok(VerifyResult {
        spec,
        latency: filter.latency_report(),
        samples: settings.samples,
        seed: settings.seed,
        max_abs_error: error.max_abs,
        max_rel_error: error.max_rel,
        tolerance: settings.tolerance,
        magnitude_deviation_db: deviation,
        cascade_peak_index: symmetry.peak_index,
        cascade_expected_centre: symmetry.expected_centre,
        cascade_asymmetry: symmetry.asymmetry,
        passed,
    })
}

fn error_to_json(err: &anyhow::Error) -> JsonError {
    if let Some(e) = err.downcast_ref::<crate::input::InputError>() {
        JsonError::from(e)
    } else if let Some(e) = err.downcast_ref::<riir_dsp::ConfigError>() {
        JsonError::from(e)
    } else {
        JsonError::new(error_codes::ANALYSIS, format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(snr_db: f64) -> SpecOptions {
        SpecOptions {
            fp: Some(1000.0),
            q: Some(0.7071),
            snr_db: Some(snr_db),
            ..Default::default()
        }
    }

    #[test]
    fn test_high_snr_passes() {
        let result = measure(&options(150.0), &VerifySettings::default()).unwrap();
        assert!(result.passed, "{:?}", result);
        assert_eq!(result.cascade_peak_index, result.cascade_expected_centre);
    }

    #[test]
    fn test_low_snr_fails_tight_tolerance() {
        let settings = VerifySettings {
            tolerance: 1e-12,
            ..Default::default()
        };
        let code = run(&options(20.0), &settings, false).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn test_invalid_spec_json() {
        let opts = SpecOptions {
            fp: Some(1000.0),
            snr_db: Some(1.0),
            ..Default::default()
        };
        let code = run(&opts, &VerifySettings::default(), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
        let err = measure(&opts, &VerifySettings::default()).unwrap_err();
        assert_eq!(error_to_json(&err).code, "SPEC_004");
    }
}
