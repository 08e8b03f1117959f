//! Design command implementation
//!
//! Designs a reverse all-pass and prints its coefficients, poles and latency.

use anyhow::Result;
use colored::Colorize;
use riir_dsp::ReverseAllpass;
use std::process::ExitCode;

use super::json_output::{print_json, DesignOutput, DesignResult, JsonError};
use crate::input::{SpecOptions, DEFAULT_SAMPLE_RATE};

/// Run the design command
///
/// # Returns
/// Exit code: 0 if the spec is realizable, 1 otherwise
pub fn run(options: &SpecOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

fn run_human(options: &SpecOptions) -> Result<ExitCode> {
    let spec = options.resolve(DEFAULT_SAMPLE_RATE)?;
    let filter = ReverseAllpass::new(&spec)?;
    let result = DesignResult::from_filter(&filter);

    println!(
        "{} order {} @ {} Hz, fp {} Hz{}, SNR {} dB",
        "Design:".cyan().bold(),
        spec.allpass.order(),
        spec.sample_rate,
        spec.allpass.pole_frequency(),
        spec.allpass
            .q()
            .map(|q| format!(", Q {}", q))
            .unwrap_or_default(),
        spec.snr_db
    );

    let c = &result.coefficients;
    println!("{}", "Coefficients:".dimmed());
    println!("  b = [{:.12}, {:.12}, {:.12}]", c.b0, c.b1, c.b2);
    println!("  a = [1, {:.12}, {:.12}]", c.a1, c.a2);

    println!("{} {}", "Poles:".dimmed(), result.latency.topology);
    for pole in &result.poles {
        if pole.im == 0.0 {
            println!("  {:.12}  |p| = {:.12}", pole.re, pole.magnitude);
        } else {
            println!(
                "  {:.12} ± {:.12}j  |p| = {:.12}",
                pole.re, pole.im, pole.magnitude
            );
        }
    }

    println!("{}", "Ladders:".dimmed());
    for (i, ladder) in result.latency.ladders.iter().enumerate() {
        println!(
            "  [{}] N = {}, startup {} samples",
            i, ladder.stages, ladder.startup_samples
        );
    }

    println!(
        "{} {} samples ({:.3} ms), alignment {} samples",
        "Latency:".green().bold(),
        result.latency.startup_samples,
        result.latency.milliseconds(),
        result.latency.alignment_samples
    );

    Ok(ExitCode::SUCCESS)
}

fn run_json(options: &SpecOptions) -> Result<ExitCode> {
    let output = match options.resolve(DEFAULT_SAMPLE_RATE) {
        Err(e) => DesignOutput::failure(vec![JsonError::from(&e)]),
        Ok(spec) => match ReverseAllpass::new(&spec) {
            Ok(filter) => DesignOutput::success(DesignResult::from_filter(&filter)),
            Err(e) => DesignOutput::failure(vec![JsonError::from(&e)]),
        },
    };

    print_json(&output)?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_human_succeeds() {
        let options = SpecOptions {
            fp: Some(100.0),
            ..Default::default()
        };
        assert_eq!(run(&options, false).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_design_human_rejects_unstable() {
        let options = SpecOptions {
            fp: Some(24000.0),
            ..Default::default()
        };
        let err = run(&options, false).unwrap_err();
        assert!(err.to_string().contains("unit circle"));
    }

    #[test]
    fn test_design_json_failure_exit_code() {
        let options = SpecOptions {
            fp: Some(-5.0),
            ..Default::default()
        };
        assert_eq!(run(&options, true).unwrap(), ExitCode::from(1));
    }
}
