//! Process command implementation
//!
//! Runs a WAV file through one reverse all-pass instance per channel.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use riir_dsp::AllpassInstance;
use riir_spec::LatencyReport;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, ProcessOutput, ProcessResult};
use crate::input::SpecOptions;
use crate::wav::{pcm_hash, read_wav, write_float_wav, ChannelAudio};

/// Host block size used when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Run the process command
///
/// # Arguments
/// * `input` - WAV file to read
/// * `output` - WAV file to write (32-bit float)
/// * `options` - Filter parameters; the sample rate defaults to the file's
/// * `block_size` - Samples handed to each instance per call
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(
    input: &str,
    output: &str,
    options: &SpecOptions,
    block_size: usize,
    json_output: bool,
) -> Result<ExitCode> {
    let outcome = process_file(Path::new(input), Path::new(output), options, block_size);

    if json_output {
        let report = match outcome {
            Ok(result) => ProcessOutput::success(result),
            Err(e) => ProcessOutput::failure(vec![error_to_json(&e).with_file(input)]),
        };
        print_json(&report)?;
        return Ok(if report.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let result = outcome?;
    println!("{} {} -> {}", "Processed:".cyan().bold(), result.input, result.output);
    println!(
        "{} {} ch × {} frames @ {} Hz",
        "Audio:".dimmed(),
        result.channels,
        result.frames,
        result.sample_rate
    );
    println!(
        "{} {} samples ({:.3} ms)",
        "Latency:".dimmed(),
        result.latency.startup_samples,
        result.latency.milliseconds()
    );
    println!("{} {}", "PCM hash:".dimmed(), result.pcm_hash);
    Ok(ExitCode::SUCCESS)
}

/// Reads, filters and writes one file.
pub fn process_file(
    input: &Path,
    output: &Path,
    options: &SpecOptions,
    block_size: usize,
) -> Result<ProcessResult> {
    let audio = read_wav(input)?;
    let spec = options.resolve(audio.sample_rate)?;
    if spec.sample_rate != audio.sample_rate {
        bail!(
            "{}: spec sample rate {} Hz does not match {} ({} Hz)",
            error_codes::SAMPLE_RATE_MISMATCH,
            spec.sample_rate,
            input.display(),
            audio.sample_rate
        );
    }

    let (processed, latency) = process_channels(&audio, options, block_size)?;
    write_float_wav(output, &processed)?;

    Ok(ProcessResult {
        input: input.display().to_string(),
        output: output.display().to_string(),
        sample_rate: processed.sample_rate,
        channels: processed.channels.len(),
        frames: processed.frames(),
        latency,
        pcm_hash: pcm_hash(&processed),
    })
}

/// Filters every channel with its own instance, `block_size` samples at a
/// time.
pub fn process_channels(
    audio: &ChannelAudio,
    options: &SpecOptions,
    block_size: usize,
) -> Result<(ChannelAudio, LatencyReport)> {
    let spec = options.resolve(audio.sample_rate)?;
    let block_size = block_size.max(1);

    let mut latency = None;
    let mut channels = Vec::with_capacity(audio.channels.len());
    for (index, samples) in audio.channels.iter().enumerate() {
        let mut instance = AllpassInstance::new();
        let report = instance.configure(&spec)?;
        tracing::debug!(channel = index, startup_samples = report.startup_samples, "channel configured");

        let mut out = vec![0.0f32; samples.len()];
        for (block_in, block_out) in samples.chunks(block_size).zip(out.chunks_mut(block_size)) {
            instance
                .process_block(block_in, block_out)
                .with_context(|| format!("channel {} failed", index))?;
        }
        instance.release();

        latency = Some(report);
        channels.push(out);
    }

    let latency = match latency {
        Some(report) => report,
        // No channels: still report what the spec would cost.
        None => AllpassInstance::new().configure(&spec)?,
    };

    Ok((
        ChannelAudio {
            sample_rate: audio.sample_rate,
            channels,
        },
        latency,
    ))
}

fn error_to_json(err: &anyhow::Error) -> JsonError {
    if let Some(e) = err.downcast_ref::<crate::input::InputError>() {
        return JsonError::from(e);
    }
    if let Some(e) = err.downcast_ref::<riir_dsp::ConfigError>() {
        return JsonError::from(e);
    }
    if let Some(e) = err.downcast_ref::<riir_dsp::DspError>() {
        return JsonError::new(e.code(), e.to_string());
    }
    let message = format!("{:#}", err);
    let code = if message.starts_with(error_codes::SAMPLE_RATE_MISMATCH) {
        error_codes::SAMPLE_RATE_MISMATCH
    } else {
        error_codes::WAV_IO
    };
    JsonError::new(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stereo_noise(frames: usize) -> ChannelAudio {
        let left = riir_dsp::rng::white_noise(1, frames);
        let right = riir_dsp::rng::white_noise(2, frames);
        ChannelAudio {
            sample_rate: 48000,
            channels: vec![
                left.iter().map(|&x| x as f32 * 0.5).collect(),
                right.iter().map(|&x| x as f32 * 0.5).collect(),
            ],
        }
    }

    fn options() -> SpecOptions {
        SpecOptions {
            fp: Some(1000.0),
            q: Some(0.7071),
            ..Default::default()
        }
    }

    #[test]
    fn test_channels_are_independent() {
        let audio = stereo_noise(2000);
        let (both, _) = process_channels(&audio, &options(), 256).unwrap();

        let left_only = ChannelAudio {
            sample_rate: 48000,
            channels: vec![audio.channels[0].clone()],
        };
        let (left, _) = process_channels(&left_only, &options(), 256).unwrap();
        assert_eq!(both.channels[0], left.channels[0]);
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let audio = stereo_noise(3000);
        let (a, latency) = process_channels(&audio, &options(), 64).unwrap();
        let (b, _) = process_channels(&audio, &options(), 1000).unwrap();
        assert_eq!(a, b);
        assert!(a.channels[0][..latency.startup_samples as usize]
            .iter()
            .all(|&s| s == 0.0));
    }

    #[test]
    fn test_sample_rate_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        write_float_wav(&input, &stereo_noise(100)).unwrap();

        let mut opts = options();
        opts.sample_rate = Some(44100);
        let err = process_file(&input, &dir.path().join("out.wav"), &opts, 128).unwrap_err();
        assert!(err.to_string().starts_with(error_codes::SAMPLE_RATE_MISMATCH));
        assert_eq!(error_to_json(&err).code, error_codes::SAMPLE_RATE_MISMATCH);
    }

    #[test]
    fn test_config_error_code_survives_anyhow() {
        let audio = stereo_noise(10);
        let opts = SpecOptions {
            fp: Some(30000.0),
            ..Default::default()
        };
        let err = process_channels(&audio, &opts, 16).unwrap_err();
        assert_eq!(error_to_json(&err).code, "SPEC_002");
    }
}
