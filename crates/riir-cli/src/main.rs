//! riir CLI - design, run and verify reverse all-pass filters
//!
//! This binary wraps the `riir-dsp` processor for offline use: inspecting a
//! design, filtering WAV files, and checking a configuration against the
//! direct-form reference.

use clap::Parser;
use std::process::ExitCode;

use riir_cli::commands;
use riir_cli::commands::verify::VerifySettings;

mod cli_args;
use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    riir_cli::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Design { spec, json } => commands::design::run(&spec.into(), json),
        Commands::Process {
            input,
            output,
            spec,
            block_size,
            json,
        } => commands::process::run(&input, &output, &spec.into(), block_size, json),
        Commands::Verify {
            spec,
            samples,
            seed,
            tolerance,
            fft_len,
            json,
        } => {
            let settings = VerifySettings {
                samples,
                seed,
                tolerance,
                fft_len,
            };
            commands::verify::run(&spec.into(), &settings, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
