//! CLI argument definitions for the `riir` command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use riir_cli::input::SpecOptions;

/// riir - streaming reverse (anti-causal) IIR all-pass filters
#[derive(Parser)]
#[command(name = "riir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); logs go to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter parameters shared by every command.
#[derive(Args, Debug, Clone, PartialEq)]
pub(crate) struct SpecArgs {
    /// JSON spec file (replaces the parameter flags)
    #[arg(short, long, conflicts_with_all = ["sample_rate", "fp", "q", "snr"])]
    pub config: Option<String>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Pole frequency in Hz
    #[arg(long)]
    pub fp: Option<f64>,

    /// Pole Q; selects a second-order all-pass
    #[arg(long)]
    pub q: Option<f64>,

    /// SNR floor in dB at which the reversed response is truncated (default: 80)
    #[arg(long)]
    pub snr: Option<f64>,
}

impl From<SpecArgs> for SpecOptions {
    fn from(args: SpecArgs) -> Self {
        SpecOptions {
            config: args.config,
            sample_rate: args.sample_rate,
            fp: args.fp,
            q: args.q,
            snr_db: args.snr,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Design a filter and print coefficients, poles, stage counts and latency
    Design {
        #[command(flatten)]
        spec: SpecArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Filter a WAV file, one independent instance per channel
    Process {
        /// Input WAV file (integer or float)
        #[arg(short, long)]
        input: String,

        /// Output WAV file (32-bit float)
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        spec: SpecArgs,

        /// Samples per processing block
        #[arg(long, default_value_t = riir_cli::commands::process::DEFAULT_BLOCK_SIZE)]
        block_size: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compare against the direct-form reference and check flatness and symmetry
    Verify {
        #[command(flatten)]
        spec: SpecArgs,

        /// White-noise samples to compare
        #[arg(long, default_value_t = 10000)]
        samples: usize,

        /// Noise seed
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Largest accepted relative reference error
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,

        /// Minimum FFT length for the flatness check
        #[arg(long, default_value_t = 8192)]
        fft_len: usize,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
