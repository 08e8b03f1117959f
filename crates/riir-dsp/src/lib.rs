//! Reverse IIR All-Pass DSP
//!
//! Streaming, time-reversed ("anti-causal") first and second order all-pass
//! filters with a bounded, reported latency.
//!
//! # Overview
//!
//! The reversed impulse response of a pole `p` is an infinite series in
//! `z^+1`. It is truncated where its tail drops below the requested SNR and
//! realized as a ladder of `N + 1` doubling stages, stage `j` holding a delay
//! of `2^j` samples and the multiplier `p^(2^j)`. A second-order filter uses
//! two real ladders in series or one complex ladder for a conjugate pair; the
//! numerator is then applied as a short FIR on the ladder output.
//!
//! Output is muted for `2^N` samples after activation (summed over ladders),
//! which is the latency reported to the host.
//!
//! # Example
//!
//! ```
//! use riir_dsp::AllpassInstance;
//! use riir_spec::AllpassSpec;
//!
//! let mut instance = AllpassInstance::new();
//! let latency = instance
//!     .configure(&AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0))
//!     .unwrap();
//! assert_eq!(latency.startup_samples, 128);
//!
//! let input = vec![0.5f32; 256];
//! let mut output = vec![0.0f32; 256];
//! instance.process_block(&input, &mut output).unwrap();
//! assert!(output[..128].iter().all(|&s| s == 0.0));
//! ```
//!
//! # Crate Structure
//!
//! - [`design`] - Bilinear all-pass coefficient design
//! - [`pole`] - Pole classification
//! - [`ladder`] - Doubling-stage ladders
//! - [`gate`] - Startup muting
//! - [`reverse`] - The reverse all-pass processor
//! - [`instance`] - Host lifecycle wrapper
//! - [`filter`] - Forward biquad and direct-form reverse reference
//! - [`analysis`] - Reference error, flatness and symmetry measurements
//! - [`rng`] - Deterministic test signals

pub mod analysis;
pub mod design;
pub mod error;
pub mod filter;
pub mod gate;
pub mod instance;
pub mod ladder;
pub mod pole;
pub mod reverse;
pub mod rng;

// Re-export main types at crate root
pub use design::{AllpassDesign, DigitalCoefficients};
pub use error::{ConfigError, ConfigResult, DspError, DspResult};
pub use instance::AllpassInstance;
pub use ladder::{stage_count, MAX_STAGES, MIN_STAGES};
pub use pole::{Pole, PolePlacement};
pub use reverse::{PoleNetwork, ReverseAllpass};
