//! Reverse All-Pass Spec Library
//!
//! Configuration types, validation, and latency reports for the reverse
//! (anti-causal) all-pass filters in `riir-dsp`.
//!
//! A spec names an analog all-pass prototype (first order, or second order
//! with a pole Q), the stream sample rate, and the SNR floor at which the
//! reversed impulse response is truncated.
//!
//! # Example
//!
//! ```
//! use riir_spec::{validate, AllpassSpec};
//!
//! let spec = AllpassSpec::from_json(
//!     r#"{"sample_rate":48000,"snr_db":80,"allpass":{"order":"first","pole_frequency":100}}"#,
//! )
//! .unwrap();
//! validate(&spec).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`error`]: Spec errors with stable codes
//! - [`report`]: Latency report returned on configuration
//! - [`spec`]: Spec types
//! - [`validation`]: Parameter validation

pub mod error;
pub mod report;
pub mod spec;
pub mod validation;

pub use error::{SpecError, SpecResult};
pub use report::{LadderReport, LatencyReport, PoleTopology};
pub use spec::{AllpassKind, AllpassSpec};
pub use validation::{validate, MAX_SNR_DB, MIN_SNR_DB};
