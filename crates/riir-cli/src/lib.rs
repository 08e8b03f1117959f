//! Reverse all-pass CLI library.
//!
//! Spec input, WAV I/O, logging setup and the `design`, `process` and
//! `verify` commands behind the `riir` binary.

pub mod commands;
pub mod input;
pub mod logging;
pub mod wav;
