//! Command implementations for the `riir` CLI.

pub mod design;
pub mod json_output;
pub mod process;
pub mod verify;
