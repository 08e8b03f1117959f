//! Reverse All-Pass Integration Test Infrastructure
//!
//! Shared fixtures for the integration tests in `tests/`:
//!
//! - [`fixtures`]: temporary WAV files and spec files
//! - [`catalog`]: named specs covering every pole topology
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p riir-tests
//! cargo test -p riir-tests --test proptest_latency
//! ```

pub mod catalog;
pub mod fixtures;

pub use catalog::{spec_catalog, NamedSpec};
pub use fixtures::WavFixture;

/// BLAKE3 hash of arbitrary bytes as lowercase hex.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
