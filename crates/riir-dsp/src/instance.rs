//! Host-facing filter instance.
//!
//! Mirrors the life of one plugin instance: created empty, configured (and
//! possibly reconfigured) with a spec, fed blocks of samples, released.
//! A failed configuration leaves the instance empty so stale ladders are
//! never run with new parameters.
//!
//! Every method takes `&mut self`, so configuration and processing of one
//! instance are serialized by the borrow checker. A host that shares an
//! instance across threads wraps it in a `Mutex`.

use riir_spec::{AllpassSpec, LatencyReport};

use crate::error::{ConfigResult, DspError, DspResult};
use crate::reverse::ReverseAllpass;

#[derive(Debug, Clone, Default)]
pub struct AllpassInstance {
    filter: Option<ReverseAllpass>,
}

impl AllpassInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures (or reconfigures) the instance and returns its latency.
    pub fn configure(&mut self, spec: &AllpassSpec) -> ConfigResult<LatencyReport> {
        // Drop the old ladders before allocating new ones.
        self.filter = None;
        match ReverseAllpass::new(spec) {
            Ok(filter) => {
                let report = filter.latency_report();
                self.filter = Some(filter);
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(code = err.code(), error = %err, "rejected reverse all-pass configuration");
                Err(err)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.filter.is_some()
    }

    /// Latency of the current configuration.
    pub fn latency(&self) -> Option<LatencyReport> {
        self.filter.as_ref().map(ReverseAllpass::latency_report)
    }

    pub fn filter(&self) -> Option<&ReverseAllpass> {
        self.filter.as_ref()
    }

    /// Processes one block. `output` must be as long as `input`.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> DspResult<()> {
        if input.len() != output.len() {
            return Err(DspError::BlockLengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        let filter = self.filter.as_mut().ok_or(DspError::NotConfigured)?;
        filter.process_block(input, output);
        Ok(())
    }

    /// Clears filter state and restarts the startup period, keeping the
    /// configuration.
    pub fn reset(&mut self) -> DspResult<()> {
        let filter = self.filter.as_mut().ok_or(DspError::NotConfigured)?;
        filter.reset();
        Ok(())
    }

    /// Frees the ladders. The instance must be configured again before use.
    pub fn release(&mut self) {
        self.filter = None;
    }
}
