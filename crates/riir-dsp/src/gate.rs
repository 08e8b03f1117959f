//! Startup gate.
//!
//! Until the ladders have been filled the processor emits a truncated,
//! partial response. The gate mutes exactly that many samples after
//! activation. It only touches output; the processor keeps running.

/// Mutes the first `startup_samples` output samples after arming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupGate {
    startup_samples: u64,
    remaining: u64,
}

impl StartupGate {
    /// Creates an armed gate.
    pub fn new(startup_samples: u64) -> Self {
        Self {
            startup_samples,
            remaining: startup_samples,
        }
    }

    /// Re-arms the gate for a fresh startup period.
    pub fn arm(&mut self) {
        self.remaining = self.startup_samples;
    }

    pub fn startup_samples(&self) -> u64 {
        self.startup_samples
    }

    /// Samples still to be muted.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_open(&self) -> bool {
        self.remaining == 0
    }

    /// Gates a single sample.
    #[inline]
    pub fn apply(&mut self, sample: f64) -> f64 {
        if self.remaining > 0 {
            self.remaining -= 1;
            0.0
        } else {
            sample
        }
    }

    /// Gates the front of a block in place.
    pub fn apply_block<T: Copy + Default>(&mut self, block: &mut [T]) {
        let muted = (self.remaining.min(block.len() as u64)) as usize;
        block[..muted].fill(T::default());
        self.remaining -= muted as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_mutes_exact_count_across_blocks() {
        let mut gate = StartupGate::new(5);
        let mut a = [1.0f32; 3];
        let mut b = [1.0f32; 4];
        gate.apply_block(&mut a);
        assert_eq!(gate.remaining(), 2);
        gate.apply_block(&mut b);
        assert_eq!(a, [0.0; 3]);
        assert_eq!(b, [0.0, 0.0, 1.0, 1.0]);
        assert!(gate.is_open());
    }

    #[test]
    fn test_gate_per_sample() {
        let mut gate = StartupGate::new(2);
        let out: Vec<f64> = (0..4).map(|_| gate.apply(0.5)).collect();
        assert_eq!(out, vec![0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_rearm() {
        let mut gate = StartupGate::new(3);
        gate.apply_block(&mut [1.0f64; 8]);
        assert!(gate.is_open());
        gate.arm();
        assert_eq!(gate.remaining(), 3);
    }

    #[test]
    fn test_zero_length_gate_is_open() {
        let mut gate = StartupGate::new(0);
        assert!(gate.is_open());
        assert_eq!(gate.apply(0.25), 0.25);
    }
}
