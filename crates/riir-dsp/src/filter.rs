//! Forward (causal) all-pass filters and the direct-form reverse reference.
//!
//! The forward filter is a transposed direct-form II section driven by the
//! same [`DigitalCoefficients`] the reverse filter is designed from. Running it
//! over a time-reversed signal and reversing the result gives the exact
//! non-causal response that [`crate::ReverseAllpass`] approximates in a
//! streaming fashion.

use riir_spec::AllpassSpec;

use crate::design::{AllpassDesign, DigitalCoefficients};
use crate::error::ConfigResult;

/// Causal all-pass section in transposed direct form II.
///
/// Also runs first-order designs, whose `b2` and `a2` are zero.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: DigitalCoefficients,
    s1: f64,
    s2: f64,
}

impl BiquadFilter {
    pub fn new(coeffs: DigitalCoefficients) -> Self {
        Self {
            coeffs,
            s1: 0.0,
            s2: 0.0,
        }
    }

    /// Forward all-pass for a spec.
    pub fn allpass(spec: &AllpassSpec) -> ConfigResult<Self> {
        Ok(Self::new(AllpassDesign::new(spec)?.coeffs))
    }

    pub fn coeffs(&self) -> &DigitalCoefficients {
        &self.coeffs
    }

    pub fn reset(&mut self) {
        self.s1 = 0.0;
        self.s2 = 0.0;
    }

    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let c = &self.coeffs;
        let y = c.b0 * x + self.s1;
        self.s1 = c.b1 * x - c.a1 * y + self.s2;
        self.s2 = c.b2 * x - c.a2 * y;
        y
    }

    /// Filters `buffer` in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        buffer.iter_mut().for_each(|x| *x = self.process(*x));
    }

    pub fn process_buffer_copy(&mut self, signal: &[f64]) -> Vec<f64> {
        signal.iter().map(|&x| self.process(x)).collect()
    }
}

/// Applies the filter backwards over a whole signal: reverse, filter, reverse.
///
/// The signal is taken to be zero beyond its end. This needs the entire
/// signal up front, which is exactly what the streaming reverse filter avoids.
pub fn reverse_filter_reference(coeffs: &DigitalCoefficients, signal: &[f64]) -> Vec<f64> {
    let mut filter = BiquadFilter::new(*coeffs);
    let mut out: Vec<f64> = signal.iter().rev().map(|&s| filter.process(s)).collect();
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allpass_preserves_energy() {
        let mut filter = BiquadFilter::allpass(&AllpassSpec::second_order(48000, 800.0, 2.0, 80.0))
            .unwrap();
        let mut impulse = vec![0.0; 20000];
        impulse[0] = 1.0;
        filter.process_buffer(&mut impulse);
        let energy: f64 = impulse.iter().map(|s| s * s).sum();
        assert!((energy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_order_impulse() {
        // h[0] = b0, h[1] = b1 - a1·b0
        let spec = AllpassSpec::first_order(48000, 100.0, 80.0);
        let mut filter = BiquadFilter::allpass(&spec).unwrap();
        let c = *filter.coeffs();
        let h0 = filter.process(1.0);
        let h1 = filter.process(0.0);
        assert_eq!(h0, c.b0);
        assert!((h1 - (c.b1 - c.a1 * c.b0)).abs() < 1e-15);
    }

    #[test]
    fn test_reverse_reference_is_mirrored_forward() {
        let spec = AllpassSpec::first_order(48000, 2000.0, 80.0);
        let coeffs = AllpassDesign::new(&spec).unwrap().coeffs;

        let mut impulse = vec![0.0; 64];
        impulse[63] = 1.0;
        let reversed = reverse_filter_reference(&coeffs, &impulse);

        let mut forward = BiquadFilter::new(coeffs);
        let mut fwd_impulse = vec![0.0; 64];
        fwd_impulse[0] = 1.0;
        forward.process_buffer(&mut fwd_impulse);

        for n in 0..64 {
            assert_eq!(reversed[63 - n], fwd_impulse[n]);
        }
    }

    #[test]
    fn test_reset() {
        let mut filter = BiquadFilter::allpass(&AllpassSpec::first_order(44100, 300.0, 80.0))
            .unwrap();
        filter.process(1.0);
        filter.reset();
        assert_eq!(filter.process(0.0), 0.0);
    }
}
