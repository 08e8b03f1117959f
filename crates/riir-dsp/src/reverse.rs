//! Reverse all-pass processor.
//!
//! Applying `H(z) = B(z) / A(z)` backwards in time means applying
//! `B(1/z) / A(1/z)`. The denominator part is realized by one or two
//! doubling ladders (see [`crate::ladder`]); the numerator part then becomes
//! a short FIR over the ladder output once it is delayed by the filter order:
//!
//! ```text
//! 1st order:  y[n] = b0·w[n-1] + b1·w[n]
//! 2nd order:  y[n] = b0·w[n-2] + b1·w[n-1] + b2·w[n]
//! ```
//!
//! After the startup period the output equals the non-causal reverse
//! response delayed by [`ReverseAllpass::alignment_samples`], up to the
//! truncation chosen by the SNR target.

use riir_spec::{AllpassSpec, LadderReport, LatencyReport};

use crate::design::{AllpassDesign, DigitalCoefficients};
use crate::error::ConfigResult;
use crate::gate::StartupGate;
use crate::ladder::{ComplexLadder, RealLadder};
use crate::pole::PolePlacement;

/// Ladders realizing the denominator, in processing order.
#[derive(Debug, Clone)]
pub enum PoleNetwork {
    /// One real pole.
    Single(RealLadder),
    /// Two real poles, applied in series on the same sample.
    Series(RealLadder, RealLadder),
    /// One complex-conjugate pair.
    Resonant(ComplexLadder),
}

impl PoleNetwork {
    /// Builds one ladder per real pole, or one for a conjugate pair.
    pub fn build(placement: &PolePlacement, snr_db: f64) -> ConfigResult<Self> {
        Ok(match *placement {
            PolePlacement::Single(p) => PoleNetwork::Single(RealLadder::build(p, snr_db)?),
            PolePlacement::RealPair(p1, p2) => PoleNetwork::Series(
                RealLadder::build(p1, snr_db)?,
                RealLadder::build(p2, snr_db)?,
            ),
            PolePlacement::ComplexPair(c) => PoleNetwork::Resonant(ComplexLadder::build(c, snr_db)?),
        })
    }

    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        match self {
            PoleNetwork::Single(ladder) => ladder.process(x),
            PoleNetwork::Series(first, second) => second.process(first.process(x)),
            PoleNetwork::Resonant(ladder) => ladder.process(x),
        }
    }

    pub fn reset(&mut self) {
        match self {
            PoleNetwork::Single(ladder) => ladder.reset(),
            PoleNetwork::Series(first, second) => {
                first.reset();
                second.reset();
            }
            PoleNetwork::Resonant(ladder) => ladder.reset(),
        }
    }

    /// Sum of `2^N` over all ladders.
    pub fn startup_samples(&self) -> u64 {
        match self {
            PoleNetwork::Single(ladder) => ladder.startup_samples(),
            PoleNetwork::Series(first, second) => {
                first.startup_samples() + second.startup_samples()
            }
            PoleNetwork::Resonant(ladder) => ladder.startup_samples(),
        }
    }

    /// Sum of ladder delays.
    pub fn delay(&self) -> u64 {
        match self {
            PoleNetwork::Single(ladder) => ladder.delay(),
            PoleNetwork::Series(first, second) => first.delay() + second.delay(),
            PoleNetwork::Resonant(ladder) => ladder.delay(),
        }
    }

    pub fn ladder_reports(&self) -> Vec<LadderReport> {
        match self {
            PoleNetwork::Single(ladder) => vec![ladder.report()],
            PoleNetwork::Series(first, second) => vec![first.report(), second.report()],
            PoleNetwork::Resonant(ladder) => vec![ladder.report()],
        }
    }
}

/// Time-reversed numerator applied to the ladder output.
#[derive(Debug, Clone, Copy)]
struct ReverseNumerator {
    coeffs: DigitalCoefficients,
    order: usize,
    // Ladder output one and two samples back.
    h1: f64,
    h2: f64,
}

impl ReverseNumerator {
    fn new(design: &AllpassDesign) -> Self {
        Self {
            coeffs: design.coeffs,
            order: design.order(),
            h1: 0.0,
            h2: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, w: f64) -> f64 {
        let c = &self.coeffs;
        let y = if self.order == 1 {
            c.b0 * self.h1 + c.b1 * w
        } else {
            c.b0 * self.h2 + c.b1 * self.h1 + c.b2 * w
        };
        self.h2 = self.h1;
        self.h1 = w;
        y
    }

    fn reset(&mut self) {
        self.h1 = 0.0;
        self.h2 = 0.0;
    }
}

/// A configured reverse all-pass filter.
///
/// Owns its ladders, numerator history and startup gate outright; nothing
/// is shared between filters. Configuration happens in [`ReverseAllpass::new`]
/// and there is no way to process with an unconfigured filter.
///
/// # Example
/// ```
/// use riir_dsp::ReverseAllpass;
/// use riir_spec::AllpassSpec;
///
/// let mut filter = ReverseAllpass::new(&AllpassSpec::first_order(48000, 100.0, 80.0)).unwrap();
/// let latency = filter.latency_report();
/// assert_eq!(latency.startup_samples, 512);
///
/// let mut block = vec![0.0f64; 1024];
/// block[0] = 1.0;
/// filter.process_buffer(&mut block);
/// assert!(block[..512].iter().all(|&s| s == 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ReverseAllpass {
    spec: AllpassSpec,
    design: AllpassDesign,
    placement: PolePlacement,
    network: PoleNetwork,
    numerator: ReverseNumerator,
    gate: StartupGate,
}

impl ReverseAllpass {
    /// Designs the filter, classifies its poles and allocates the ladders.
    pub fn new(spec: &AllpassSpec) -> ConfigResult<Self> {
        let design = AllpassDesign::new(spec)?;
        let placement = PolePlacement::classify(&design)?;
        let network = PoleNetwork::build(&placement, spec.snr_db)?;
        let numerator = ReverseNumerator::new(&design);
        let gate = StartupGate::new(network.startup_samples());

        let filter = Self {
            spec: *spec,
            design,
            placement,
            network,
            numerator,
            gate,
        };

        let report = filter.latency_report();
        tracing::debug!(
            order = design.order(),
            pole_frequency = spec.allpass.pole_frequency(),
            q = spec.allpass.q(),
            snr_db = spec.snr_db,
            topology = %report.topology,
            stages = ?report.ladders.iter().map(|l| l.stages).collect::<Vec<_>>(),
            startup_samples = report.startup_samples,
            latency_ms = report.milliseconds(),
            "configured reverse all-pass"
        );

        Ok(filter)
    }

    pub fn spec(&self) -> &AllpassSpec {
        &self.spec
    }

    pub fn design(&self) -> &AllpassDesign {
        &self.design
    }

    pub fn placement(&self) -> &PolePlacement {
        &self.placement
    }

    pub fn network(&self) -> &PoleNetwork {
        &self.network
    }

    /// Samples muted after activation (the reported latency).
    pub fn startup_samples(&self) -> u64 {
        self.network.startup_samples()
    }

    /// Delay between the ideal non-causal output and this filter's output.
    pub fn alignment_samples(&self) -> u64 {
        self.network.delay() + self.design.order() as u64
    }

    /// Samples still muted by the startup gate.
    pub fn startup_remaining(&self) -> u64 {
        self.gate.remaining()
    }

    pub fn latency_report(&self) -> LatencyReport {
        LatencyReport {
            sample_rate: self.spec.sample_rate,
            topology: self.placement.topology(),
            ladders: self.network.ladder_reports(),
            startup_samples: self.startup_samples(),
            alignment_samples: self.alignment_samples(),
        }
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let w = self.network.process(x);
        let y = self.numerator.process(w);
        self.gate.apply(y)
    }

    /// Processes a buffer in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Processes a buffer, returning a new buffer.
    pub fn process_buffer_copy(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&s| self.process(s)).collect()
    }

    /// Processes host-precision samples. Only `min(input.len(), output.len())`
    /// samples are processed.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.process(x as f64) as f32;
        }
    }

    /// Clears ladders and numerator history and re-arms the startup gate.
    pub fn reset(&mut self) {
        self.network.reset();
        self.numerator.reset();
        self.gate.arm();
    }
}
