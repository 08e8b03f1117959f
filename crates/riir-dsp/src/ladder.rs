//! Doubling-stage ladders.
//!
//! The reversed response of a pole `p` is the anti-causal series
//! `v[n] = Σ p^k x[n + k]`. Truncated to `2^(N+1)` terms it factors as
//!
//! ```text
//! Σ_{k < 2^(N+1)} p^k z^k = Π_{j=0..=N} (1 + p^(2^j) z^(2^j))
//! ```
//!
//! and after a delay of `2^(N+1) - 1` samples every factor becomes causal:
//! `p^(2^j) + z^(-2^j)`. Stage `j` is that factor: one multiply by
//! `p^(2^j)` plus the stage input from exactly `2^j` samples ago, held in a
//! circular buffer of `2^j` values. A complex-conjugate pair runs the same
//! ladder on complex values and recovers the real pair response from the
//! real and imaginary parts at the end.

use num_complex::Complex64;
use riir_spec::validation::validate_snr;
use riir_spec::LadderReport;

use crate::error::{ConfigError, ConfigResult};

/// Smallest stage index N; a ladder always has stage 0.
pub const MIN_STAGES: u32 = 0;

/// Largest stage index N. Bounds a real ladder to `2^21 - 1` buffered values.
pub const MAX_STAGES: u32 = 20;

/// Stage index N needed for a pole of the given magnitude to decay below the
/// SNR floor.
///
/// `N = trunc(0.5 + log2(snr / (-20·log10|p|)))`, clamped below at
/// [`MIN_STAGES`]. Results above [`MAX_STAGES`] are an error. The ladder
/// spans `2^(N+1)` terms, so the discarded tail `|p|^(2^(N+1))` is always
/// under the floor.
pub fn stage_count(pole_magnitude: f64, snr_db: f64) -> ConfigResult<u32> {
    validate_snr(snr_db)?;
    if !(pole_magnitude < 1.0) {
        return Err(ConfigError::UnstablePole {
            magnitude: pole_magnitude,
        });
    }
    if pole_magnitude == 0.0 {
        return Ok(MIN_STAGES);
    }

    // Attenuation per sample in dB.
    let decay_db = -20.0 * pole_magnitude.log10();
    let stages = (0.5 + (snr_db / decay_db).log2()).trunc();

    if stages > MAX_STAGES as f64 {
        return Err(ConfigError::StageCountExceeded {
            stages,
            max: MAX_STAGES,
        });
    }
    Ok((stages.max(MIN_STAGES as f64)) as u32)
}

#[inline]
fn advance(index: usize, size: usize) -> usize {
    // size is a power of two
    (index + 1) & (size - 1)
}

/// One stage of a real-pole ladder.
#[derive(Debug, Clone)]
pub struct RealStage {
    multiplier: f64,
    history: Vec<f64>,
    index: usize,
}

impl RealStage {
    fn new(multiplier: f64, size: usize) -> Self {
        Self {
            multiplier,
            history: vec![0.0; size],
            index: 0,
        }
    }

    /// `p^(2^k)` for stage k.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Circular buffer length, `2^k` for stage k.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    fn process(&mut self, x: f64) -> f64 {
        let y = self.multiplier * x + self.history[self.index];
        self.history[self.index] = x;
        self.index = advance(self.index, self.history.len());
        y
    }

    fn reset(&mut self) {
        self.history.fill(0.0);
        self.index = 0;
    }
}

/// Ladder realizing the reversed response of one real pole.
#[derive(Debug, Clone)]
pub struct RealLadder {
    pole: f64,
    stages: Vec<RealStage>,
}

impl RealLadder {
    /// Builds stages `0..=N` with `N` from [`stage_count`].
    pub fn build(pole: f64, snr_db: f64) -> ConfigResult<Self> {
        let n = stage_count(pole.abs(), snr_db)?;
        Ok(Self::with_stages(pole, n))
    }

    /// Builds stages `0..=n` directly.
    pub fn with_stages(pole: f64, n: u32) -> Self {
        let mut stages = Vec::with_capacity(n as usize + 1);
        let mut multiplier = pole;
        for k in 0..=n {
            stages.push(RealStage::new(multiplier, 1 << k));
            multiplier *= multiplier;
        }
        tracing::trace!(pole, stages = n, "allocated real-pole ladder");
        Self { pole, stages }
    }

    pub fn pole(&self) -> f64 {
        self.pole
    }

    pub fn stages(&self) -> &[RealStage] {
        &self.stages
    }

    /// Highest stage index N.
    pub fn stage_count(&self) -> u32 {
        (self.stages.len() - 1) as u32
    }

    /// `2^N`.
    pub fn startup_samples(&self) -> u64 {
        1 << self.stage_count()
    }

    /// Delay the ladder adds to the reversed response, `2^(N+1) - 1`.
    pub fn delay(&self) -> u64 {
        (1 << (self.stage_count() + 1)) - 1
    }

    /// Runs one sample through stages 0..=N in order.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        self.stages.iter_mut().fold(x, |x, stage| stage.process(x))
    }

    pub fn reset(&mut self) {
        self.stages.iter_mut().for_each(RealStage::reset);
    }

    pub fn report(&self) -> LadderReport {
        LadderReport {
            stages: self.stage_count(),
            startup_samples: self.startup_samples(),
            pole_magnitude: self.pole.abs(),
        }
    }
}

/// One stage of a complex-pole ladder: real and imaginary pipelines sharing
/// one circular index.
#[derive(Debug, Clone)]
pub struct ComplexStage {
    re: f64,
    im: f64,
    history_re: Vec<f64>,
    history_im: Vec<f64>,
    index: usize,
}

impl ComplexStage {
    fn new(multiplier: Complex64, size: usize) -> Self {
        Self {
            re: multiplier.re,
            im: multiplier.im,
            history_re: vec![0.0; size],
            history_im: vec![0.0; size],
            index: 0,
        }
    }

    /// `c^(2^k)` for stage k.
    pub fn multiplier(&self) -> Complex64 {
        Complex64::new(self.re, self.im)
    }

    pub fn len(&self) -> usize {
        self.history_re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history_re.is_empty()
    }

    #[inline]
    fn process(&mut self, x: f64, y: f64) -> (f64, f64) {
        let u = self.re * x - self.im * y + self.history_re[self.index];
        let v = self.im * x + self.re * y + self.history_im[self.index];
        self.history_re[self.index] = x;
        self.history_im[self.index] = y;
        self.index = advance(self.index, self.history_re.len());
        (u, v)
    }

    fn reset(&mut self) {
        self.history_re.fill(0.0);
        self.history_im.fill(0.0);
        self.index = 0;
    }
}

/// Ladder realizing the reversed response of a complex-conjugate pole pair.
#[derive(Debug, Clone)]
pub struct ComplexLadder {
    pole: Complex64,
    a_over_b: f64,
    stages: Vec<ComplexStage>,
}

impl ComplexLadder {
    /// Builds stages `0..=N` for the upper pole `c = a + ib` of a pair.
    pub fn build(pole: Complex64, snr_db: f64) -> ConfigResult<Self> {
        let n = stage_count(pole.norm(), snr_db)?;
        Ok(Self::with_stages(pole, n))
    }

    /// Builds stages `0..=n` directly.
    pub fn with_stages(pole: Complex64, n: u32) -> Self {
        let mut stages = Vec::with_capacity(n as usize + 1);
        let mut multiplier = pole;
        for k in 0..=n {
            stages.push(ComplexStage::new(multiplier, 1 << k));
            multiplier = multiplier * multiplier;
        }
        tracing::trace!(
            re = pole.re,
            im = pole.im,
            stages = n,
            "allocated complex-pole ladder"
        );
        Self {
            pole,
            a_over_b: pole.re / pole.im,
            stages,
        }
    }

    pub fn pole(&self) -> Complex64 {
        self.pole
    }

    pub fn stages(&self) -> &[ComplexStage] {
        &self.stages
    }

    pub fn stage_count(&self) -> u32 {
        (self.stages.len() - 1) as u32
    }

    pub fn startup_samples(&self) -> u64 {
        1 << self.stage_count()
    }

    pub fn delay(&self) -> u64 {
        (1 << (self.stage_count() + 1)) - 1
    }

    /// Runs one real sample through the ladder.
    ///
    /// The ladder output `s = x + iy` is `Σ c^k u[k]`; the pair's response is
    /// `Im(c·s) / Im(c) = x + (a/b)·y`.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let (x, y) = self
            .stages
            .iter_mut()
            .fold((input, 0.0), |(x, y), stage| stage.process(x, y));
        x + self.a_over_b * y
    }

    pub fn reset(&mut self) {
        self.stages.iter_mut().for_each(ComplexStage::reset);
    }

    pub fn report(&self) -> LadderReport {
        LadderReport {
            stages: self.stage_count(),
            startup_samples: self.startup_samples(),
            pole_magnitude: self.pole.norm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_count_formula() {
        // 20·log10(0.5) ≈ -6.0206 dB/sample; 80 / 6.0206 = 13.29; log2 = 3.73
        assert_eq!(stage_count(0.5, 80.0).unwrap(), 4);
        // 80 / 0.9151 = 87.4; log2 = 6.45 -> 6.95 -> 6
        assert_eq!(stage_count(0.9, 80.0).unwrap(), 6);
    }

    #[test]
    fn test_stage_count_clamps() {
        assert_eq!(stage_count(0.0, 80.0).unwrap(), MIN_STAGES);
        assert_eq!(stage_count(1e-12, 10.0).unwrap(), MIN_STAGES);
        assert!(matches!(
            stage_count(0.999_999_9, 150.0),
            Err(ConfigError::StageCountExceeded { max: MAX_STAGES, .. })
        ));
        assert!(matches!(
            stage_count(1.0, 80.0),
            Err(ConfigError::UnstablePole { .. })
        ));
        assert!(stage_count(0.5, 0.0).is_err());
    }

    #[test]
    fn test_truncated_tail_is_below_floor() {
        for &(p, snr) in &[(0.3, 40.0), (0.9, 80.0), (0.987, 80.0), (0.999, 120.0)] {
            let n = stage_count(p, snr).unwrap();
            let tail_db = 20.0 * p.log10() * (1u64 << (n + 1)) as f64;
            assert!(tail_db < -snr, "p={} snr={} n={} tail={}", p, snr, n, tail_db);
        }
    }

    #[test]
    fn test_real_ladder_layout() {
        let ladder = RealLadder::with_stages(0.5, 3);
        let sizes: Vec<_> = ladder.stages().iter().map(RealStage::len).collect();
        assert_eq!(sizes, vec![1, 2, 4, 8]);
        let mults: Vec<_> = ladder.stages().iter().map(RealStage::multiplier).collect();
        assert_eq!(mults, vec![0.5, 0.25, 0.0625, 0.00390625]);
        assert_eq!(ladder.startup_samples(), 8);
        assert_eq!(ladder.delay(), 15);
    }

    #[test]
    fn test_real_ladder_impulse_is_reversed_geometric() {
        // Impulse in; after the ladder delay the output walks p^(L-1) .. p^0.
        let p = 0.5;
        let mut ladder = RealLadder::with_stages(p, 2);
        let len = 1 << 3;
        let out: Vec<f64> = (0..len + 2)
            .map(|n| ladder.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();
        for (n, &y) in out.iter().enumerate().take(len) {
            let expected = p.powi((len - 1 - n) as i32);
            assert!((y - expected).abs() < 1e-15, "n={} y={} expected={}", n, y, expected);
        }
        assert_eq!(out[len], 0.0);
        assert_eq!(out[len + 1], 0.0);
    }

    #[test]
    fn test_complex_ladder_impulse() {
        // Pair response h[k] = Im(c^(k+1)) / Im(c), emitted reversed.
        let c = Complex64::from_polar(0.8, 0.6);
        let mut ladder = ComplexLadder::with_stages(c, 3);
        let len = 1 << 4;
        let out: Vec<f64> = (0..len)
            .map(|n| ladder.process(if n == 0 { 1.0 } else { 0.0 }))
            .collect();
        for (n, &y) in out.iter().enumerate() {
            let k = (len - 1 - n) as i32;
            let expected = c.powi(k + 1).im / c.im;
            assert!((y - expected).abs() < 1e-12, "n={} y={} expected={}", n, y, expected);
        }
    }

    #[test]
    fn test_reset_clears_history() {
        let mut ladder = RealLadder::with_stages(0.7, 4);
        for n in 0..10 {
            ladder.process(n as f64);
        }
        ladder.reset();
        for _ in 0..40 {
            assert_eq!(ladder.process(0.0), 0.0);
        }
    }

    #[test]
    fn test_report() {
        let ladder = ComplexLadder::with_stages(Complex64::new(0.3, 0.4), 5);
        let report = ladder.report();
        assert_eq!(report.stages, 5);
        assert_eq!(report.startup_samples, 32);
        assert!((report.pole_magnitude - 0.5).abs() < 1e-15);
    }
}
