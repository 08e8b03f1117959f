//! Measurements of a realized reverse all-pass against its ideal.
//!
//! All measurements place the excitation after the startup period, so the
//! gate never hides part of a response.

use riir_spec::AllpassSpec;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::ConfigResult;
use crate::filter::{reverse_filter_reference, BiquadFilter};
use crate::reverse::ReverseAllpass;

/// Streaming output compared with the direct-form reverse reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceError {
    /// Largest absolute sample difference.
    pub max_abs: f64,
    /// `max_abs` divided by the reference peak.
    pub max_rel: f64,
    /// Samples compared after alignment.
    pub compared: usize,
}

/// Forward-then-reverse impulse response shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeSymmetry {
    pub peak_index: usize,
    pub expected_centre: usize,
    /// `Σ|y[c+k] - y[c-k]| / Σ|y|` around the expected centre.
    pub asymmetry: f64,
}

/// Runs `signal` through a fresh filter and compares the aligned output
/// with [`reverse_filter_reference`].
pub fn reference_error(spec: &AllpassSpec, signal: &[f64]) -> ConfigResult<ReferenceError> {
    let mut filter = ReverseAllpass::new(spec)?;
    let output = filter.process_buffer_copy(signal);
    let reference = reverse_filter_reference(&filter.design().coeffs, signal);

    let delay = filter.alignment_samples() as usize;
    // Output before this index is gated or still filling.
    let start = delay.max(filter.startup_samples() as usize);

    let peak = reference.iter().fold(0.0f64, |m, &r| m.max(r.abs()));
    let mut max_abs = 0.0f64;
    let mut compared = 0;
    for n in start..signal.len() {
        max_abs = max_abs.max((output[n] - reference[n - delay]).abs());
        compared += 1;
    }

    let max_rel = if peak > 0.0 { max_abs / peak } else { 0.0 };
    tracing::debug!(max_abs, max_rel, compared, "reference comparison");

    Ok(ReferenceError {
        max_abs,
        max_rel,
        compared,
    })
}

/// Impulse response of the realized filter, starting at the excitation.
///
/// The response is `alignment_samples + 1` long; it is padded with zeros to
/// at least `len`.
pub fn impulse_response(spec: &AllpassSpec, len: usize) -> ConfigResult<Vec<f64>> {
    let mut filter = ReverseAllpass::new(spec)?;
    let start = filter.startup_samples() as usize;
    let span = len.max(filter.alignment_samples() as usize + 1);

    let mut input = vec![0.0; start + span];
    input[start] = 1.0;
    filter.process_buffer(&mut input);
    Ok(input.split_off(start))
}

/// Largest deviation of `|H|` from 0 dB over all FFT bins of the realized
/// impulse response.
///
/// `fft_len` is raised to the next power of two that holds the whole
/// response.
pub fn magnitude_deviation_db(spec: &AllpassSpec, fft_len: usize) -> ConfigResult<f64> {
    let response = impulse_response(spec, fft_len)?;
    let fft_size = response.len().next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut buffer: Vec<Complex<f64>> = response.iter().map(|&s| Complex::new(s, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));
    fft.process(&mut buffer);

    let deviation = buffer
        .iter()
        .take(fft_size / 2 + 1)
        .map(|c| (20.0 * c.norm().log10()).abs())
        .fold(0.0f64, f64::max);
    Ok(deviation)
}

/// Passes an impulse through the forward all-pass and then the reverse
/// all-pass. The cascade is zero-phase, so the result should be symmetric
/// around the alignment delay.
pub fn cascade_symmetry(spec: &AllpassSpec, len: usize) -> ConfigResult<CascadeSymmetry> {
    let mut forward = BiquadFilter::allpass(spec)?;
    let mut reverse = ReverseAllpass::new(spec)?;

    let start = reverse.startup_samples() as usize;
    let delay = reverse.alignment_samples() as usize;
    let total = start + len.max(2 * delay + 1);

    let mut signal = vec![0.0; total];
    signal[start] = 1.0;
    forward.process_buffer(&mut signal);
    reverse.process_buffer(&mut signal);

    let centre = start + delay;
    let peak_index = signal
        .iter()
        .enumerate()
        .fold((0, 0.0f64), |(i_max, v_max), (i, &v)| {
            if v.abs() > v_max {
                (i, v.abs())
            } else {
                (i_max, v_max)
            }
        })
        .0;

    let reach = delay.min(total - 1 - centre);
    let mismatch: f64 = (1..=reach)
        .map(|k| (signal[centre + k] - signal[centre - k]).abs())
        .sum();
    let energy: f64 = signal.iter().map(|s| s.abs()).sum();
    let asymmetry = if energy > 0.0 { mismatch / energy } else { 0.0 };

    Ok(CascadeSymmetry {
        peak_index,
        expected_centre: centre,
        asymmetry,
    })
}
