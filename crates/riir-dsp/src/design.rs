//! All-pass filter design.
//!
//! Analog all-pass prototypes are mapped to the z-domain with the bilinear
//! transform. The pole frequency is pre-warped first so the digital pole
//! lands at the requested frequency despite the transform's frequency
//! compression:
//!
//! ```text
//! K  = 2 * sample_rate
//! Wp = K * tan(pi * fp / sample_rate)
//! ```

use std::f64::consts::PI;

use riir_spec::{validate, AllpassKind, AllpassSpec};

use crate::error::ConfigResult;

/// Normalized digital transfer-function coefficients (`a0 = 1`).
///
/// ```text
///        b0 + b1 z^-1 + b2 z^-2
/// H(z) = ----------------------
///         1 + a1 z^-1 + a2 z^-2
/// ```
///
/// First-order designs leave `b2` and `a2` at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Analog transfer function `num(s) / den(s)` with coefficients stored in
/// ascending powers of `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogPrototype {
    pub num: [f64; 3],
    pub den: [f64; 3],
    pub order: usize,
}

impl AnalogPrototype {
    /// First-order all-pass `(s - Wp) / (s + Wp)`.
    pub fn first_order(wp: f64) -> Self {
        Self {
            num: [-wp, 1.0, 0.0],
            den: [wp, 1.0, 0.0],
            order: 1,
        }
    }

    /// Second-order all-pass `(s² - (Wp/Q)s + Wp²) / (s² + (Wp/Q)s + Wp²)`.
    pub fn second_order(wp: f64, q: f64) -> Self {
        let wp2 = wp * wp;
        Self {
            num: [wp2, -wp / q, 1.0],
            den: [wp2, wp / q, 1.0],
            order: 2,
        }
    }

    /// Applies `s = K (1 - z^-1) / (1 + z^-1)` and normalizes by the leading
    /// denominator term.
    pub fn bilinear(&self, k: f64) -> DigitalCoefficients {
        let (num, den) = match self.order {
            1 => (bilinear_first(&self.num, k), bilinear_first(&self.den, k)),
            _ => (bilinear_second(&self.num, k), bilinear_second(&self.den, k)),
        };
        let a0 = den[0];
        DigitalCoefficients {
            b0: num[0] / a0,
            b1: num[1] / a0,
            b2: num[2] / a0,
            a1: den[1] / a0,
            a2: den[2] / a0,
        }
    }
}

fn bilinear_first(c: &[f64; 3], k: f64) -> [f64; 3] {
    [c[1] * k + c[0], c[0] - c[1] * k, 0.0]
}

fn bilinear_second(c: &[f64; 3], k: f64) -> [f64; 3] {
    let k2 = k * k;
    [
        c[2] * k2 + c[1] * k + c[0],
        2.0 * c[0] - 2.0 * c[2] * k2,
        c[2] * k2 - c[1] * k + c[0],
    ]
}

/// Pre-warps a pole frequency in Hz to an analog radian frequency.
pub fn prewarp(pole_frequency: f64, sample_rate: f64) -> f64 {
    let k = 2.0 * sample_rate;
    k * (PI * pole_frequency / sample_rate).tan()
}

/// A digital all-pass design, computed once per configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllpassDesign {
    /// Prototype and pole parameters the design was built from.
    pub kind: AllpassKind,
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Pre-warped analog pole frequency in rad/s.
    pub warped_frequency: f64,
    /// Normalized digital coefficients.
    pub coeffs: DigitalCoefficients,
}

impl AllpassDesign {
    /// Designs the digital all-pass for a spec.
    ///
    /// Fails if the spec does not validate (pole frequency outside
    /// `(0, sample_rate / 2]`, non-positive Q, SNR out of range).
    pub fn new(spec: &AllpassSpec) -> ConfigResult<Self> {
        validate(spec)?;

        let sample_rate = spec.sample_rate_hz();
        let wp = prewarp(spec.allpass.pole_frequency(), sample_rate);
        let prototype = match spec.allpass {
            AllpassKind::First { .. } => AnalogPrototype::first_order(wp),
            AllpassKind::Second { q, .. } => AnalogPrototype::second_order(wp, q),
        };

        Ok(Self {
            kind: spec.allpass,
            sample_rate,
            warped_frequency: wp,
            coeffs: prototype.bilinear(2.0 * sample_rate),
        })
    }

    /// Filter order (1 or 2).
    pub fn order(&self) -> usize {
        self.kind.order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_first_order_matches_tangent_form() {
        let spec = AllpassSpec::first_order(48000, 100.0, 80.0);
        let design = AllpassDesign::new(&spec).unwrap();
        let t = (PI * 100.0 / 48000.0).tan();
        let pole = (1.0 - t) / (1.0 + t);

        let c = design.coeffs;
        assert!(close(c.b0, pole, 1e-14));
        assert!(close(c.b1, -1.0, 1e-14));
        assert!(close(c.a1, -pole, 1e-14));
        assert_eq!(c.b2, 0.0);
        assert_eq!(c.a2, 0.0);
    }

    #[test]
    fn test_second_order_is_allpass() {
        // All-pass: numerator is the mirrored denominator.
        let spec = AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0);
        let c = AllpassDesign::new(&spec).unwrap().coeffs;
        assert!(close(c.b0, c.a2, 1e-14));
        assert!(close(c.b1, c.a1, 1e-14));
        assert!(close(c.b2, 1.0, 1e-14));
    }

    #[test]
    fn test_prewarp_low_frequency_is_nearly_linear() {
        let wp = prewarp(10.0, 48000.0);
        assert!(close(wp, 2.0 * PI * 10.0, 1e-3));
        assert!(prewarp(10000.0, 48000.0) > 2.0 * PI * 10000.0);
    }

    #[test]
    fn test_unit_magnitude_on_circle() {
        let spec = AllpassSpec::second_order(44100, 3000.0, 2.0, 80.0);
        let c = AllpassDesign::new(&spec).unwrap().coeffs;
        for w in [0.01, 0.3, 1.0, 2.5, 3.1] {
            let z1 = num_complex::Complex64::from_polar(1.0, -w);
            let z2 = z1 * z1;
            let num = c.b0 + z1 * c.b1 + z2 * c.b2;
            let den = 1.0 + z1 * c.a1 + z2 * c.a2;
            assert!(close((num / den).norm(), 1.0, 1e-12));
        }
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let spec = AllpassSpec::first_order(48000, 30000.0, 80.0);
        let err = AllpassDesign::new(&spec).unwrap_err();
        assert_eq!(err.code(), "SPEC_002");
    }
}
