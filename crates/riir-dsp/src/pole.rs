//! Pole classification.
//!
//! The normalized denominator `z² + a1·z + a2` has discriminant
//! `D = a1²/4 - a2`. For a second-order all-pass, `D < 0` exactly when
//! `Q > 0.5`, giving one complex-conjugate pair; otherwise there are two real
//! poles, coincident at `Q = 0.5`. A first-order design has the single real
//! pole `-a1`.

use num_complex::Complex64;
use riir_spec::{AllpassKind, PoleTopology};

use crate::design::AllpassDesign;
use crate::error::{ConfigError, ConfigResult};

/// One pole of the denominator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pole {
    Real(f64),
    /// Upper pole of a conjugate pair.
    Complex(Complex64),
}

impl Pole {
    pub fn magnitude(&self) -> f64 {
        match self {
            Pole::Real(r) => r.abs(),
            Pole::Complex(c) => c.norm(),
        }
    }
}

/// All poles of a design, grouped the way they are realized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolePlacement {
    /// First order.
    Single(f64),
    /// Second order with `Q <= 0.5`; processed in series, first then second.
    RealPair(f64, f64),
    /// Second order with `Q > 0.5`.
    ComplexPair(Complex64),
}

impl PolePlacement {
    /// Classifies the poles of a design and checks each is strictly inside
    /// the unit circle.
    pub fn classify(design: &AllpassDesign) -> ConfigResult<Self> {
        let c = &design.coeffs;
        let placement = match design.kind {
            AllpassKind::First { .. } => PolePlacement::Single(-c.a1),
            AllpassKind::Second { q, .. } => {
                let half = -c.a1 / 2.0;
                // Branch on Q, not on the sign of D: at Q = 0.5 round-off can
                // leave D a few ulps either side of zero.
                let im = if q > 0.5 {
                    (-discriminant(c.a1, c.a2)).max(0.0).sqrt()
                } else {
                    0.0
                };
                if im > 0.0 {
                    PolePlacement::ComplexPair(Complex64::new(half, im))
                } else if q >= 0.5 {
                    // Q at or just above 0.5 with a vanishing imaginary part:
                    // a double real pole.
                    PolePlacement::RealPair(half, half)
                } else {
                    let root = discriminant(c.a1, c.a2).max(0.0).sqrt();
                    PolePlacement::RealPair(half + root, half - root)
                }
            }
        };

        for pole in placement.poles() {
            let magnitude = pole.magnitude();
            if !(magnitude < 1.0) {
                return Err(ConfigError::UnstablePole { magnitude });
            }
        }

        Ok(placement)
    }

    /// Poles in ladder order.
    pub fn poles(&self) -> Vec<Pole> {
        match *self {
            PolePlacement::Single(r) => vec![Pole::Real(r)],
            PolePlacement::RealPair(r1, r2) => vec![Pole::Real(r1), Pole::Real(r2)],
            PolePlacement::ComplexPair(c) => vec![Pole::Complex(c)],
        }
    }

    pub fn topology(&self) -> PoleTopology {
        match self {
            PolePlacement::Single(_) => PoleTopology::SingleReal,
            PolePlacement::RealPair(..) => PoleTopology::RealPair,
            PolePlacement::ComplexPair(_) => PoleTopology::ComplexPair,
        }
    }
}

/// `a1²/4 - a2` for the denominator `z² + a1·z + a2`.
pub fn discriminant(a1: f64, a2: f64) -> f64 {
    a1 * a1 / 4.0 - a2
}

#[cfg(test)]
mod tests {
    use super::*;
    use riir_spec::AllpassSpec;

    fn classify(spec: AllpassSpec) -> ConfigResult<PolePlacement> {
        PolePlacement::classify(&AllpassDesign::new(&spec)?)
    }

    #[test]
    fn test_first_order_single_pole() {
        let placement = classify(AllpassSpec::first_order(48000, 100.0, 80.0)).unwrap();
        match placement {
            PolePlacement::Single(r) => assert!(r > 0.98 && r < 0.99),
            other => panic!("expected single pole, got {:?}", other),
        }
    }

    #[test]
    fn test_high_q_is_complex() {
        let placement = classify(AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0)).unwrap();
        assert_eq!(placement.topology(), PoleTopology::ComplexPair);
        if let PolePlacement::ComplexPair(c) = placement {
            assert!(c.im > 0.0);
            assert!(c.norm() < 1.0);
        }
    }

    #[test]
    fn test_q_half_takes_equal_real_poles() {
        let placement = classify(AllpassSpec::second_order(48000, 1000.0, 0.5, 80.0)).unwrap();
        match placement {
            PolePlacement::RealPair(r1, r2) => assert_eq!(r1, r2),
            other => panic!("expected real pair, got {:?}", other),
        }
    }

    #[test]
    fn test_low_q_distinct_real_poles() {
        let spec = AllpassSpec::second_order(48000, 1000.0, 0.3, 80.0);
        let design = AllpassDesign::new(&spec).unwrap();
        assert!(discriminant(design.coeffs.a1, design.coeffs.a2) > 0.0);

        match PolePlacement::classify(&design).unwrap() {
            PolePlacement::RealPair(r1, r2) => {
                assert!(r1 > r2);
                // Vieta: r1 + r2 = -a1, r1 * r2 = a2.
                assert!((r1 + r2 + design.coeffs.a1).abs() < 1e-12);
                assert!((r1 * r2 - design.coeffs.a2).abs() < 1e-12);
            }
            other => panic!("expected real pair, got {:?}", other),
        }
    }

    #[test]
    fn test_complex_pole_matches_a2() {
        let spec = AllpassSpec::second_order(44100, 500.0, 4.0, 80.0);
        let design = AllpassDesign::new(&spec).unwrap();
        let placement = PolePlacement::classify(&design).unwrap();
        if let PolePlacement::ComplexPair(c) = placement {
            assert!((c.norm_sqr() - design.coeffs.a2).abs() < 1e-12);
        } else {
            panic!("expected complex pair");
        }
    }

    #[test]
    fn test_nyquist_pole_is_unstable() {
        let err = classify(AllpassSpec::first_order(48000, 24000.0, 80.0)).unwrap_err();
        assert_eq!(err.code(), "RIIR_001");
    }
}
