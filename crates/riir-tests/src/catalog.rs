//! Named specs used across the integration tests.

use riir_spec::{AllpassSpec, PoleTopology};

/// A spec with the topology it is expected to produce.
#[derive(Debug, Clone, Copy)]
pub struct NamedSpec {
    pub name: &'static str,
    pub spec: AllpassSpec,
    pub topology: PoleTopology,
}

/// One or more specs per topology, including the Q = 0.5 boundary.
pub fn spec_catalog() -> Vec<NamedSpec> {
    vec![
        NamedSpec {
            name: "first_order_100hz",
            spec: AllpassSpec::first_order(48000, 100.0, 80.0),
            topology: PoleTopology::SingleReal,
        },
        NamedSpec {
            name: "first_order_upper_band",
            spec: AllpassSpec::first_order(44100, 15000.0, 90.0),
            topology: PoleTopology::SingleReal,
        },
        NamedSpec {
            name: "butterworth_1k",
            spec: AllpassSpec::second_order(48000, 1000.0, 0.7071, 80.0),
            topology: PoleTopology::ComplexPair,
        },
        NamedSpec {
            name: "resonant_250hz",
            spec: AllpassSpec::second_order(96000, 250.0, 3.0, 100.0),
            topology: PoleTopology::ComplexPair,
        },
        NamedSpec {
            name: "critically_damped",
            spec: AllpassSpec::second_order(48000, 1000.0, 0.5, 80.0),
            topology: PoleTopology::RealPair,
        },
        NamedSpec {
            name: "overdamped_2k",
            spec: AllpassSpec::second_order(48000, 2000.0, 0.3, 100.0),
            topology: PoleTopology::RealPair,
        },
    ]
}
