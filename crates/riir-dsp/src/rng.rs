//! Deterministic test signals using PCG32.
//!
//! Verification and tests need the same pseudo-random input on every run
//! and platform, so all noise comes from a seeded PCG32 stream.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// PCG32 stream for a 32-bit seed (the seed fills both 32-bit halves of
/// the 64-bit state seed).
pub fn create_rng(seed: u32) -> Pcg32 {
    let wide = u64::from(seed);
    Pcg32::seed_from_u64(wide << 32 | wide)
}

/// Uniform white noise in [-1, 1).
pub fn white_noise(seed: u32, len: usize) -> Vec<f64> {
    let mut noise = create_rng(seed);
    (0..len).map(|_| noise.gen_range(-1.0..1.0)).collect()
}

/// A unit impulse at `position` in a buffer of `len` zeros.
pub fn impulse(len: usize, position: usize) -> Vec<f64> {
    let mut buffer = vec![0.0; len];
    if let Some(sample) = buffer.get_mut(position) {
        *sample = 1.0;
    }
    buffer
}
