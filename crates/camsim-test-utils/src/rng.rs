//! Deterministic RNG utilities for reproducible tests.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate a deterministic `Vec<u8>` of length `len` from a seed.
///
/// Useful for filling frame buffers with reproducible pixel data.
pub fn deterministic_bytes(len: usize, seed: u64) -> Vec<u8> {
    use rand::Rng;
    let mut rng = seeded_rng(seed);
    (0..len).map(|_| rng.r#gen::<u8>()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
