//! Deterministic seed derivation for reproducible noise.
//!
//! [`SeedHierarchy`] derives one seed per sensor uuid from a single run seed.
//! Each sensor owns an RNG seeded from its own branch, so sensors never share
//! a random stream and results do not depend on the order they are stepped in.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Derive a child seed from a parent seed and a string key.
///
/// Uses `DefaultHasher` (SipHash-1-3) for fast, deterministic mixing.
///
/// # Example
///
/// ```
/// use camsim_core::seed::derive_seed;
///
/// let child = derive_seed(42, "rgb");
/// assert_ne!(child, 42);
/// assert_eq!(child, derive_seed(42, "rgb"));
/// ```
#[must_use]
pub fn derive_seed(parent: u64, key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    parent.hash(&mut hasher);
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hierarchical seed manager for reproducible sensor noise.
///
/// # Example
///
/// ```
/// use camsim_core::seed::SeedHierarchy;
///
/// let seeds = SeedHierarchy::new(42);
/// assert_ne!(seeds.sensor_seed("rgb"), seeds.sensor_seed("rgb_left"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHierarchy {
    root: u64,
}

impl SeedHierarchy {
    /// Create a new hierarchy from a root seed.
    #[must_use]
    pub const fn new(root: u64) -> Self {
        Self { root }
    }

    /// The root (run-level) seed.
    #[must_use]
    pub const fn root(&self) -> u64 {
        self.root
    }

    /// Derive a seed for the sensor identified by `uuid`.
    #[must_use]
    pub fn sensor_seed(&self, uuid: &str) -> u64 {
        derive_seed(self.root, uuid)
    }

    /// Create a `ChaCha8Rng` for the sensor identified by `uuid`.
    #[must_use]
    pub fn sensor_rng(&self, uuid: &str) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.sensor_seed(uuid))
    }
}

impl Default for SeedHierarchy {
    fn default() -> Self {
        Self::new(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
