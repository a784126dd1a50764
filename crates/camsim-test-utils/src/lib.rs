//! Shared test fixtures and utilities for camsim crates.
//!
//! Provides deterministic RNG setup and small synthetic frames.

pub mod images;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use images::{gradient_image, uniform_image};
pub use rng::seeded_rng;
