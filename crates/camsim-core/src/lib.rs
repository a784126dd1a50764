//! camsim-core: sensor types, seeds, configuration and errors shared by the
//! camsim camera pipeline crates.

pub mod config;
pub mod error;
pub mod seed;
pub mod sensor;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{SensorSpec, SensorSuiteConfig};
    pub use crate::error::ConfigError;
    pub use crate::seed::{SeedHierarchy, derive_seed};
    pub use crate::sensor::SensorType;
}
