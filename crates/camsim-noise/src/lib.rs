//! Pluggable per-sensor image noise for simulated cameras.
//!
//! `camsim-noise` turns a clean rendered frame into a degraded one that
//! approximates a real sensor. Models are interchangeable behind the
//! [`SensorNoiseModel`](model::SensorNoiseModel) trait and can be selected by
//! name at runtime through the [`NoiseModelRegistry`](registry::NoiseModelRegistry).
//! All sampling takes an explicit RNG so results are reproducible from a seed.
//!
//! # Architecture
//!
//! - [`SensorNoiseModel`](model::SensorNoiseModel) is the object-safe contract:
//!   a sensor-type gate plus [`apply`](model::SensorNoiseModel::apply).
//! - [`NoiseModelFactory`](model::NoiseModelFactory) adds the static parts a
//!   registry needs (name, gate without an instance, construction from kwargs).
//! - Built-in models: [`SaltAndPepperNoiseModel`](salt_and_pepper::SaltAndPepperNoiseModel),
//!   [`SpeckleNoiseModel`](speckle::SpeckleNoiseModel) and the identity
//!   [`NoSensorNoiseModel`](identity::NoSensorNoiseModel).
//!
//! # Quick Start
//!
//! ```
//! use camsim_noise::prelude::*;
//! use ndarray::ArrayD;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let model = global_registry()
//!     .create("SpeckleNoiseModel", &toml::Table::new())
//!     .unwrap();
//! assert!(model.is_valid_sensor_type(SensorType::Color));
//!
//! let clean = ArrayD::<u8>::from_elem(vec![4, 4, 3], 127);
//! let noisy = model.apply(clean.view(), &mut rng).unwrap();
//! assert_eq!(noisy.shape(), clean.shape());
//! ```

pub mod error;
pub mod identity;
pub mod image;
pub mod model;
pub mod registry;
pub mod salt_and_pepper;
pub mod speckle;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::error::{ImageError, NoiseError};
    pub use crate::identity::NoSensorNoiseModel;
    pub use crate::model::{NoiseModelFactory, SensorNoiseModel};
    pub use crate::registry::{
        NoiseModelEntry, NoiseModelRegistry, global_registry, register_noise_model,
    };
    pub use crate::salt_and_pepper::{SaltAndPepperConfig, SaltAndPepperNoiseModel};
    pub use crate::speckle::{SpeckleConfig, SpeckleNoiseModel};
    pub use camsim_core::sensor::SensorType;
}
