//! The "no noise" model.

use camsim_core::sensor::SensorType;
use rand::RngCore;
use serde::Deserialize;

use crate::error::NoiseError;
use crate::image::{Image, ImageView};
use crate::model::{NoiseModelFactory, SensorNoiseModel, config_from_kwargs};

/// Accepts no keyword arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoKwargs {}

/// Identity model, registered as `"None"`.
///
/// Valid for every sensor type and every image rank; returns an owned copy of
/// the input without consuming any randomness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSensorNoiseModel;

impl SensorNoiseModel for NoSensorNoiseModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_valid_sensor_type(&self, sensor_type: SensorType) -> bool {
        Self::supports(sensor_type)
    }

    fn apply(&self, image: ImageView<'_>, _rng: &mut dyn RngCore) -> Result<Image, NoiseError> {
        Ok(image.to_owned())
    }
}

impl NoiseModelFactory for NoSensorNoiseModel {
    const NAME: &'static str = "None";

    fn supports(_sensor_type: SensorType) -> bool {
        true
    }

    fn from_kwargs(kwargs: &toml::Table) -> Result<Self, NoiseError> {
        config_from_kwargs::<NoKwargs>(Self::NAME, kwargs)?;
        Ok(Self)
    }
}
