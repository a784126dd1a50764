//! Camera sensors that apply an attached noise model to each frame.
//!
//! [`CameraSensor`] is the owning side of the noise contract: it checks the
//! model's sensor-type gate before attaching it and keeps a private RNG seeded
//! from the run's [`SeedHierarchy`], so every sensor draws from its own
//! reproducible stream.

use std::collections::BTreeMap;
use std::fmt;

use camsim_core::config::{SensorSpec, SensorSuiteConfig};
use camsim_core::seed::SeedHierarchy;
use camsim_core::sensor::SensorType;
use camsim_noise::error::NoiseError;
use camsim_noise::image::{Image, ImageView};
use camsim_noise::model::SensorNoiseModel;
use camsim_noise::registry::NoiseModelRegistry;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::buffer::FrameBuffer;

// ---------------------------------------------------------------------------
// CameraSensor
// ---------------------------------------------------------------------------

/// A sensor that turns clean frames into observations, optionally noisy.
pub struct CameraSensor {
    uuid: String,
    sensor_type: SensorType,
    noise_model: Option<Box<dyn SensorNoiseModel>>,
    rng: ChaCha8Rng,
    frames_observed: u64,
}

impl CameraSensor {
    /// Create a sensor without a noise model.
    #[must_use]
    pub fn new(uuid: impl Into<String>, sensor_type: SensorType, seed: u64) -> Self {
        Self::with_rng(uuid.into(), sensor_type, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(uuid: String, sensor_type: SensorType, rng: ChaCha8Rng) -> Self {
        Self {
            uuid,
            sensor_type,
            noise_model: None,
            rng,
            frames_observed: 0,
        }
    }

    /// Build a sensor from its spec, attaching the named noise model.
    ///
    /// The RNG is `seeds.sensor_rng(&spec.uuid)`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownModel`],
    /// [`NoiseError::InvalidConfiguration`] or
    /// [`NoiseError::IncompatibleSensorType`].
    pub fn from_spec(
        spec: &SensorSpec,
        seeds: &SeedHierarchy,
        registry: &NoiseModelRegistry,
    ) -> Result<Self, NoiseError> {
        let mut sensor = Self::with_rng(
            spec.uuid.clone(),
            spec.sensor_type,
            seeds.sensor_rng(&spec.uuid),
        );
        let model = registry.create(&spec.noise_model, &spec.noise_model_kwargs)?;
        sensor.attach_noise_model(model)?;
        Ok(sensor)
    }

    /// Sensor identifier.
    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Sensor modality.
    #[must_use]
    pub const fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    /// The attached noise model, if any.
    #[must_use]
    pub fn noise_model(&self) -> Option<&dyn SensorNoiseModel> {
        self.noise_model.as_deref()
    }

    /// Number of frames returned by [`observe`](Self::observe) so far.
    #[must_use]
    pub const fn frames_observed(&self) -> u64 {
        self.frames_observed
    }

    /// Attach a noise model, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::IncompatibleSensorType`] if the model's gate
    /// rejects this sensor's type. The previous model stays attached.
    pub fn attach_noise_model(
        &mut self,
        model: Box<dyn SensorNoiseModel>,
    ) -> Result<(), NoiseError> {
        if !model.is_valid_sensor_type(self.sensor_type) {
            warn!(
                sensor = %self.uuid,
                model = model.name(),
                sensor_type = %self.sensor_type,
                "refused noise model for sensor"
            );
            return Err(NoiseError::IncompatibleSensorType {
                model: model.name().to_owned(),
                sensor_type: self.sensor_type,
            });
        }
        info!(sensor = %self.uuid, model = model.name(), "attached noise model");
        self.noise_model = Some(model);
        Ok(())
    }

    /// Detach and return the current noise model.
    pub fn detach_noise_model(&mut self) -> Option<Box<dyn SensorNoiseModel>> {
        self.noise_model.take()
    }

    /// Produce an observation from a clean image.
    ///
    /// Without a noise model this is an owned copy of `image`.
    ///
    /// # Errors
    ///
    /// Propagates [`NoiseError::InvalidImage`] from the model.
    pub fn observe_image(&mut self, image: ImageView<'_>) -> Result<Image, NoiseError> {
        let observed = match &self.noise_model {
            Some(model) => model.apply(image, &mut self.rng)?,
            None => image.to_owned(),
        };
        self.frames_observed += 1;
        Ok(observed)
    }

    /// Produce an observation from the frame currently held by `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidImage`] if the buffer is malformed or the
    /// model rejects its shape.
    pub fn observe(&mut self, frame: &FrameBuffer) -> Result<Image, NoiseError> {
        let image = frame.image()?;
        self.observe_image(image)
    }
}

impl fmt::Debug for CameraSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSensor")
            .field("uuid", &self.uuid)
            .field("sensor_type", &self.sensor_type)
            .field("noise_model", &self.noise_model)
            .field("frames_observed", &self.frames_observed)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// SensorSuite
// ---------------------------------------------------------------------------

/// Every sensor of a [`SensorSuiteConfig`], keyed by uuid.
#[derive(Debug, Default)]
pub struct SensorSuite(BTreeMap<String, CameraSensor>);

impl SensorSuite {
    /// Build all sensors, failing on the first one that cannot be built.
    ///
    /// # Errors
    ///
    /// Returns the first [`NoiseError`] from [`CameraSensor::from_spec`].
    pub fn from_config(
        config: &SensorSuiteConfig,
        registry: &NoiseModelRegistry,
    ) -> Result<Self, NoiseError> {
        let seeds = config.seeds();
        let sensors = config
            .sensors
            .iter()
            .map(|spec| {
                CameraSensor::from_spec(spec, &seeds, registry)
                    .map(|sensor| (spec.uuid.clone(), sensor))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(Self(sensors))
    }

    /// Return the sensor with the given uuid.
    pub fn get(&self, uuid: &str) -> Option<&CameraSensor> {
        self.0.get(uuid)
    }

    /// Return the sensor with the given uuid, mutably.
    pub fn get_mut(&mut self, uuid: &str) -> Option<&mut CameraSensor> {
        self.0.get_mut(uuid)
    }

    /// Iterate mutably over all (uuid, sensor) pairs in uuid order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut CameraSensor)> {
        self.0.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sensors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the suite has no sensors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
