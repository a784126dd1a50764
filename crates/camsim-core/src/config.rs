//! Sensor suite configuration loaded from TOML.
//!
//! Each [`SensorSpec`] names the noise model to attach by registry name and
//! carries the model's keyword arguments verbatim in `noise_model_kwargs`.
//! The kwargs are not interpreted here; the noise crate deserializes them into
//! the model's own configuration struct and rejects unknown keys.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::seed::SeedHierarchy;
use crate::sensor::SensorType;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

/// Largest accepted frame side, in pixels.
pub const MAX_RESOLUTION: u32 = 16_384;

const fn default_resolution() -> [u32; 2] {
    [480, 640]
}
fn default_noise_model() -> String {
    "None".into()
}

// ---------------------------------------------------------------------------
// SensorSpec
// ---------------------------------------------------------------------------

/// Configuration for a single sensor and the noise model attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorSpec {
    /// Unique identifier of the sensor within the suite.
    pub uuid: String,

    /// Modality of the sensor.
    #[serde(default)]
    pub sensor_type: SensorType,

    /// Frame resolution as `[height, width]` (default: `[480, 640]`).
    #[serde(default = "default_resolution")]
    pub resolution: [u32; 2],

    /// Registry name of the noise model (default: `"None"`).
    #[serde(default = "default_noise_model")]
    pub noise_model: String,

    /// Keyword arguments forwarded to the noise model's constructor.
    #[serde(default)]
    pub noise_model_kwargs: toml::Table,
}

impl SensorSpec {
    /// Create a spec with default resolution and no noise.
    #[must_use]
    pub fn new(uuid: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            uuid: uuid.into(),
            sensor_type,
            resolution: default_resolution(),
            noise_model: default_noise_model(),
            noise_model_kwargs: toml::Table::new(),
        }
    }

    /// Builder: select a noise model by registry name with its kwargs.
    #[must_use]
    pub fn with_noise_model(mut self, name: impl Into<String>, kwargs: toml::Table) -> Self {
        self.noise_model = name.into();
        self.noise_model_kwargs = kwargs;
        self
    }

    /// Builder: set the resolution as `[height, width]`.
    #[must_use]
    pub const fn with_resolution(mut self, height: u32, width: u32) -> Self {
        self.resolution = [height, width];
        self
    }

    /// Frame height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.resolution[0]
    }

    /// Frame width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.resolution[1]
    }

    /// Check the uuid, the resolution and the noise model name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for a blank uuid or model name,
    /// and [`ConfigError::InvalidValue`] if either side of the resolution is
    /// zero or above [`MAX_RESOLUTION`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uuid.trim().is_empty() {
            return Err(ConfigError::MissingField("uuid".into()));
        }
        if self
            .resolution
            .iter()
            .any(|&side| side == 0 || side > MAX_RESOLUTION)
        {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.resolution", self.uuid),
                message: format!(
                    "each side must be in 1..={MAX_RESOLUTION}, got {:?}",
                    self.resolution
                ),
            });
        }
        if self.noise_model.trim().is_empty() {
            return Err(ConfigError::MissingField(format!(
                "{}.noise_model",
                self.uuid
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SensorSuiteConfig
// ---------------------------------------------------------------------------

/// Top-level configuration: a run seed and the list of sensors.
///
/// # Example
///
/// ```
/// use camsim_core::config::SensorSuiteConfig;
/// use camsim_core::sensor::SensorType;
///
/// let config = SensorSuiteConfig::from_toml_str(r#"
///     seed = 7
///
///     [[sensors]]
///     uuid = "rgb"
///     sensor_type = "color"
///     noise_model = "SaltAndPepperNoiseModel"
///     noise_model_kwargs = { amount = 0.01 }
/// "#).unwrap();
///
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.sensors[0].sensor_type, SensorType::Color);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorSuiteConfig {
    /// Master random seed.
    #[serde(default)]
    pub seed: u64,

    /// Sensors in the suite.
    #[serde(default)]
    pub sensors: Vec<SensorSpec>,
}

impl SensorSuiteConfig {
    /// Validate every sensor and check that uuids are unique.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`SensorSpec::validate`], or
    /// [`ConfigError::DuplicateSensor`] if two sensors share a uuid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for spec in &self.sensors {
            spec.validate()?;
            if !seen.insert(spec.uuid.as_str()) {
                return Err(ConfigError::DuplicateSensor(spec.uuid.clone()));
            }
        }
        Ok(())
    }

    /// Seed hierarchy rooted at [`seed`](Self::seed).
    #[must_use]
    pub const fn seeds(&self) -> SeedHierarchy {
        SeedHierarchy::new(self.seed)
    }

    /// Look up a sensor by uuid.
    pub fn sensor(&self, uuid: &str) -> Option<&SensorSpec> {
        self.sensors.iter().find(|s| s.uuid == uuid)
    }

    /// Parse and validate from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed TOML or unknown keys, or any
    /// error from [`validate`](Self::validate).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error
    /// from [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
