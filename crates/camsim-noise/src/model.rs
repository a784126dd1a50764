//! The noise model contract.
//!
//! [`SensorNoiseModel`] is object-safe so the registry can hand out
//! `Box<dyn SensorNoiseModel>`. Randomness is passed to every
//! [`apply`](SensorNoiseModel::apply) call rather than held by the model, which
//! keeps models immutable and shareable across threads.

use std::fmt;

use camsim_core::sensor::SensorType;
use rand::RngCore;
use serde::de::DeserializeOwned;

use crate::error::NoiseError;
use crate::image::{Image, ImageView};

// ---------------------------------------------------------------------------
// SensorNoiseModel
// ---------------------------------------------------------------------------

/// A parameterized transform from a clean frame to a noisy one.
///
/// Implementations hold only immutable configuration, so a single instance may
/// be applied from several threads as long as each call brings its own RNG.
pub trait SensorNoiseModel: fmt::Debug + Send + Sync {
    /// Registry name of the model.
    fn name(&self) -> &'static str;

    /// Whether this model may be attached to a sensor of `sensor_type`.
    ///
    /// Pure: depends only on the model type, never on instance state.
    fn is_valid_sensor_type(&self, sensor_type: SensorType) -> bool;

    /// Produce a noisy copy of `image`.
    ///
    /// The input is never modified. On error no output is produced.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidImage`] if the image shape is not one the
    /// model handles.
    fn apply(&self, image: ImageView<'_>, rng: &mut dyn RngCore) -> Result<Image, NoiseError>;
}

// ---------------------------------------------------------------------------
// NoiseModelFactory
// ---------------------------------------------------------------------------

/// Static companion of [`SensorNoiseModel`] used by the registry.
pub trait NoiseModelFactory: SensorNoiseModel + Sized + 'static {
    /// Name the model is registered under.
    const NAME: &'static str;

    /// Sensor-type gate, evaluated without an instance.
    fn supports(sensor_type: SensorType) -> bool;

    /// Build the model from keyword arguments.
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] on unknown keys, wrong
    /// value types or out-of-range values.
    fn from_kwargs(kwargs: &toml::Table) -> Result<Self, NoiseError>;
}

/// Deserialize a model configuration struct from a kwargs table.
///
/// The struct is expected to use `#[serde(default, deny_unknown_fields)]`.
pub(crate) fn config_from_kwargs<T: DeserializeOwned>(
    model: &str,
    kwargs: &toml::Table,
) -> Result<T, NoiseError> {
    toml::Value::Table(kwargs.clone())
        .try_into()
        .map_err(|e: toml::de::Error| NoiseError::invalid_config(model, e.message()))
}

/// Check that a parameter is finite and within `[low, high]`.
pub(crate) fn check_range(
    model: &str,
    field: &str,
    value: f64,
    low: f64,
    high: f64,
) -> Result<(), NoiseError> {
    if !value.is_finite() || value < low || value > high {
        return Err(NoiseError::invalid_config(
            model,
            format!("{field} must be finite and in [{low}, {high}], got {value}"),
        ));
    }
    Ok(())
}

/// Check that a parameter is finite.
pub(crate) fn check_finite(model: &str, field: &str, value: f64) -> Result<(), NoiseError> {
    if !value.is_finite() {
        return Err(NoiseError::invalid_config(
            model,
            format!("{field} must be finite, got {value}"),
        ));
    }
    Ok(())
}

/// Check that a parameter is finite and `>= 0`.
pub(crate) fn check_non_negative(model: &str, field: &str, value: f64) -> Result<(), NoiseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(NoiseError::invalid_config(
            model,
            format!("{field} must be finite and >= 0, got {value}"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
