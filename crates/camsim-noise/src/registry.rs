//! Name-keyed catalog of noise model constructors.
//!
//! The registry is append-only: entries are added at startup and never
//! removed or replaced. Registering a name twice fails with
//! [`NoiseError::DuplicateRegistration`].
//!
//! [`global_registry`] is the process-wide instance. It is built on first use
//! with the built-in models and lives until process exit.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use camsim_core::sensor::SensorType;
use tracing::debug;

use crate::error::NoiseError;
use crate::identity::NoSensorNoiseModel;
use crate::model::{NoiseModelFactory, SensorNoiseModel};
use crate::salt_and_pepper::SaltAndPepperNoiseModel;
use crate::speckle::SpeckleNoiseModel;

/// Builds a boxed model from keyword arguments.
pub type ModelConstructor = fn(&toml::Table) -> Result<Box<dyn SensorNoiseModel>, NoiseError>;

/// Sensor-type gate evaluated without an instance.
pub type SensorGate = fn(SensorType) -> bool;

// ---------------------------------------------------------------------------
// NoiseModelEntry
// ---------------------------------------------------------------------------

/// A registered model: its name, sensor gate and constructor.
#[derive(Clone, Copy)]
pub struct NoiseModelEntry {
    name: &'static str,
    supports: SensorGate,
    construct: ModelConstructor,
}

fn construct_boxed<M: NoiseModelFactory>(
    kwargs: &toml::Table,
) -> Result<Box<dyn SensorNoiseModel>, NoiseError> {
    Ok(Box::new(M::from_kwargs(kwargs)?))
}

impl NoiseModelEntry {
    /// Entry for an arbitrary constructor.
    pub const fn new(name: &'static str, supports: SensorGate, construct: ModelConstructor) -> Self {
        Self {
            name,
            supports,
            construct,
        }
    }

    /// Entry for a [`NoiseModelFactory`] type.
    pub fn of<M: NoiseModelFactory>() -> Self {
        Self::new(M::NAME, M::supports, construct_boxed::<M>)
    }

    /// Registered name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the model may be attached to a sensor of `sensor_type`.
    pub fn supports(&self, sensor_type: SensorType) -> bool {
        (self.supports)(sensor_type)
    }

    /// Construct an instance from keyword arguments.
    ///
    /// # Errors
    ///
    /// Propagates the constructor's [`NoiseError::InvalidConfiguration`].
    pub fn construct(&self, kwargs: &toml::Table) -> Result<Box<dyn SensorNoiseModel>, NoiseError> {
        (self.construct)(kwargs)
    }
}

impl fmt::Debug for NoiseModelEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseModelEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// NoiseModelRegistry
// ---------------------------------------------------------------------------

/// Registry of noise model constructors keyed by name.
///
/// # Example
///
/// ```
/// use camsim_noise::prelude::*;
///
/// let registry = NoiseModelRegistry::with_builtins();
/// assert!(registry.contains("SaltAndPepperNoiseModel"));
///
/// let err = registry.register_model::<SpeckleNoiseModel>().unwrap_err();
/// assert!(matches!(err, NoiseError::DuplicateRegistration(_)));
/// ```
#[derive(Debug, Default)]
pub struct NoiseModelRegistry {
    entries: RwLock<BTreeMap<&'static str, NoiseModelEntry>>,
}

impl NoiseModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in models.
    pub fn with_builtins() -> Self {
        let entries = [
            NoiseModelEntry::of::<NoSensorNoiseModel>(),
            NoiseModelEntry::of::<SaltAndPepperNoiseModel>(),
            NoiseModelEntry::of::<SpeckleNoiseModel>(),
        ]
        .into_iter()
        .map(|entry| (entry.name, entry))
        .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Add an entry.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::DuplicateRegistration`] if the name is taken; the
    /// existing entry is left untouched.
    pub fn register(&self, entry: NoiseModelEntry) -> Result<(), NoiseError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(entry.name) {
            return Err(NoiseError::DuplicateRegistration(entry.name.to_owned()));
        }
        entries.insert(entry.name, entry);
        debug!(model = entry.name, "registered noise model");
        Ok(())
    }

    /// Register a [`NoiseModelFactory`] type under its [`NAME`](NoiseModelFactory::NAME).
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::DuplicateRegistration`] if the name is taken.
    pub fn register_model<M: NoiseModelFactory>(&self) -> Result<(), NoiseError> {
        self.register(NoiseModelEntry::of::<M>())
    }

    /// Look up an entry by name.
    pub fn entry(&self, name: &str) -> Option<NoiseModelEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    /// Returns `true` if a model is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, name: &str) -> Result<NoiseModelEntry, NoiseError> {
        self.entry(name)
            .ok_or_else(|| NoiseError::UnknownModel(name.to_owned()))
    }

    /// Evaluate the sensor gate of a registered model without constructing it.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownModel`] if `name` is not registered.
    pub fn is_valid_sensor_type(
        &self,
        name: &str,
        sensor_type: SensorType,
    ) -> Result<bool, NoiseError> {
        Ok(self.lookup(name)?.supports(sensor_type))
    }

    /// Construct the model registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownModel`] if `name` is not registered, or
    /// [`NoiseError::InvalidConfiguration`] if `kwargs` are rejected.
    pub fn create(
        &self,
        name: &str,
        kwargs: &toml::Table,
    ) -> Result<Box<dyn SensorNoiseModel>, NoiseError> {
        let model = self.lookup(name)?.construct(kwargs)?;
        debug!(model = name, ?kwargs, "created noise model");
        Ok(model)
    }

    /// Construct a model for a sensor, checking the gate first.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::UnknownModel`],
    /// [`NoiseError::IncompatibleSensorType`] or
    /// [`NoiseError::InvalidConfiguration`].
    pub fn create_for_sensor(
        &self,
        name: &str,
        kwargs: &toml::Table,
        sensor_type: SensorType,
    ) -> Result<Box<dyn SensorNoiseModel>, NoiseError> {
        let entry = self.lookup(name)?;
        if !entry.supports(sensor_type) {
            return Err(NoiseError::IncompatibleSensorType {
                model: name.to_owned(),
                sensor_type,
            });
        }
        self.create(name, kwargs)
    }
}

// ---------------------------------------------------------------------------
// Global registry
// ---------------------------------------------------------------------------

static GLOBAL_NOISE_MODEL_REGISTRY: OnceLock<NoiseModelRegistry> = OnceLock::new();

/// The process-wide registry, pre-populated with the built-in models.
pub fn global_registry() -> &'static NoiseModelRegistry {
    GLOBAL_NOISE_MODEL_REGISTRY.get_or_init(NoiseModelRegistry::with_builtins)
}

/// Register a model type in the [`global_registry`].
///
/// Intended to be called once per model during startup.
///
/// # Errors
///
/// Returns [`NoiseError::DuplicateRegistration`] if the name is taken.
pub fn register_noise_model<M: NoiseModelFactory>() -> Result<(), NoiseError> {
    global_registry().register_model::<M>()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
