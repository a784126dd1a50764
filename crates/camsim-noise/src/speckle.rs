//! Multiplicative speckle noise.
//!
//! Each sample `x` (normalized to `[0, 1]`) becomes
//! `clip(x + x · n · intensity_constant, 0, 1)` with `n ~ N(mean, sigma²)`
//! drawn per sample. The perturbation scales with the signal, so black pixels
//! stay black.

use camsim_core::sensor::SensorType;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::image::{Image, ImageView, denormalize, ensure_color, normalize};
use crate::model::{
    NoiseModelFactory, SensorNoiseModel, check_finite, check_non_negative, config_from_kwargs,
};

// ---------------------------------------------------------------------------
// SpeckleConfig
// ---------------------------------------------------------------------------

/// Parameters of [`SpeckleNoiseModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeckleConfig {
    /// Scale applied to the Gaussian term (default: 0.2).
    pub intensity_constant: f64,
    /// Mean of the Gaussian term (default: 0).
    pub mean: f64,
    /// Standard deviation of the Gaussian term (default: 1).
    pub sigma: f64,
}

impl Default for SpeckleConfig {
    fn default() -> Self {
        Self {
            intensity_constant: 0.2,
            mean: 0.0,
            sigma: 1.0,
        }
    }
}

impl SpeckleConfig {
    /// Check that every parameter is finite and that `intensity_constant` and
    /// `sigma` are non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), NoiseError> {
        let name = SpeckleNoiseModel::NAME;
        check_non_negative(name, "intensity_constant", self.intensity_constant)?;
        check_finite(name, "mean", self.mean)?;
        check_non_negative(name, "sigma", self.sigma)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SpeckleNoiseModel
// ---------------------------------------------------------------------------

/// Speckle noise for color sensors.
///
/// # Example
///
/// ```
/// use camsim_noise::prelude::*;
/// use ndarray::ArrayD;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let model = SpeckleNoiseModel::default();
/// let black = ArrayD::<u8>::zeros(vec![2, 2, 3]);
/// let noisy = model.apply(black.view(), &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
/// assert_eq!(noisy, black);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeckleNoiseModel {
    config: SpeckleConfig,
}

impl SpeckleNoiseModel {
    /// Create a model from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] if a parameter is not
    /// finite, or `intensity_constant` or `sigma` is negative.
    pub fn new(config: SpeckleConfig) -> Result<Self, NoiseError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The model's configuration.
    pub const fn config(&self) -> &SpeckleConfig {
        &self.config
    }
}

impl Default for SpeckleNoiseModel {
    fn default() -> Self {
        Self {
            config: SpeckleConfig::default(),
        }
    }
}

impl SensorNoiseModel for SpeckleNoiseModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_valid_sensor_type(&self, sensor_type: SensorType) -> bool {
        Self::supports(sensor_type)
    }

    fn apply(&self, image: ImageView<'_>, rng: &mut dyn RngCore) -> Result<Image, NoiseError> {
        ensure_color(&image)?;

        let SpeckleConfig {
            intensity_constant,
            mean,
            sigma,
        } = self.config;
        Ok(image.map(|&sample| {
            let x = normalize(sample);
            let z: f64 = StandardNormal.sample(rng);
            let n = mean + sigma * z;
            denormalize(x + x * n * intensity_constant)
        }))
    }
}

impl NoiseModelFactory for SpeckleNoiseModel {
    const NAME: &'static str = "SpeckleNoiseModel";

    fn supports(sensor_type: SensorType) -> bool {
        sensor_type == SensorType::Color
    }

    fn from_kwargs(kwargs: &toml::Table) -> Result<Self, NoiseError> {
        Self::new(config_from_kwargs(Self::NAME, kwargs)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use camsim_test_utils::images::{gradient_image, uniform_image};
    use camsim_test_utils::seeded_rng;

    fn model(intensity_constant: f64, mean: f64, sigma: f64) -> SpeckleNoiseModel {
        SpeckleNoiseModel::new(SpeckleConfig {
            intensity_constant,
            mean,
            sigma,
        })
        .unwrap()
    }

    #[allow(clippy::cast_precision_loss)]
    fn std_dev(image: &Image) -> f64 {
        let n = image.len() as f64;
        let mean = image.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let var = image
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;
        var.sqrt()
    }

    // -- Configuration --

    #[test]
    fn default_config() {
        let config = *SpeckleNoiseModel::default().config();
        assert_eq!(config, SpeckleConfig::default());
        assert!((config.intensity_constant - 0.2).abs() < f64::EPSILON);
        assert!(config.mean.abs() < f64::EPSILON);
        assert!((config.sigma - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_negative_sigma() {
        let err = SpeckleNoiseModel::new(SpeckleConfig {
            sigma: -1.0,
            ..SpeckleConfig::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("sigma"));
    }

    #[test]
    fn rejects_negative_intensity() {
        assert!(
            SpeckleNoiseModel::new(SpeckleConfig {
                intensity_constant: -0.2,
                ..SpeckleConfig::default()
            })
            .is_err()
        );
    }

    #[test]
    fn rejects_infinite_mean() {
        assert!(
            SpeckleNoiseModel::new(SpeckleConfig {
                mean: f64::INFINITY,
                ..SpeckleConfig::default()
            })
            .is_err()
        );
    }

    #[test]
    fn accepts_zero_sigma() {
        assert!(SpeckleNoiseModel::new(SpeckleConfig {
            sigma: 0.0,
            ..SpeckleConfig::default()
        })
        .is_ok());
    }

    #[test]
    fn from_kwargs_accepts_integer_mean_and_sigma() {
        let kwargs: toml::Table = toml::from_str("mean = 0\nsigma = 2").unwrap();
        let m = SpeckleNoiseModel::from_kwargs(&kwargs).unwrap();
        assert!((m.config().sigma - 2.0).abs() < f64::EPSILON);
        assert!((m.config().intensity_constant - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn from_kwargs_rejects_unknown_key() {
        let kwargs: toml::Table = toml::from_str("amount = 0.1").unwrap();
        assert!(matches!(
            SpeckleNoiseModel::from_kwargs(&kwargs),
            Err(NoiseError::InvalidConfiguration { .. })
        ));
    }

    // -- Sensor gate --

    #[test]
    fn only_color_sensors() {
        let m = SpeckleNoiseModel::default();
        assert!(m.is_valid_sensor_type(SensorType::Color));
        assert!(!m.is_valid_sensor_type(SensorType::Depth));
        assert!(!SpeckleNoiseModel::supports(SensorType::Normal));
    }

    // -- Transform --

    #[test]
    fn zero_intensity_is_identity() {
        let clean = gradient_image(16, 16, 3);
        let noisy = model(0.0, 0.0, 1.0)
            .apply(clean.view(), &mut seeded_rng(4))
            .unwrap();
        for (a, b) in noisy.iter().zip(clean.iter()) {
            assert!(a.abs_diff(*b) <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn black_image_stays_black() {
        let clean = uniform_image(8, 8, 4, 0);
        let noisy = model(5.0, 3.0, 10.0)
            .apply(clean.view(), &mut seeded_rng(6))
            .unwrap();
        assert!(noisy.iter().all(|&v| v == 0));
    }

    #[test]
    fn constant_gain_with_zero_sigma() {
        // x + x * 1.0 * 0.5 = 1.5x
        let clean = uniform_image(2, 2, 3, 100);
        let noisy = model(0.5, 1.0, 0.0)
            .apply(clean.view(), &mut seeded_rng(0))
            .unwrap();
        assert!(noisy.iter().all(|&v| v == 150));
    }

    #[test]
    fn saturates_high() {
        let clean = uniform_image(2, 2, 3, 200);
        let noisy = model(1.0, 10.0, 0.0)
            .apply(clean.view(), &mut seeded_rng(0))
            .unwrap();
        assert!(noisy.iter().all(|&v| v == 255));
    }

    #[test]
    fn saturates_low() {
        let clean = uniform_image(2, 2, 3, 200);
        let noisy = model(1.0, -2.0, 0.0)
            .apply(clean.view(), &mut seeded_rng(0))
            .unwrap();
        assert!(noisy.iter().all(|&v| v == 0));
    }

    #[test]
    fn large_noise_hits_both_bounds() {
        let clean = uniform_image(16, 16, 3, 128);
        let noisy = model(10.0, 0.0, 1.0)
            .apply(clean.view(), &mut seeded_rng(12))
            .unwrap();
        assert!(noisy.iter().any(|&v| v == 0));
        assert!(noisy.iter().any(|&v| v == 255));
    }

    #[test]
    fn noise_scales_with_signal() {
        let m = SpeckleNoiseModel::default();
        let dark = m
            .apply(uniform_image(32, 32, 3, 20).view(), &mut seeded_rng(1))
            .unwrap();
        let bright = m
            .apply(uniform_image(32, 32, 3, 200).view(), &mut seeded_rng(1))
            .unwrap();
        assert!(std_dev(&bright) > 4.0 * std_dev(&dark));
    }

    #[test]
    fn preserves_shape_and_input() {
        let clean = gradient_image(5, 7, 4);
        let before = clean.clone();
        let noisy = SpeckleNoiseModel::default()
            .apply(clean.view(), &mut seeded_rng(9))
            .unwrap();
        assert_eq!(noisy.shape(), clean.shape());
        assert_eq!(clean, before);
    }

    #[test]
    fn deterministic_with_same_seed() {
        let clean = gradient_image(10, 10, 3);
        let m = SpeckleNoiseModel::default();
        let a = m.apply(clean.view(), &mut seeded_rng(77)).unwrap();
        let b = m.apply(clean.view(), &mut seeded_rng(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_single_channel_image() {
        let mono = Image::zeros(vec![4, 4, 1]);
        assert_eq!(
            SpeckleNoiseModel::default().apply(mono.view(), &mut seeded_rng(0)),
            Err(NoiseError::InvalidImage(ImageError::UnsupportedChannels(1)))
        );
    }
}
