//! Impulsive salt-and-pepper noise.
//!
//! A fraction `amount` of all samples is overwritten with an extreme value:
//! `s_vs_p` of those become [`SAMPLE_MAX`] ("salt"), the rest
//! [`SAMPLE_MIN`] ("pepper"). Coordinates are drawn independently and
//! uniformly per axis, with replacement, so one sample can be hit more than
//! once; the later write wins and pepper is written after salt.

use camsim_core::sensor::SensorType;
use rand::RngCore;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::image::{Image, ImageView, SAMPLE_MAX, SAMPLE_MIN, ensure_color};
use crate::model::{NoiseModelFactory, SensorNoiseModel, check_range, config_from_kwargs};

// ---------------------------------------------------------------------------
// SaltAndPepperConfig
// ---------------------------------------------------------------------------

/// Parameters of [`SaltAndPepperNoiseModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaltAndPepperConfig {
    /// Fraction of corrupted samples that are salt rather than pepper, in
    /// `[0, 1]` (default: 0.5).
    pub s_vs_p: f64,
    /// Fraction of all samples that are corrupted, in `[0, 1]` (default: 0.05).
    pub amount: f64,
}

impl Default for SaltAndPepperConfig {
    fn default() -> Self {
        Self {
            s_vs_p: 0.5,
            amount: 0.05,
        }
    }
}

impl SaltAndPepperConfig {
    /// Check that both fractions lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<(), NoiseError> {
        let name = SaltAndPepperNoiseModel::NAME;
        check_range(name, "s_vs_p", self.s_vs_p, 0.0, 1.0)?;
        check_range(name, "amount", self.amount, 0.0, 1.0)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SaltAndPepperNoiseModel
// ---------------------------------------------------------------------------

/// Salt-and-pepper noise for color sensors.
///
/// # Example
///
/// ```
/// use camsim_noise::prelude::*;
/// use ndarray::ArrayD;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let model = SaltAndPepperNoiseModel::new(SaltAndPepperConfig {
///     s_vs_p: 1.0,
///     amount: 0.1,
/// })
/// .unwrap();
///
/// let clean = ArrayD::<u8>::from_elem(vec![8, 8, 3], 100);
/// let noisy = model.apply(clean.view(), &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
/// assert!(noisy.iter().all(|&v| v == 100 || v == 255));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaltAndPepperNoiseModel {
    config: SaltAndPepperConfig,
}

impl SaltAndPepperNoiseModel {
    /// Create a model from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidConfiguration`] if `s_vs_p` or `amount` is
    /// outside `[0, 1]` or not finite.
    pub fn new(config: SaltAndPepperConfig) -> Result<Self, NoiseError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The model's configuration.
    pub const fn config(&self) -> &SaltAndPepperConfig {
        &self.config
    }

    /// Number of samples set to salt for an image of `len` samples.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn salt_count(&self, len: usize) -> usize {
        (self.config.amount * len as f64 * self.config.s_vs_p).ceil() as usize
    }

    /// Number of samples set to pepper for an image of `len` samples.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn pepper_count(&self, len: usize) -> usize {
        (self.config.amount * len as f64 * (1.0 - self.config.s_vs_p)).ceil() as usize
    }
}

impl Default for SaltAndPepperNoiseModel {
    fn default() -> Self {
        Self {
            config: SaltAndPepperConfig::default(),
        }
    }
}

/// Overwrite `count` uniformly drawn coordinates of `image` with `value`.
fn scatter(image: &mut Image, count: usize, value: u8, rng: &mut dyn RngCore) {
    if count == 0 {
        return;
    }
    let axes: Vec<Uniform<usize>> = image
        .shape()
        .iter()
        .map(|&len| Uniform::new(0, len))
        .collect();
    let mut index = vec![0_usize; image.ndim()];
    for _ in 0..count {
        for (slot, axis) in index.iter_mut().zip(&axes) {
            *slot = axis.sample(rng);
        }
        image[index.as_slice()] = value;
    }
}

impl SensorNoiseModel for SaltAndPepperNoiseModel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_valid_sensor_type(&self, sensor_type: SensorType) -> bool {
        Self::supports(sensor_type)
    }

    fn apply(&self, image: ImageView<'_>, rng: &mut dyn RngCore) -> Result<Image, NoiseError> {
        ensure_color(&image)?;

        let len = image.len();
        let mut noisy = image.to_owned();
        scatter(&mut noisy, self.salt_count(len), SAMPLE_MAX, rng);
        scatter(&mut noisy, self.pepper_count(len), SAMPLE_MIN, rng);
        Ok(noisy)
    }
}

impl NoiseModelFactory for SaltAndPepperNoiseModel {
    const NAME: &'static str = "SaltAndPepperNoiseModel";

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

    fn model(s_vs_p: f64, amount: f64) -> SaltAndPepperNoiseModel {
        SaltAndPepperNoiseModel::new(SaltAndPepperConfig { s_vs_p, amount }).unwrap()
    }

    fn count_eq(image: &Image, value: u8) -> usize {
        image.iter().filter(|&&v| v == value).count()
    }

    // -- Configuration --

    #[test]
    fn default_config() {
        let config = SaltAndPepperNoiseModel::default().config;
        assert!((config.s_vs_p - 0.5).abs() < f64::EPSILON);
        assert!((config.amount - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_amount() {
        let err = SaltAndPepperNoiseModel::new(SaltAndPepperConfig {
            s_vs_p: 0.5,
            amount: 1.5,
        })
        .unwrap_err();
        assert!(matches!(err, NoiseError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn rejects_negative_s_vs_p() {
        let err = SaltAndPepperNoiseModel::new(SaltAndPepperConfig {
            s_vs_p: -0.1,
            amount: 0.1,
        })
        .unwrap_err();
        assert!(err.to_string().contains("s_vs_p"));
    }

    #[test]
    fn rejects_nan() {
        assert!(
            SaltAndPepperNoiseModel::new(SaltAndPepperConfig {
                s_vs_p: f64::NAN,
                amount: 0.1,
            })
            .is_err()
        );
    }

    #[test]
    fn from_kwargs_partial() {
        let kwargs: toml::Table = toml::from_str("amount = 0.2").unwrap();
        let m = SaltAndPepperNoiseModel::from_kwargs(&kwargs).unwrap();
        assert!((m.config().amount - 0.2).abs() < f64::EPSILON);
        assert!((m.config().s_vs_p - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn from_kwargs_rejects_unknown_key() {
        let kwargs: toml::Table = toml::from_str("ammount = 0.2").unwrap();
        assert!(matches!(
            SaltAndPepperNoiseModel::from_kwargs(&kwargs),
            Err(NoiseError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn from_kwargs_validates_range() {
        let kwargs: toml::Table = toml::from_str("s_vs_p = 2").unwrap();
        assert!(SaltAndPepperNoiseModel::from_kwargs(&kwargs).is_err());
    }

    // -- Counts --

    #[test]
    fn counts_round_up() {
        let m = model(0.5, 0.05);
        // 0.05 * 48 * 0.5 = 1.2 -> 2
        assert_eq!(m.salt_count(48), 2);
        assert_eq!(m.pepper_count(48), 2);
    }

    #[test]
    fn counts_for_pure_salt() {
        let m = model(1.0, 1.0);
        assert_eq!(m.salt_count(48), 48);
        assert_eq!(m.pepper_count(48), 0);
    }

    // -- Sensor gate --

    #[test]
    fn only_color_sensors() {
        let m = SaltAndPepperNoiseModel::default();
        assert!(m.is_valid_sensor_type(SensorType::Color));
        assert!(!m.is_valid_sensor_type(SensorType::Depth));
        assert!(!SaltAndPepperNoiseModel::supports(SensorType::Semantic));
    }

    // -- Transform --

    #[test]
    fn zero_amount_is_identity() {
        let clean = gradient_image(6, 5, 3);
        let noisy = model(0.5, 0.0)
            .apply(clean.view(), &mut seeded_rng(3))
            .unwrap();
        assert_eq!(noisy, clean);
    }

    #[test]
    fn preserves_shape_and_input() {
        let clean = gradient_image(7, 9, 4);
        let before = clean.clone();
        let noisy = SaltAndPepperNoiseModel::default()
            .apply(clean.view(), &mut seeded_rng(5))
            .unwrap();
        assert_eq!(noisy.shape(), clean.shape());
        assert_eq!(clean, before);
    }

    #[test]
    fn extreme_counts_are_bounded() {
        let clean = uniform_image(16, 16, 3, 127);
        let m = SaltAndPepperNoiseModel::default();
        let noisy = m.apply(clean.view(), &mut seeded_rng(11)).unwrap();
        let len = clean.len();
        assert!(count_eq(&noisy, 255) <= m.salt_count(len));
        assert!(count_eq(&noisy, 0) <= m.pepper_count(len));
        assert!(count_eq(&noisy, 255) > 0);
        assert!(count_eq(&noisy, 0) > 0);
    }

    #[test]
    fn only_extremes_are_written() {
        let clean = uniform_image(16, 16, 3, 90);
        let noisy = model(0.3, 0.5)
            .apply(clean.view(), &mut seeded_rng(2))
            .unwrap();
        assert!(noisy.iter().all(|&v| v == 90 || v == 0 || v == 255));
    }

    #[test]
    fn full_salt_saturates_most_samples() {
        let clean = uniform_image(4, 4, 3, 127);
        let noisy = model(1.0, 1.0)
            .apply(clean.view(), &mut seeded_rng(42))
            .unwrap();
        // 48 draws with replacement over 48 samples leave ~1/e untouched.
        let salted = count_eq(&noisy, 255);
        assert!(salted >= 20, "only {salted} of 48 salted");
        assert!(noisy.iter().all(|&v| v == 127 || v == 255));
    }

    #[test]
    fn full_pepper_darkens_most_samples() {
        let clean = uniform_image(4, 4, 3, 127);
        let noisy = model(0.0, 1.0)
            .apply(clean.view(), &mut seeded_rng(42))
            .unwrap();
        let peppered = count_eq(&noisy, 0);
        assert!(peppered >= 20, "only {peppered} of 48 peppered");
        assert!(noisy.iter().all(|&v| v == 127 || v == 0));
    }

    #[test]
    fn every_axis_position_is_reachable() {
        let clean = uniform_image(3, 3, 3, 127);
        let noisy = model(1.0, 1.0)
            .apply(clean.view(), &mut seeded_rng(8))
            .unwrap();
        for axis in 0..3 {
            let last = clean.shape()[axis] - 1;
            let hit = noisy
                .indexed_iter()
                .any(|(idx, &v)| v == 255 && idx[axis] == last);
            assert!(hit, "last index of axis {axis} never sampled");
        }
    }

    #[test]
    fn deterministic_with_same_seed() {
        let clean = gradient_image(10, 10, 3);
        let m = SaltAndPepperNoiseModel::default();
        let a = m.apply(clean.view(), &mut seeded_rng(99)).unwrap();
        let b = m.apply(clean.view(), &mut seeded_rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_depth_shaped_image() {
        let depth = Image::zeros(vec![4, 4]);
        let err = SaltAndPepperNoiseModel::default()
            .apply(depth.view(), &mut seeded_rng(0))
            .unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidImage(ImageError::UnexpectedRank { .. })
        ));
    }

    #[test]
    fn rejects_empty_image() {
        let empty = Image::zeros(vec![0, 0, 3]);
        assert_eq!(
            SaltAndPepperNoiseModel::default().apply(empty.view(), &mut seeded_rng(0)),
            Err(NoiseError::InvalidImage(ImageError::Empty))
        );
    }
}
