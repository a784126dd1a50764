use camsim_core::sensor::SensorType;
use thiserror::Error;

/// Errors raised by noise model registration, construction and application.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("Noise model already registered: {0}")]
    DuplicateRegistration(String),

    #[error("Unknown noise model: {0}")]
    UnknownModel(String),

    #[error("Invalid configuration for {model}: {message}")]
    InvalidConfiguration { model: String, message: String },

    #[error("Noise model {model} cannot be attached to a {sensor_type} sensor")]
    IncompatibleSensorType {
        model: String,
        sensor_type: SensorType,
    },

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] ImageError),
}

impl NoiseError {
    pub(crate) fn invalid_config(model: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            model: model.to_owned(),
            message: message.into(),
        }
    }
}

/// Shape problems detected before a transform touches any pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("expected a rank-{expected} array, got rank {got}")]
    UnexpectedRank { expected: usize, got: usize },

    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("image has no elements")]
    Empty,

    #[error("buffer holds {got} samples but the shape needs {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_error_from_image_error() {
        let err: NoiseError = ImageError::Empty.into();
        assert!(matches!(err, NoiseError::InvalidImage(ImageError::Empty)));
    }

    #[test]
    fn image_error_is_copy() {
        let err = ImageError::UnsupportedChannels(2);
        let err2 = err;
        assert_eq!(err, err2);
    }

    #[test]
    fn noise_error_display_messages() {
        assert_eq!(
            NoiseError::DuplicateRegistration("SpeckleNoiseModel".into()).to_string(),
            "Noise model already registered: SpeckleNoiseModel"
        );
        assert_eq!(
            NoiseError::UnknownModel("GaussianNoiseModel".into()).to_string(),
            "Unknown noise model: GaussianNoiseModel"
        );
        assert_eq!(
            NoiseError::invalid_config("SaltAndPepperNoiseModel", "amount must be in [0, 1]")
                .to_string(),
            "Invalid configuration for SaltAndPepperNoiseModel: amount must be in [0, 1]"
        );
        assert_eq!(
            NoiseError::IncompatibleSensorType {
                model: "SpeckleNoiseModel".into(),
                sensor_type: SensorType::Depth,
            }
            .to_string(),
            "Noise model SpeckleNoiseModel cannot be attached to a depth sensor"
        );
        assert_eq!(
            NoiseError::from(ImageError::UnexpectedRank {
                expected: 3,
                got: 2
            })
            .to_string(),
            "Invalid image: expected a rank-3 array, got rank 2"
        );
        assert_eq!(
            ImageError::LengthMismatch {
                expected: 12,
                got: 10
            }
            .to_string(),
            "buffer holds 10 samples but the shape needs 12"
        );
    }
}
