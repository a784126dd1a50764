use thiserror::Error;

/// Errors raised while loading or validating a sensor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Duplicate sensor uuid: {0}")]
    DuplicateSensor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("seed = ").unwrap_err();
        let config_err: ConfigError = toml_err.into();
        assert!(matches!(config_err, ConfigError::Toml(_)));
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::MissingField("uuid".into()).to_string(),
            "Missing required field: uuid"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "resolution".into(),
                message: "must be non-zero".into()
            }
            .to_string(),
            "Invalid value for resolution: must be non-zero"
        );
        assert_eq!(
            ConfigError::DuplicateSensor("rgb".into()).to_string(),
            "Duplicate sensor uuid: rgb"
        );
    }
}
