use std::error::Error;

/// Base trait for errors surfaced by the desktop crate.
pub trait DeskError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling (also forwarded to the webview).
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at '{path}'")]
    NotFound { path: String },

    #[error("Failed to parse config file: {message}")]
    Parse { message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("IO error reading config: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DeskError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::Parse { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::Invalid { .. } => "CONFIG_INVALID",
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write preference store: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to serialize preference value: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

impl DeskError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "STORE_IO_ERROR",
            StoreError::Serialize { .. } => "STORE_SERIALIZE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Invalid {
            message: "windows.min_width must not exceed windows.default_width".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: windows.min_width must not exceed windows.default_width"
        );
        assert_eq!(error.error_code(), "CONFIG_INVALID");
    }

    #[test]
    fn test_io_errors_keep_their_source() {
        let error: ConfigError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(error.source().is_some());
        assert_eq!(error.error_code(), "CONFIG_IO_ERROR");

        let error: StoreError =
            std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(error.error_code(), "STORE_IO_ERROR");
    }
}
