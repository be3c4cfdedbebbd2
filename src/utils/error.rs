use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No analysis received")]
    MissingContent,
}

impl ScanError {
    /// Exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::ConfigError { .. }
            | ScanError::InvalidConfigValueError { .. }
            | ScanError::MissingConfigError { .. } => 1,
            _ => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScanError::IoError(e) => format!("Could not read or write a file: {}", e),
            ScanError::SerializationError(e) => format!("Response is not valid JSON: {}", e),
            ScanError::CsvError(e) => format!("Could not write the CSV summary: {}", e),
            ScanError::ConfigError { message } => format!("Configuration problem: {}", message),
            ScanError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ScanError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            ScanError::MissingContent => {
                "The completion did not contain any message content".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
