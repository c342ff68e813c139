use thiserror::Error;

#[derive(Error, Debug)]
pub enum PunchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed geo-fence for location '{location}': {reason}")]
    FenceFormatError { location: String, reason: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FenceData,
    Request,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PunchError::ConfigError { .. }
            | PunchError::ConfigValidationError { .. }
            | PunchError::InvalidConfigValueError { .. }
            | PunchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PunchError::FenceFormatError { .. } => ErrorCategory::FenceData,
            PunchError::ValidationError { .. } => ErrorCategory::Request,
            PunchError::IoError(_)
            | PunchError::SerializationError(_)
            | PunchError::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::FenceData => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PunchError::IoError(_) => "Check that the data directories exist and are writable",
            PunchError::SerializationError(_) => {
                "Check that the location and attendance files contain valid JSON"
            }
            PunchError::ConfigError { .. } | PunchError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            PunchError::InvalidConfigValueError { .. } => {
                "Correct the highlighted configuration value"
            }
            PunchError::MissingConfigError { .. } => "Add the missing field to the configuration",
            PunchError::FenceFormatError { .. } => {
                "Each fence ring needs at least 3 [longitude, latitude] positions"
            }
            PunchError::ValidationError { .. } => "Resubmit the punch with valid fields",
            PunchError::StorageError { .. } => "Retry once the storage backend is reachable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PunchError::FenceFormatError { location, .. } => {
                format!("Office location '{}' has an invalid boundary", location)
            }
            PunchError::ValidationError { message } => message.clone(),
            other => match other.category() {
                ErrorCategory::Configuration => format!("Configuration problem: {}", other),
                _ => "Server error".to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, PunchError>;
