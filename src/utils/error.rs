use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::ApiError(_) => ErrorCategory::Network,
            GatewayError::IoError(_)
            | GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. }
            | GatewayError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GatewayError::ValidationError { .. } => ErrorCategory::Input,
            GatewayError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常可以重試
            GatewayError::ApiError(_) => ErrorSeverity::Medium,
            GatewayError::ValidationError { .. } => ErrorSeverity::High,
            GatewayError::SerializationError(_) => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GatewayError::ApiError(e) if e.is_timeout() => {
                "The Mollie API did not answer in time; raise gateway.timeout_seconds or try again"
                    .to_string()
            }
            GatewayError::ApiError(_) => {
                "Check network connectivity and gateway.base_url, then try again".to_string()
            }
            GatewayError::IoError(_) => {
                "Check that the config file exists and is readable".to_string()
            }
            GatewayError::SerializationError(_) => {
                "The request or response could not be encoded as JSON; check metadata values"
                    .to_string()
            }
            GatewayError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or environment", field)
            }
            GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            GatewayError::ValidationError { .. } => {
                "Correct the command arguments and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the payment provider: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
