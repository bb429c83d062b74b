use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("no valid assignment found after {attempts} attempt(s)")]
    Unsatisfiable { attempts: usize },

    #[error("Assignment processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Generation,
    Io,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SantaError::ConfigError { .. }
            | SantaError::ConfigValidationError { .. }
            | SantaError::InvalidConfigValueError { .. }
            | SantaError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SantaError::InvalidInput { .. } => ErrorCategory::Input,
            SantaError::Unsatisfiable { .. } => ErrorCategory::Generation,
            SantaError::IoError(_) => ErrorCategory::Io,
            SantaError::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SantaError::IoError(e) => format!("A file operation failed: {}", e),
            SantaError::ConfigError { message } => {
                format!("The configuration file could not be read: {}", message)
            }
            SantaError::ConfigValidationError { field, message } => {
                format!("The configuration field '{}' is invalid: {}", field, message)
            }
            SantaError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
            SantaError::MissingConfigError { field } => {
                format!("The configuration field '{}' is required but missing", field)
            }
            SantaError::InvalidInput { message } => {
                format!("The participant data is not usable: {}", message)
            }
            SantaError::Unsatisfiable { attempts } => format!(
                "No valid gift assignment could be found after {} attempt(s)",
                attempts
            ),
            SantaError::ProcessingError { message } => {
                format!("Internal error while processing the assignment: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file against the expected layout".to_string()
            }
            ErrorCategory::Input => {
                "Make sure at least two participants are listed and every excluded name is also a participant"
                    .to_string()
            }
            ErrorCategory::Generation => {
                "Relax some exclusions, or re-run for another random attempt".to_string()
            }
            ErrorCategory::Io => "Check file permissions and paths".to_string(),
            ErrorCategory::Internal => "This is a bug, please report it".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
