use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepairoError {
    #[error("Roster request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Roster error: {message}")]
    RosterError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Bad input from the operator; fix the config and rerun.
    Config,
    /// Transient; the roster source may recover on retry.
    Retryable,
    /// Processing or output failure.
    Fatal,
}

impl RepairoError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RepairoError::ConfigValidationError { .. }
            | RepairoError::InvalidConfigValueError { .. }
            | RepairoError::MissingConfigError { .. } => ErrorSeverity::Config,
            RepairoError::HttpError(_) => ErrorSeverity::Retryable,
            RepairoError::CsvError(_)
            | RepairoError::IoError(_)
            | RepairoError::SerializationError(_)
            | RepairoError::RosterError { .. }
            | RepairoError::ProcessingError { .. } => ErrorSeverity::Fatal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RepairoError::HttpError(_) => {
                "Could not reach the provider directory. Check the roster endpoint and your network connection.".to_string()
            }
            RepairoError::RosterError { message } => {
                format!("The provider roster could not be loaded: {}", message)
            }
            RepairoError::ConfigValidationError { .. }
            | RepairoError::InvalidConfigValueError { .. }
            | RepairoError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.severity() {
            ErrorSeverity::Config => "Fix the reported configuration field and run again",
            ErrorSeverity::Retryable => "Retry in a moment, or switch to a file or seed roster",
            ErrorSeverity::Fatal => "Check the output path is writable and the roster data is well-formed",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepairoError>;
