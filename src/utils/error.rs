use thiserror::Error;

/// Failures produced while validating a single card number.
///
/// The HTTP adapter maps each variant one-to-one onto a status code and a
/// `{"error": ...}` body; the core never produces anything else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("Card number is required")]
    MissingInput,

    #[error("{reason}")]
    InvalidFormat { reason: String },

    #[error("An error occurred: {message}")]
    Internal { message: String },
}

impl CardError {
    pub const DIGITS_ONLY: &'static str = "Card number must contain only digits";
    pub const LENGTH_RANGE: &'static str = "Card number must be between 13 and 19 digits";

    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingInput | Self::InvalidFormat { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Startup and configuration failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration ({field}): {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to bind {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AppError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax".to_string()
            }
            AppError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the config file or on the command line", field)
            }
            AppError::BindError { .. } => {
                "Make sure the port is free or choose another one with --port".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
