use crate::error::*;
use tracing::{error, info};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::TwitterApi(e) => {
                error!("Twitter API error details: {:?}", e);
            }
            CoreError::Storage(e) => {
                error!("Storage error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::TwitterApi(e) => e.user_friendly_message(),
            CoreError::Storage(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::Serialization(_) => "Tweet data could not be encoded or decoded.".to_string(),
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::TwitterApi(_) => "TWITTER_API".to_string(),
            CoreError::Storage(_) => "STORAGE".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }
}

impl ErrorExt for TwitterApiError {
    fn log_error(&self) -> &Self {
        error!("TwitterApiError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            TwitterApiError::AuthenticationFailed { reason } => format!(
                "Twitter authentication failed ({}). Please check your credentials.",
                reason
            ),
            TwitterApiError::InvalidToken => {
                "Twitter rejected the configured credentials. Please regenerate them.".to_string()
            }
            TwitterApiError::Forbidden { resource } => format!(
                "Access denied to {}. Your app may lack the required access level.",
                resource
            ),
            TwitterApiError::RateLimitExceeded { retry_after } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                retry_after
            ),
            TwitterApiError::RequestTimeout => {
                "Request to Twitter timed out. Please try again.".to_string()
            }
            _ => "Twitter API error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            TwitterApiError::AuthenticationFailed { .. } => "TWITTER_AUTH_FAILED".to_string(),
            TwitterApiError::InvalidToken => "TWITTER_INVALID_TOKEN".to_string(),
            TwitterApiError::Forbidden { .. } => "TWITTER_FORBIDDEN".to_string(),
            TwitterApiError::RateLimitExceeded { .. } => "TWITTER_RATE_LIMIT".to_string(),
            TwitterApiError::RequestTimeout => "TWITTER_TIMEOUT".to_string(),
            TwitterApiError::InvalidResponse { .. } => "TWITTER_INVALID_RESPONSE".to_string(),
            TwitterApiError::ServerError { .. } => "TWITTER_SERVER_ERROR".to_string(),
        }
    }
}

impl ErrorExt for StorageError {
    fn log_error(&self) -> &Self {
        error!("StorageError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            StorageError::CreateDirectory { path, .. } => {
                format!("Could not create the data directory '{}'.", path)
            }
            StorageError::Write { path, .. } => {
                format!("Could not save tweets to '{}'.", path)
            }
            StorageError::Read { path, .. } => {
                format!("Could not read tweets from '{}'.", path)
            }
            StorageError::Malformed { path, .. } => {
                format!("'{}' does not contain a valid tweet list.", path)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            StorageError::CreateDirectory { .. } => "STORAGE_CREATE_DIR_FAILED".to_string(),
            StorageError::Write { .. } => "STORAGE_WRITE_FAILED".to_string(),
            StorageError::Read { .. } => "STORAGE_READ_FAILED".to_string(),
            StorageError::Malformed { .. } => "STORAGE_MALFORMED".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
        }
    }
}

/// Reports a fatal error: full details go to the log, a one-line summary to the user.
#[derive(Debug, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
    }

    /// `[CODE/NESTED_CODE] message`, or `[CODE] message` for errors without a nested code.
    pub fn summary(&self, error: &CoreError) -> String {
        let nested = match error {
            CoreError::TwitterApi(e) => Some(e.error_code()),
            CoreError::Storage(e) => Some(e.error_code()),
            CoreError::Config(e) => Some(e.error_code()),
            _ => None,
        };
        match nested {
            Some(code) => format!(
                "[{}/{}] {}",
                error.error_code(),
                code,
                error.user_friendly_message()
            ),
            None => format!("[{}] {}", error.error_code(), error.user_friendly_message()),
        }
    }
}
