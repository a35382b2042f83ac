use tweetpulse_core::{
    ConfigError, CoreError, ErrorExt, ErrorReporter, StorageError, TwitterApiError,
};

#[test]
fn test_error_codes() {
    let twitter_error = CoreError::TwitterApi(TwitterApiError::InvalidToken);
    assert_eq!(twitter_error.error_code(), "TWITTER_API");

    let storage_error = CoreError::Storage(StorageError::Write {
        path: "data/tweets.json".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
    });
    assert_eq!(storage_error.error_code(), "STORAGE");

    let config_error = CoreError::Config(ConfigError::InvalidValue {
        field: "TWITTER_WAIT_ON_RATE_LIMIT".to_string(),
        value: "maybe".to_string(),
    });
    assert_eq!(config_error.error_code(), "CONFIG");

    let serialization_error =
        CoreError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
    assert_eq!(serialization_error.error_code(), "SERIALIZATION");
}

#[test]
fn test_nested_error_codes() {
    assert_eq!(
        TwitterApiError::RateLimitExceeded { retry_after: 900 }.error_code(),
        "TWITTER_RATE_LIMIT"
    );
    assert_eq!(
        TwitterApiError::AuthenticationFailed {
            reason: "TWITTER_API_KEY is not set".to_string()
        }
        .error_code(),
        "TWITTER_AUTH_FAILED"
    );
    assert_eq!(
        ConfigError::InvalidValue {
            field: "TWITTER_WAIT_ON_RATE_LIMIT".to_string(),
            value: "maybe".to_string(),
        }
        .error_code(),
        "CONFIG_INVALID_VALUE"
    );
}

#[test]
fn test_user_friendly_messages() {
    let twitter_error = CoreError::TwitterApi(TwitterApiError::AuthenticationFailed {
        reason: "TWITTER_ACCESS_SECRET is not set".to_string(),
    });
    let message = twitter_error.user_friendly_message();
    assert!(message.contains("TWITTER_ACCESS_SECRET"));
    assert!(message.contains("check your credentials"));

    let storage_error = CoreError::Storage(StorageError::Read {
        path: "data/tweets.json".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    });
    let message = storage_error.user_friendly_message();
    assert!(message.contains("data/tweets.json"));
}

#[test]
fn test_storage_error_keeps_source() {
    let error = StorageError::CreateDirectory {
        path: "data".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    let source = std::error::Error::source(&error).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("denied"));
    assert!(error.to_string().contains("data"));
}

#[test]
fn test_error_reporter_summary() {
    let reporter = ErrorReporter::new();

    let error = CoreError::TwitterApi(TwitterApiError::RateLimitExceeded { retry_after: 42 });
    reporter.report_error(&error);
    assert_eq!(
        reporter.summary(&error),
        "[TWITTER_API/TWITTER_RATE_LIMIT] Too many requests. Please wait 42 seconds before trying again."
    );

    let error = CoreError::InvalidInput {
        message: "bad endpoint".to_string(),
    };
    assert_eq!(
        reporter.summary(&error),
        "[INVALID_INPUT] Invalid input: bad endpoint"
    );
}
