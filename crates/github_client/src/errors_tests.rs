use super::*;
use std::error::Error as StdError;

#[test]
fn test_api_error() {
    let error = Error::ApiError {
        status: 422,
        message: "Validation Failed".to_string(),
    };

    // Test error message
    assert_eq!(
        error.to_string(),
        "GitHub API request failed with status 422: Validation Failed"
    );

    // Test error source
    assert!(error.source().is_none());
}

#[test]
fn test_auth_error() {
    let error = Error::AuthError("Invalid credentials".to_string());

    assert_eq!(
        error.to_string(),
        "Failed to authenticate or initialize GitHub client: Invalid credentials"
    );
    assert!(error.source().is_none());
}

#[test]
fn test_deserialization_error_has_source() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error = Error::from(json_error);

    assert!(error
        .to_string()
        .starts_with("Failed to deserialize GitHub response:"));
    assert!(error.source().is_some());
}

#[test]
fn test_not_found_error() {
    let error = Error::NotFound;

    assert_eq!(error.to_string(), "Resource not found");
    assert!(error.is_not_found());
}

#[test]
fn test_rate_limit_exceeded_error() {
    let error = Error::RateLimitExceeded;

    assert_eq!(error.to_string(), "Rate limit exceeded");
    assert!(!error.is_not_found());
}

#[test]
fn test_transport_error_is_not_not_found() {
    let error = Error::Transport("connection refused".to_string());

    assert_eq!(error.to_string(), "Failed to reach GitHub: connection refused");
    assert!(!error.is_not_found());
}

#[test]
fn test_error_is_send_sync() {
    // This test verifies that Error implements Send and Sync traits
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
