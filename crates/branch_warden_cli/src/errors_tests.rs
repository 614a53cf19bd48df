use super::*;
use github_client::Error as GitHubError;

#[test]
fn test_config_error_display() {
    let error = Error::Config("unknown field `token`".to_string());
    assert_eq!(error.to_string(), "Configuration error: unknown field `token`");
}

#[test]
fn test_missing_setting_display() {
    assert_eq!(Error::MissingSetting("user").to_string(), "user is required");
    assert_eq!(Error::MissingSetting("token").to_string(), "token is required");
    assert_eq!(Error::MissingSetting("org").to_string(), "org is required");
}

#[test]
fn test_load_file_error_display() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let error = Error::LoadFile(io_error);
    assert_eq!(error.to_string(), "Failed to load file.");
}

#[test]
fn test_scan_error_passes_message_through() {
    let error = Error::from(ScanError::List {
        organization: "acme".to_string(),
        source: GitHubError::RateLimitExceeded,
    });
    assert_eq!(
        error.to_string(),
        "failed to list repositories for organization 'acme': Rate limit exceeded"
    );
}

#[test]
fn test_exit_codes() {
    let scan = Error::from(ScanError::List {
        organization: "acme".to_string(),
        source: GitHubError::NotFound,
    });
    assert_eq!(scan.exit_code(), EXIT_SCAN_FAILED);
    assert_eq!(Error::MissingSetting("org").exit_code(), EXIT_INVALID_CONFIGURATION);
    assert_eq!(
        Error::from(GitHubError::AuthError("bad url".to_string())).exit_code(),
        EXIT_INVALID_CONFIGURATION
    );
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
