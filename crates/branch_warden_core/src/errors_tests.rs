use super::*;
use std::error::Error as StdError;

#[test]
fn test_missing_default_branch_display() {
    let error = ReconcileError::MissingDefaultBranch {
        repository: RepositoryId::new("my-org", "empty"),
    };

    assert_eq!(error.to_string(), "no default branch");
    assert!(error.source().is_none());
}

#[test]
fn test_fetch_error_keeps_source() {
    let error = ReconcileError::Fetch(GitHubError::Transport("connection reset".to_string()));

    assert_eq!(
        error.to_string(),
        "failed to fetch branch protection: Failed to reach GitHub: connection reset"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_update_error_display() {
    let error = ReconcileError::Update(GitHubError::ApiError {
        status: 422,
        message: "Validation Failed".to_string(),
    });

    assert_eq!(
        error.to_string(),
        "failed to update branch protection: GitHub API request failed with status 422: Validation Failed"
    );
}

#[test]
fn test_list_error_display() {
    let error = ScanError::List {
        organization: "my-org".to_string(),
        source: GitHubError::RateLimitExceeded,
    };

    assert_eq!(
        error.to_string(),
        "failed to list repositories for organization 'my-org': Rate limit exceeded"
    );
    assert!(error.source().is_some());
}

#[test]
fn test_repository_failures_render_one_line_per_repository() {
    let mut failures = RepositoryFailures::new();
    failures.insert(
        &Repository::new("my-org", "beta", true, None),
        ReconcileError::MissingDefaultBranch {
            repository: RepositoryId::new("my-org", "beta"),
        },
    );
    failures.insert(
        &Repository::new("my-org", "alpha", true, Some("main")),
        ReconcileError::Update(GitHubError::RateLimitExceeded),
    );

    let rendered = ScanError::Repositories(failures).to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines.contains(&"repo [my-org/beta] err: no default branch"));
    assert!(lines.contains(
        &"repo [my-org/alpha] err: failed to update branch protection: Rate limit exceeded"
    ));
}

#[test]
fn test_repository_failures_keyed_by_identifier() {
    let mut failures = RepositoryFailures::new();
    let first_snapshot = Repository::new("my-org", "service", true, Some("main"));
    let second_snapshot = Repository::new("my-org", "service", true, Some("develop"));

    failures.insert(
        &first_snapshot,
        ReconcileError::Fetch(GitHubError::RateLimitExceeded),
    );
    failures.insert(
        &second_snapshot,
        ReconcileError::Update(GitHubError::RateLimitExceeded),
    );

    assert_eq!(failures.len(), 1);
    let failure = failures
        .get(&RepositoryId::new("my-org", "service"))
        .expect("failure recorded");
    assert!(matches!(failure.error, ReconcileError::Update(_)));
}

#[test]
fn test_empty_repository_failures() {
    let failures = RepositoryFailures::new();

    assert!(failures.is_empty());
    assert_eq!(failures.to_string(), "");
}

#[test]
fn test_errors_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReconcileError>();
    assert_send_sync::<ScanError>();
}
