//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. The variants are chosen so that callers can tell a
//! missing resource apart from every other failure without inspecting HTTP responses.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{BranchProtectionClient, Error};
///
/// match client.get_branch_protection("my-org", "my-repo", "main").await {
///     Ok(protection) => println!("Protected: {:?}", protection.enforce_admins),
///     Err(Error::NotFound) => println!("Branch is not protected"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered the request with a non-success status.
    ///
    /// The status code and the `message` field of GitHub's error body are kept so that
    /// operators can triage failures (validation errors, missing permissions, ...)
    /// from the log output alone.
    #[error("GitHub API request failed with status {status}: {message}")]
    ApiError {
        /// HTTP status code returned by GitHub
        status: u16,
        /// Error message returned by GitHub
        message: String,
    },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when the client cannot be built from the provided
    /// credentials or API address.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    ///
    /// This error occurs when the GitHub API returns a response that cannot be
    /// parsed into the expected data structure.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code. For the
    /// branch protection endpoint this means the branch has no protection configured.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// Requests are not retried by the client; the next scan cycle picks the work up again.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The request never produced a GitHub response.
    ///
    /// Covers connection failures, timeouts, invalid URIs and unreadable bodies. No
    /// HTTP status is available for these failures.
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),
}

impl Error {
    /// Returns `true` when the error signals a missing resource (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
