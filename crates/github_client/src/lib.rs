//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides the [`BranchProtectionClient`] abstraction used by the branch
//! protection workflow and a [`GitHubClient`] implementation built on `octocrab`. It also
//! contains the domain types exchanged with GitHub: repositories, accounts and branch
//! protection settings.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::{Octocrab, Result as OctocrabResult};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod branch_protection;
pub use branch_protection::{
    App, BranchProtection, BranchProtectionUpdate, BranchRestrictions, DismissalRestrictions,
    DismissalRestrictionsUpdate, EnforceAdmins, PullRequestReviews, PullRequestReviewsUpdate,
    RequiredStatusChecks, RestrictionsUpdate, StatusCheck,
};

pub mod repository;
pub use repository::{Repository, RepositoryId};

pub mod user;
pub use user::{Team, User};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Number of repositories requested per page. GitHub caps `per_page` at 100.
pub const REPOSITORY_PAGE_SIZE: usize = 100;

/// Upper bound on the number of repository pages fetched for one organization.
pub const MAX_REPOSITORY_PAGES: u32 = 50;

/// Trait for the branch protection operations needed to enforce a protection policy.
///
/// Implemented by [`GitHubClient`] for the real API and by in-memory fakes in tests.
#[async_trait]
pub trait BranchProtectionClient: Send + Sync {
    /// Lists the repositories of an organization.
    ///
    /// # Arguments
    ///
    /// * `org` - The login of the organization.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or authorization problem.
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>, Error>;

    /// Gets the protection configured on a branch.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `branch` - The name of the branch.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the branch has no protection. Every other failure,
    /// including failures where GitHub never answered, uses a different variant.
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchProtection, Error>;

    /// Replaces the protection of a branch.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `branch` - The name of the branch.
    /// * `update` - The complete protection to apply.
    ///
    /// # Returns
    ///
    /// The protection as reported by GitHub after the update.
    ///
    /// # Errors
    ///
    /// Returns an error if GitHub rejects the update (validation, authorization,
    /// rate limiting) or cannot be reached.
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &BranchProtectionUpdate,
    ) -> Result<BranchProtection, Error>;
}

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an authenticated `Octocrab` instance.
    ///
    /// Use [`create_basic_auth_client`] or [`create_token_client`] to build one.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct ListRepositoriesParams {
    #[serde(rename = "type")]
    repo_type: &'static str,
    per_page: usize,
    page: u32,
}

#[async_trait]
impl BranchProtectionClient for GitHubClient {
    /// Lists all repositories of an organization, following pages until a short page
    /// is returned or [`MAX_REPOSITORY_PAGES`] is reached.
    #[instrument(skip(self), fields(org = %org))]
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>, Error> {
        let path = format!("/orgs/{}/repos", org);
        let mut repositories = Vec::new();

        for page in 1..=MAX_REPOSITORY_PAGES {
            let params = ListRepositoriesParams {
                repo_type: "all",
                per_page: REPOSITORY_PAGE_SIZE,
                page,
            };

            debug!("Making API call to: {} (page {})", path, page);
            let response: OctocrabResult<Vec<Repository>> =
                self.client.get(&path, Some(&params)).await;
            let batch = response.map_err(|e| {
                map_octocrab_error("Failed to list organization repositories", e)
            })?;

            let batch_len = batch.len();
            repositories.extend(batch);

            if batch_len < REPOSITORY_PAGE_SIZE {
                info!(
                    org = org,
                    count = repositories.len(),
                    "Fetched repositories for organization"
                );
                return Ok(repositories);
            }
        }

        warn!(
            org = org,
            count = repositories.len(),
            max_pages = MAX_REPOSITORY_PAGES,
            "Repository listing reached the page limit, remaining repositories are ignored"
        );
        Ok(repositories)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchProtection, Error> {
        let path = protection_path(owner, repo, branch);

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<BranchProtection> =
            self.client.get(&path, None::<&()>).await;
        response.map_err(|e| map_octocrab_error("Failed to get branch protection", e))
    }

    #[instrument(skip(self, update), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &BranchProtectionUpdate,
    ) -> Result<BranchProtection, Error> {
        let path = protection_path(owner, repo, branch);

        debug!("Making API call to: {}", path);
        let response: OctocrabResult<BranchProtection> =
            self.client.put(&path, Some(update)).await;
        let protection =
            response.map_err(|e| map_octocrab_error("Failed to update branch protection", e))?;

        info!(
            owner = owner,
            repo = repo,
            branch = branch,
            "Branch protection updated"
        );
        Ok(protection)
    }
}

fn protection_path(owner: &str, repo: &str, branch: &str) -> String {
    format!("/repos/{}/{}/branches/{}/protection", owner, repo, branch)
}

/// Creates an `Octocrab` client authenticated with HTTP basic authentication.
///
/// The user name is combined with a personal access token as the password.
///
/// # Arguments
///
/// * `user` - The GitHub user to access the API as.
/// * `token` - A personal access token for that user.
/// * `api_url` - Base address of the API, `None` for `https://api.github.com`.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base address is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_basic_auth_client, GitHubClient};
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), github_client::Error> {
/// let token = SecretString::from("ghp_example".to_string());
/// let octocrab = create_basic_auth_client("octocat", &token, None)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_basic_auth_client(
    user: &str,
    token: &SecretString,
    api_url: Option<&Url>,
) -> Result<Octocrab, Error> {
    let mut builder =
        Octocrab::builder().basic_auth(user.to_string(), token.expose_secret().to_string());
    if let Some(url) = api_url {
        builder = builder.base_uri(url.as_str()).map_err(|e| {
            error!(api_url = %url, error = %e, "Invalid GitHub API address");
            Error::AuthError(format!("Invalid GitHub API address '{}': {}", url, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with basic authentication");
        Error::AuthError("Failed to build a client for the provided user.".to_string())
    })
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base address is invalid or the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &SecretString, api_url: Option<&Url>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.expose_secret().to_string());
    if let Some(url) = api_url {
        builder = builder.base_uri(url.as_str()).map_err(|e| {
            error!(api_url = %url, error = %e, "Invalid GitHub API address");
            Error::AuthError(format!("Invalid GitHub API address '{}': {}", url, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with a personal token");
        Error::AuthError("Failed to build a client for the provided token.".to_string())
    })
}

/// Logs an octocrab failure and translates it into an [`Error`].
///
/// Only a GitHub response with status 404 becomes `Error::NotFound`. Failures that
/// never produced a response carry no status and become `Error::Transport`.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let status = source.status_code.as_u16();
            if status == StatusCode::NOT_FOUND.as_u16() {
                debug!(status = status, "{}. GitHub reported the resource as missing", message);
                return Error::NotFound;
            }

            error!(
                status = status,
                error_message = %source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            let rate_limited = status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                || (status == StatusCode::FORBIDDEN.as_u16()
                    && source.message.to_lowercase().contains("rate limit"));
            if rate_limited {
                Error::RateLimitExceeded
            } else {
                Error::ApiError {
                    status,
                    message: source.message.clone(),
                }
            }
        }
        octocrab::Error::Serde { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response body could not be parsed.",
                message
            );
            Error::Deserialization(source)
        }
        octocrab::Error::Json { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                path = source.path().to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response body could not be parsed.",
                message
            );
            Error::Deserialization(source.into_inner())
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::Transport(source.to_string())
        }
        octocrab::Error::Uri { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}, Failed to parse URI.",
                message
            );
            Error::Transport(source.to_string())
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::Transport(e.to_string())
        }
    }
}
