//! Error types for branch protection reconciliation.
//!
//! [`ReconcileError`] describes why a single repository could not be brought into
//! compliance. [`ScanError`] is returned by an organization scan: either the repository
//! listing failed, or one or more repositories failed and are collected in
//! [`RepositoryFailures`].

use std::collections::BTreeMap;
use std::fmt;

use github_client::{Repository, RepositoryId};
use thiserror::Error;

pub use github_client::Error as GitHubError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while reconciling a single repository.
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The repository reports no default branch.
    ///
    /// This is malformed repository data; it is reported, not retried.
    #[error("no default branch")]
    MissingDefaultBranch {
        /// The repository without a default branch
        repository: RepositoryId,
    },

    /// Fetching the current protection failed for a reason other than "not protected".
    ///
    /// No update is attempted in that case, so an unreachable GitHub never causes an
    /// existing protection to be replaced.
    #[error("failed to fetch branch protection: {0}")]
    Fetch(#[source] GitHubError),

    /// GitHub rejected the protection update.
    #[error("failed to update branch protection: {0}")]
    Update(#[source] GitHubError),
}

/// Errors that end an organization scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The organization's repositories could not be listed; no repository was reconciled.
    #[error("failed to list repositories for organization '{organization}': {source}")]
    List {
        /// The organization being scanned
        organization: String,
        /// The underlying GitHub failure
        #[source]
        source: GitHubError,
    },

    /// At least one repository failed to reconcile. All other repositories were processed.
    #[error("{0}")]
    Repositories(RepositoryFailures),
}

/// A repository that failed to reconcile during a scan.
#[derive(Debug)]
pub struct RepositoryFailure {
    /// Full name (owner/name) of the repository
    pub full_name: String,
    /// The reason reconciliation failed
    pub error: ReconcileError,
}

/// Per-repository failures collected during one scan.
///
/// Keyed by the stable `(owner, name)` identifier of each repository. The rendered text
/// holds one line per failing repository.
#[derive(Debug, Default)]
pub struct RepositoryFailures {
    failures: BTreeMap<RepositoryId, RepositoryFailure>,
}

impl RepositoryFailures {
    /// Creates an empty failure collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the failure recorded for a repository, if any.
    pub fn get(&self, id: &RepositoryId) -> Option<&RepositoryFailure> {
        self.failures.get(id)
    }

    /// Records the failure of a repository, replacing any previous failure for it.
    pub fn insert(&mut self, repository: &Repository, error: ReconcileError) {
        self.failures.insert(
            repository.id(),
            RepositoryFailure {
                full_name: repository.full_name().to_string(),
                error,
            },
        );
    }

    /// Returns `true` when no repository failed.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterates over the failures in repository identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepositoryId, &RepositoryFailure)> {
        self.failures.iter()
    }

    /// Returns the number of failing repositories.
    pub fn len(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for RepositoryFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "repo [{}] err: {}", failure.full_name, failure.error)?;
        }
        Ok(())
    }
}
