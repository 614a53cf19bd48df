//! Repository domain types.
//!
//! This module contains types representing GitHub repositories as returned by the
//! organization repository listing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::User;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Stable identifier of a repository: the `(owner, name)` pair.
///
/// Two snapshots of the same repository fetched at different times compare equal,
/// which makes this type suitable as a map key for per-repository results.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    /// Login of the user or organization owning the repository
    pub owner: String,
    /// Name of the repository (without owner)
    pub name: String,
}

impl RepositoryId {
    /// Creates a new repository identifier.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Represents a GitHub repository.
///
/// This is a read-only snapshot of the fields the protection workflow needs: identity,
/// visibility and the default branch. Unknown fields in the GitHub payload are ignored.
///
/// # Examples
///
/// ```rust
/// use github_client::Repository;
///
/// let repo = Repository::new("my-org", "my-repo", true, Some("main"));
///
/// assert_eq!(repo.full_name(), "my-org/my-repo");
/// assert!(repo.is_private());
/// assert_eq!(repo.default_branch(), Some("main"));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Repository {
    /// The account owning the repository
    owner: User,
    /// The name of the repository
    name: String,
    /// The full name of the repository (owner/name)
    full_name: String,
    /// Whether the repository is private
    #[serde(default)]
    private: bool,
    /// The name of the default branch, if GitHub reported one
    #[serde(default)]
    default_branch: Option<String>,
}

impl Repository {
    /// Creates a new Repository instance.
    ///
    /// # Arguments
    ///
    /// * `owner` - The login of the owning user or organization
    /// * `name` - The name of the repository
    /// * `private` - Whether the repository is private
    /// * `default_branch` - The default branch name, if any
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        private: bool,
        default_branch: Option<&str>,
    ) -> Self {
        let owner = owner.into();
        let name = name.into();
        Self {
            full_name: format!("{}/{}", owner, name),
            owner: User {
                id: 0,
                login: owner,
            },
            name,
            private,
            default_branch: default_branch.map(str::to_string),
        }
    }

    /// Returns the default branch name.
    ///
    /// # Returns
    ///
    /// `None` when GitHub reported no default branch or an empty one.
    pub fn default_branch(&self) -> Option<&str> {
        self.default_branch.as_deref().filter(|b| !b.is_empty())
    }

    /// Returns the full name of the repository (owner/name).
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the stable `(owner, name)` identifier of the repository.
    pub fn id(&self) -> RepositoryId {
        RepositoryId::new(self.owner.login.clone(), self.name.clone())
    }

    /// Returns whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the login of the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner.login
    }
}
