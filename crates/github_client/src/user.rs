//! Account domain types.
//!
//! This module contains types representing GitHub user accounts and teams as they
//! appear inside repository and branch protection payloads.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

/// Represents a GitHub user account.
///
/// Only the login is needed to identify users in protection requests; the numeric ID is
/// kept when GitHub provides it.
///
/// # Examples
///
/// ```rust
/// use github_client::User;
///
/// let user = User {
///     id: 12345,
///     login: "octocat".to_string(),
/// };
///
/// println!("User: {} (ID: {})", user.login, user.id);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    /// The unique numeric ID of the user
    #[serde(default)]
    pub id: u64,
    /// The login name of the user
    pub login: String,
}

/// Represents a GitHub team.
///
/// GitHub identifies teams by slug in protection requests, while the read side reports
/// both the display name and the slug.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Team {
    /// The display name of the team
    pub name: String,
    /// The URL-friendly team identifier
    #[serde(default)]
    pub slug: Option<String>,
}

impl Team {
    /// Returns the identifier used when referencing this team in a protection request.
    ///
    /// The slug is preferred; teams reported without one fall back to their name.
    pub fn identifier(&self) -> &str {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug,
            _ => &self.name,
        }
    }
}
