//! Branch protection domain types.
//!
//! This module contains the read model returned by
//! `GET /repos/{owner}/{repo}/branches/{branch}/protection` and the request body
//! accepted by the matching `PUT` endpoint.
//!
//! See: https://docs.github.com/en/rest/branches/branch-protection

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{Team, User};

#[cfg(test)]
#[path = "branch_protection_tests.rs"]
mod tests;

/// Represents the protection currently configured on a branch.
///
/// Every section is optional: GitHub omits the sections that are not enabled. A branch
/// without any protection is not represented by an empty value; the fetch fails with
/// [`crate::Error::NotFound`] instead.
///
/// # Examples
///
/// ```rust
/// use github_client::{BranchProtection, EnforceAdmins};
///
/// let protection = BranchProtection {
///     enforce_admins: Some(EnforceAdmins { enabled: true }),
///     ..Default::default()
/// };
/// assert!(protection.required_pull_request_reviews.is_none());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct BranchProtection {
    /// Whether the protection also applies to repository administrators
    #[serde(default)]
    pub enforce_admins: Option<EnforceAdmins>,
    /// Pull request review requirements
    #[serde(default)]
    pub required_pull_request_reviews: Option<PullRequestReviews>,
    /// Status checks that must pass before merging
    #[serde(default)]
    pub required_status_checks: Option<RequiredStatusChecks>,
    /// Users, teams and apps allowed to push to the branch
    #[serde(default)]
    pub restrictions: Option<BranchRestrictions>,
}

/// The `enforce_admins` section of a branch protection.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct EnforceAdmins {
    /// Whether administrators are subject to the protection
    pub enabled: bool,
}

/// Pull request review requirements of a protected branch.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PullRequestReviews {
    /// Whether approving reviews are dismissed when new commits are pushed
    #[serde(default)]
    pub dismiss_stale_reviews: bool,
    /// Whether code owner reviews are required
    #[serde(default)]
    pub require_code_owner_reviews: bool,
    /// Required number of approving reviews before merging
    #[serde(default)]
    pub required_approving_review_count: Option<u32>,
    /// Who may dismiss pull request reviews
    #[serde(default)]
    pub dismissal_restrictions: Option<DismissalRestrictions>,
}

/// Users and teams allowed to dismiss pull request reviews.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DismissalRestrictions {
    /// Users allowed to dismiss reviews
    #[serde(default)]
    pub users: Vec<User>,
    /// Teams allowed to dismiss reviews
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Status check requirements of a protected branch.
///
/// The protection workflow never interprets these values; they are copied from the
/// current protection into the update request. Read-only fields returned by GitHub
/// (`url`, `contexts_url`, `enforcement_level`) are dropped on deserialization since
/// the `PUT` endpoint does not accept them.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequiredStatusChecks {
    /// Require branches to be up to date before merging
    #[serde(default)]
    pub strict: bool,
    /// Names of the required status check contexts
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Required checks, optionally pinned to the app that reports them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<StatusCheck>,
}

/// A single required status check.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatusCheck {
    /// Name of the check
    pub context: String,
    /// ID of the GitHub App that must report the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}

/// Users, teams and apps allowed to push to a protected branch.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BranchRestrictions {
    /// Users allowed to push
    #[serde(default)]
    pub users: Vec<User>,
    /// Teams allowed to push
    #[serde(default)]
    pub teams: Vec<Team>,
    /// GitHub Apps allowed to push
    #[serde(default)]
    pub apps: Vec<App>,
}

impl BranchRestrictions {
    /// Returns the logins of the restricted users.
    pub fn user_logins(&self) -> BTreeSet<String> {
        self.users.iter().map(|u| u.login.clone()).collect()
    }

    /// Returns the identifiers of the restricted teams.
    pub fn team_identifiers(&self) -> BTreeSet<String> {
        self.teams.iter().map(|t| t.identifier().to_string()).collect()
    }

    /// Returns the slugs of the restricted apps.
    pub fn app_slugs(&self) -> BTreeSet<String> {
        self.apps.iter().map(|a| a.slug.clone()).collect()
    }
}

/// A GitHub App referenced by a branch restriction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct App {
    /// The URL-friendly app identifier
    pub slug: String,
}

/// Request body for `PUT /repos/{owner}/{repo}/branches/{branch}/protection`.
///
/// The endpoint replaces the whole protection, so every top-level section is always
/// serialized; absent sections are sent as `null`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BranchProtectionUpdate {
    /// Status checks to require, `None` to require none
    pub required_status_checks: Option<RequiredStatusChecks>,
    /// Whether the protection applies to administrators
    pub enforce_admins: bool,
    /// Pull request review requirements, `None` to disable reviews
    pub required_pull_request_reviews: Option<PullRequestReviewsUpdate>,
    /// Push restrictions, `None` to allow everyone with write access
    pub restrictions: Option<RestrictionsUpdate>,
}

/// Pull request review section of a protection update.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PullRequestReviewsUpdate {
    /// Dismiss approving reviews when new commits are pushed
    pub dismiss_stale_reviews: bool,
    /// Who may dismiss reviews
    pub dismissal_restrictions: DismissalRestrictionsUpdate,
    /// Require code owner reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,
    /// Required number of approving reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,
}

/// Review dismissal restrictions of a protection update.
///
/// Both sets are always sent, empty sets included.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DismissalRestrictionsUpdate {
    /// User logins
    pub users: BTreeSet<String>,
    /// Team slugs
    pub teams: BTreeSet<String>,
}

/// Push restrictions of a protection update.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RestrictionsUpdate {
    /// User logins
    pub users: BTreeSet<String>,
    /// Team slugs
    pub teams: BTreeSet<String>,
    /// App slugs
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub apps: BTreeSet<String>,
}

impl From<&BranchRestrictions> for RestrictionsUpdate {
    fn from(value: &BranchRestrictions) -> Self {
        Self {
            users: value.user_logins(),
            teams: value.team_identifiers(),
            apps: value.app_slugs(),
        }
    }
}

/// Projects an update onto the protection GitHub reports once the update is applied.
impl From<&BranchProtectionUpdate> for BranchProtection {
    fn from(value: &BranchProtectionUpdate) -> Self {
        Self {
            enforce_admins: Some(EnforceAdmins {
                enabled: value.enforce_admins,
            }),
            required_pull_request_reviews: value.required_pull_request_reviews.as_ref().map(
                |reviews| PullRequestReviews {
                    dismiss_stale_reviews: reviews.dismiss_stale_reviews,
                    require_code_owner_reviews: reviews.require_code_owner_reviews.unwrap_or(false),
                    required_approving_review_count: reviews.required_approving_review_count,
                    dismissal_restrictions: Some(DismissalRestrictions {
                        users: users_from_logins(&reviews.dismissal_restrictions.users),
                        teams: teams_from_slugs(&reviews.dismissal_restrictions.teams),
                    }),
                },
            ),
            required_status_checks: value.required_status_checks.clone(),
            restrictions: value.restrictions.as_ref().map(|r| BranchRestrictions {
                users: users_from_logins(&r.users),
                teams: teams_from_slugs(&r.teams),
                apps: r.apps.iter().map(|slug| App { slug: slug.clone() }).collect(),
            }),
        }
    }
}

fn users_from_logins(logins: &BTreeSet<String>) -> Vec<User> {
    logins
        .iter()
        .map(|login| User {
            id: 0,
            login: login.clone(),
        })
        .collect()
}

fn teams_from_slugs(slugs: &BTreeSet<String>) -> Vec<Team> {
    slugs
        .iter()
        .map(|slug| Team {
            name: slug.clone(),
            slug: Some(slug.clone()),
        })
        .collect()
}
