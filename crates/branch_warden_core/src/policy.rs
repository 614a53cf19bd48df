//! The branch protection policy.
//!
//! The policy is fixed: the default branch of every private repository must enforce its
//! protection for administrators and dismiss stale pull request approvals.

use github_client::{BranchProtection, Repository};

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

/// Returns whether a repository falls under the protection policy.
///
/// Only private repositories are reconciled.
pub fn requires_protection(repository: &Repository) -> bool {
    repository.is_private()
}

/// Returns whether a branch protection satisfies the policy.
///
/// A protection is compliant when administrators are included, pull request reviews are
/// required and stale approvals are dismissed. Status checks and push restrictions do
/// not affect the verdict.
pub fn is_compliant(protection: &BranchProtection) -> bool {
    let enforce_admins = protection
        .enforce_admins
        .as_ref()
        .is_some_and(|admins| admins.enabled);

    let dismiss_stale_reviews = protection
        .required_pull_request_reviews
        .as_ref()
        .is_some_and(|reviews| reviews.dismiss_stale_reviews);

    enforce_admins && dismiss_stale_reviews
}
