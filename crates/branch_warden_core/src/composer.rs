//! Composition of branch protection updates.
//!
//! GitHub replaces the whole protection on update, so the composed request must carry
//! every existing setting that should survive. Both functions are pure.

use github_client::{
    BranchProtection, BranchProtectionUpdate, DismissalRestrictionsUpdate,
    PullRequestReviewsUpdate, RestrictionsUpdate,
};

#[cfg(test)]
#[path = "composer_tests.rs"]
mod tests;

/// Builds the protection for a branch that has none.
///
/// Administrators are included, stale reviews are dismissed and the dismissal
/// restrictions are present with empty user and team sets. No status checks and no push
/// restrictions are configured.
pub fn compose_for_unprotected() -> BranchProtectionUpdate {
    BranchProtectionUpdate {
        required_status_checks: None,
        enforce_admins: true,
        required_pull_request_reviews: Some(PullRequestReviewsUpdate {
            dismiss_stale_reviews: true,
            dismissal_restrictions: DismissalRestrictionsUpdate::default(),
            require_code_owner_reviews: None,
            required_approving_review_count: None,
        }),
        restrictions: None,
    }
}

/// Builds the update that brings a non-compliant protection into compliance.
///
/// Status checks are copied verbatim. The dismissal restrictions are taken from the
/// users and teams of the existing push restrictions, or left empty when there are none.
/// The push restrictions themselves and the review settings that the policy does not
/// mandate are carried over unchanged.
pub fn compose_for_invalid(existing: &BranchProtection) -> BranchProtectionUpdate {
    let dismissal_restrictions = existing
        .restrictions
        .as_ref()
        .map(|r| DismissalRestrictionsUpdate {
            users: r.user_logins(),
            teams: r.team_identifiers(),
        })
        .unwrap_or_default();

    let existing_reviews = existing.required_pull_request_reviews.as_ref();

    BranchProtectionUpdate {
        required_status_checks: existing.required_status_checks.clone(),
        enforce_admins: true,
        required_pull_request_reviews: Some(PullRequestReviewsUpdate {
            dismiss_stale_reviews: true,
            dismissal_restrictions,
            require_code_owner_reviews: existing_reviews.map(|r| r.require_code_owner_reviews),
            required_approving_review_count: existing_reviews
                .and_then(|r| r.required_approving_review_count),
        }),
        restrictions: existing.restrictions.as_ref().map(RestrictionsUpdate::from),
    }
}
