use super::*;
use github_client::{
    BranchRestrictions, EnforceAdmins, PullRequestReviews, RequiredStatusChecks, User,
};

fn protection(enforce_admins: Option<bool>, dismiss_stale_reviews: Option<bool>) -> BranchProtection {
    BranchProtection {
        enforce_admins: enforce_admins.map(|enabled| EnforceAdmins { enabled }),
        required_pull_request_reviews: dismiss_stale_reviews.map(|dismiss| PullRequestReviews {
            dismiss_stale_reviews: dismiss,
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[test]
fn test_requires_protection_for_private_repository() {
    let repo = Repository::new("my-org", "secret", true, Some("main"));

    assert!(requires_protection(&repo));
}

#[test]
fn test_public_repository_does_not_require_protection() {
    let repo = Repository::new("my-org", "open", false, Some("main"));

    assert!(!requires_protection(&repo));
}

#[test]
fn test_compliant_protection() {
    assert!(is_compliant(&protection(Some(true), Some(true))));
}

#[test]
fn test_admins_not_enforced_is_not_compliant() {
    assert!(!is_compliant(&protection(Some(false), Some(true))));
    assert!(!is_compliant(&protection(None, Some(true))));
}

#[test]
fn test_missing_reviews_is_not_compliant() {
    assert!(!is_compliant(&protection(Some(true), None)));
}

#[test]
fn test_stale_reviews_kept_is_not_compliant() {
    assert!(!is_compliant(&protection(Some(true), Some(false))));
}

#[test]
fn test_empty_protection_is_not_compliant() {
    assert!(!is_compliant(&BranchProtection::default()));
}

#[test]
fn test_status_checks_and_restrictions_do_not_affect_verdict() {
    let mut with_extras = protection(Some(true), Some(true));
    with_extras.required_status_checks = Some(RequiredStatusChecks {
        strict: true,
        contexts: vec!["ci".to_string()],
        checks: vec![],
    });
    with_extras.restrictions = Some(BranchRestrictions {
        users: vec![User {
            id: 1,
            login: "alice".to_string(),
        }],
        ..Default::default()
    });

    assert!(is_compliant(&with_extras));

    let mut non_compliant_with_extras = with_extras.clone();
    non_compliant_with_extras.enforce_admins = Some(EnforceAdmins { enabled: false });

    assert!(!is_compliant(&non_compliant_with_extras));
}
