//! Observation of scan progress.
//!
//! The reconciler, scanner and scheduler report what they do through a [`ScanObserver`]
//! handed to them at construction. All methods have empty default implementations so an
//! observer only overrides the events it cares about.

use github_client::Repository;
use tracing::{debug, error, info, warn};

use crate::{ReconcileError, ScanError, ScanSummary};

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;

/// Classification of the protection found on a repository's default branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtectionStatus {
    /// The branch has no protection configured
    Unprotected,
    /// The branch is protected but does not satisfy the policy
    Invalid,
    /// The branch protection satisfies the policy
    Valid,
}

impl ProtectionStatus {
    /// Returns a short lowercase label for log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectionStatus::Unprotected => "unprotected",
            ProtectionStatus::Invalid => "invalid",
            ProtectionStatus::Valid => "valid",
        }
    }
}

/// Receives progress events from scans.
pub trait ScanObserver: Send + Sync {
    /// The organization's repositories were listed.
    fn repositories_listed(&self, _org: &str, _count: usize) {}

    /// A repository was skipped because it does not require protection.
    fn repository_skipped(&self, _repository: &Repository) {}

    /// The default branch protection of a repository was classified.
    fn repository_classified(
        &self,
        _repository: &Repository,
        _branch: &str,
        _status: ProtectionStatus,
    ) {
    }

    /// A protection update was accepted by GitHub.
    fn protection_applied(&self, _repository: &Repository, _branch: &str, _status: ProtectionStatus) {
    }

    /// A repository could not be reconciled.
    fn repository_failed(&self, _repository: &Repository, _error: &ReconcileError) {}

    /// A scan completed without failures.
    fn scan_finished(&self, _org: &str, _summary: &ScanSummary) {}

    /// A periodic scan cycle failed; the scheduler keeps running.
    fn cycle_failed(&self, _org: &str, _error: &ScanError) {}

    /// The periodic scheduler stopped after a shutdown request.
    fn scheduler_stopped(&self, _org: &str, _cycles: u64) {}
}

/// Observer that records every event as a `tracing` event.
///
/// Per-repository details are emitted at `debug` level, so they only appear when the
/// subscriber enables verbose output.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn repositories_listed(&self, org: &str, count: usize) {
        debug!(org = org, count = count, "Fetched repositories for organization");
    }

    fn repository_skipped(&self, repository: &Repository) {
        debug!(
            repository = repository.full_name(),
            "Repository is not private, no check required"
        );
    }

    fn repository_classified(&self, repository: &Repository, branch: &str, status: ProtectionStatus) {
        match status {
            ProtectionStatus::Unprotected => debug!(
                repository = repository.full_name(),
                branch = branch,
                "Branch has no protection, attempting to protect it"
            ),
            ProtectionStatus::Invalid => debug!(
                repository = repository.full_name(),
                branch = branch,
                "Branch protection is not valid, updating it"
            ),
            ProtectionStatus::Valid => debug!(
                repository = repository.full_name(),
                branch = branch,
                "Branch protection is valid"
            ),
        }
    }

    fn protection_applied(&self, repository: &Repository, branch: &str, status: ProtectionStatus) {
        info!(
            repository = repository.full_name(),
            branch = branch,
            previous_status = status.as_str(),
            "Branch protection applied"
        );
    }

    fn repository_failed(&self, repository: &Repository, error: &ReconcileError) {
        warn!(
            repository = repository.full_name(),
            error = %error,
            "Failed to reconcile repository"
        );
    }

    fn scan_finished(&self, org: &str, summary: &ScanSummary) {
        info!(
            org = org,
            repositories = summary.repositories,
            skipped = summary.skipped,
            compliant = summary.compliant,
            protected = summary.protected,
            repaired = summary.repaired,
            "Scan finished"
        );
    }

    fn cycle_failed(&self, org: &str, error: &ScanError) {
        error!(
            org = org,
            "error(s) occurred during protecting phase: {}", error
        );
    }

    fn scheduler_stopped(&self, org: &str, cycles: u64) {
        info!(org = org, cycles = cycles, "Scheduler stopped");
    }
}
