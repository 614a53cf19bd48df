//! Organization-wide scans.
//!
//! A scan lists the organization's repositories and reconciles them one at a time in
//! listing order. A failing repository never stops the scan; all failures are returned
//! together once every repository has been processed.

use std::sync::Arc;

use github_client::BranchProtectionClient;
use tracing::{debug, instrument};

use crate::{
    ReconcileOutcome, RepositoryFailures, RepositoryReconciler, ScanError, ScanObserver,
};

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;

/// Counts of the outcomes of a successful scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of repositories listed
    pub repositories: usize,
    /// Repositories skipped because they are not private
    pub skipped: usize,
    /// Repositories whose protection was already compliant
    pub compliant: usize,
    /// Unprotected repositories that were protected
    pub protected: usize,
    /// Non-compliant repositories that were updated
    pub repaired: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: ReconcileOutcome) {
        match outcome {
            ReconcileOutcome::Skipped => self.skipped += 1,
            ReconcileOutcome::AlreadyCompliant => self.compliant += 1,
            ReconcileOutcome::Protected => self.protected += 1,
            ReconcileOutcome::Repaired => self.repaired += 1,
        }
    }
}

/// Reconciles every repository of an organization.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use branch_warden_core::{OrganizationScanner, TracingObserver};
///
/// let scanner = OrganizationScanner::new(client, Arc::new(TracingObserver));
/// match scanner.scan("my-org").await {
///     Ok(summary) => println!("{} repositories checked", summary.repositories),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub struct OrganizationScanner {
    client: Arc<dyn BranchProtectionClient>,
    reconciler: RepositoryReconciler,
    observer: Arc<dyn ScanObserver>,
}

impl OrganizationScanner {
    /// Creates a new scanner.
    ///
    /// # Arguments
    ///
    /// * `client` - Client used for listing and for the per-repository calls
    /// * `observer` - Receives scan and per-repository events
    pub fn new(client: Arc<dyn BranchProtectionClient>, observer: Arc<dyn ScanObserver>) -> Self {
        Self {
            reconciler: RepositoryReconciler::new(Arc::clone(&client), Arc::clone(&observer)),
            client,
            observer,
        }
    }

    /// Returns the observer this scanner reports to.
    pub fn observer(&self) -> &Arc<dyn ScanObserver> {
        &self.observer
    }

    /// Scans an organization and reconciles each of its repositories.
    ///
    /// # Errors
    ///
    /// - [`ScanError::List`] if the repositories cannot be listed. No repository is
    ///   reconciled in that case.
    /// - [`ScanError::Repositories`] if one or more repositories failed. Every other
    ///   repository has still been reconciled.
    #[instrument(skip(self), fields(org = %org))]
    pub async fn scan(&self, org: &str) -> Result<ScanSummary, ScanError> {
        let repositories =
            self.client
                .list_org_repositories(org)
                .await
                .map_err(|source| ScanError::List {
                    organization: org.to_string(),
                    source,
                })?;
        self.observer.repositories_listed(org, repositories.len());

        let mut summary = ScanSummary {
            repositories: repositories.len(),
            ..Default::default()
        };
        let mut failures = RepositoryFailures::new();

        for repository in &repositories {
            debug!(repository = repository.name(), "Running check on repository");
            match self.reconciler.reconcile(repository).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    self.observer.repository_failed(repository, &e);
                    failures.insert(repository, e);
                }
            }
        }

        if !failures.is_empty() {
            return Err(ScanError::Repositories(failures));
        }

        self.observer.scan_finished(org, &summary);
        Ok(summary)
    }
}

/// Runs a single scan of an organization.
///
/// # Arguments
///
/// * `client` - Client used for all GitHub calls
/// * `org` - The organization to scan
/// * `observer` - Receives scan events
///
/// # Errors
///
/// See [`OrganizationScanner::scan`].
pub async fn run_check(
    client: Arc<dyn BranchProtectionClient>,
    org: &str,
    observer: Arc<dyn ScanObserver>,
) -> Result<ScanSummary, ScanError> {
    OrganizationScanner::new(client, observer).scan(org).await
}
