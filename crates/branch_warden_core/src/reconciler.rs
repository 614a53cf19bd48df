//! Reconciliation of a single repository.
//!
//! The [`RepositoryReconciler`] fetches the protection of a repository's default branch,
//! classifies it and submits the composed update when the branch is unprotected or
//! non-compliant. Every path finishes within one call; nothing is retried here.

use std::sync::Arc;

use github_client::{BranchProtectionClient, BranchProtectionUpdate, Repository};
use tracing::instrument;

use crate::{
    compose_for_invalid, compose_for_unprotected, is_compliant, requires_protection,
    GitHubError, ProtectionStatus, ReconcileError, ScanObserver,
};

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

/// What reconciling a repository did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The repository is not private; no remote call was made
    Skipped,
    /// The protection already satisfied the policy
    AlreadyCompliant,
    /// The branch had no protection and was protected
    Protected,
    /// The branch protection was non-compliant and was updated
    Repaired,
}

/// Brings the default branch of one repository into compliance.
pub struct RepositoryReconciler {
    client: Arc<dyn BranchProtectionClient>,
    observer: Arc<dyn ScanObserver>,
}

impl RepositoryReconciler {
    /// Creates a new reconciler.
    ///
    /// # Arguments
    ///
    /// * `client` - Client used for the branch protection calls
    /// * `observer` - Receives classification and update events
    pub fn new(client: Arc<dyn BranchProtectionClient>, observer: Arc<dyn ScanObserver>) -> Self {
        Self { client, observer }
    }

    /// Reconciles the default branch protection of a repository.
    ///
    /// # Behavior
    ///
    /// 1. Non-private repositories are skipped without any remote call.
    /// 2. A repository without a default branch fails with
    ///    [`ReconcileError::MissingDefaultBranch`].
    /// 3. A branch without protection (GitHub answers 404) receives
    ///    [`compose_for_unprotected`].
    /// 4. Any other fetch failure is returned as [`ReconcileError::Fetch`]; no update is
    ///    attempted.
    /// 5. A compliant protection is left alone; a non-compliant one receives
    ///    [`compose_for_invalid`].
    ///
    /// # Errors
    ///
    /// Update rejections are returned as [`ReconcileError::Update`].
    #[instrument(skip(self, repository), fields(repository = %repository.full_name()))]
    pub async fn reconcile(
        &self,
        repository: &Repository,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        if !requires_protection(repository) {
            self.observer.repository_skipped(repository);
            return Ok(ReconcileOutcome::Skipped);
        }

        let branch =
            repository
                .default_branch()
                .ok_or_else(|| ReconcileError::MissingDefaultBranch {
                    repository: repository.id(),
                })?;

        let current = self
            .client
            .get_branch_protection(repository.owner(), repository.name(), branch)
            .await;

        match current {
            Err(GitHubError::NotFound) => {
                self.observer.repository_classified(
                    repository,
                    branch,
                    ProtectionStatus::Unprotected,
                );
                self.apply(
                    repository,
                    branch,
                    &compose_for_unprotected(),
                    ProtectionStatus::Unprotected,
                )
                .await?;
                Ok(ReconcileOutcome::Protected)
            }
            Err(e) => Err(ReconcileError::Fetch(e)),
            Ok(existing) if is_compliant(&existing) => {
                self.observer
                    .repository_classified(repository, branch, ProtectionStatus::Valid);
                Ok(ReconcileOutcome::AlreadyCompliant)
            }
            Ok(existing) => {
                self.observer
                    .repository_classified(repository, branch, ProtectionStatus::Invalid);
                self.apply(
                    repository,
                    branch,
                    &compose_for_invalid(&existing),
                    ProtectionStatus::Invalid,
                )
                .await?;
                Ok(ReconcileOutcome::Repaired)
            }
        }
    }

    async fn apply(
        &self,
        repository: &Repository,
        branch: &str,
        update: &BranchProtectionUpdate,
        status: ProtectionStatus,
    ) -> Result<(), ReconcileError> {
        self.client
            .update_branch_protection(repository.owner(), repository.name(), branch, update)
            .await
            .map_err(ReconcileError::Update)?;

        self.observer.protection_applied(repository, branch, status);
        Ok(())
    }
}
