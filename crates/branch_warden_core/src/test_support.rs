//! In-memory GitHub client and recording observer shared by the unit tests.

use async_trait::async_trait;
use github_client::{
    BranchProtection, BranchProtectionClient, BranchProtectionUpdate, Error as GitHubError,
    Repository,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::{ProtectionStatus, ReconcileError, ScanError, ScanObserver, ScanSummary};

/// Scripted failure, rebuilt into a fresh `GitHubError` for every call.
#[derive(Clone, Debug)]
pub(crate) enum Failure {
    Api(u16, &'static str),
    RateLimited,
    Transport(&'static str),
}

impl Failure {
    fn to_error(&self) -> GitHubError {
        match self {
            Failure::Api(status, message) => GitHubError::ApiError {
                status: *status,
                message: message.to_string(),
            },
            Failure::RateLimited => GitHubError::RateLimitExceeded,
            Failure::Transport(message) => GitHubError::Transport(message.to_string()),
        }
    }
}

/// Scripted answer of the protection endpoint for one repository.
#[derive(Clone, Debug)]
pub(crate) enum ProtectionReply {
    Protected(BranchProtection),
    NotProtected,
    Fails(Failure),
}

// Mock GitHub client for testing
#[derive(Default)]
pub(crate) struct MockClient {
    repositories: Vec<Repository>,
    list_failure: Option<Failure>,
    list_delay: Option<Duration>,
    protections: HashMap<String, ProtectionReply>,
    update_failures: HashMap<String, Failure>,
    pub list_calls: Mutex<Vec<String>>,
    pub get_calls: Mutex<Vec<(String, String, String)>>,
    pub update_calls: Mutex<Vec<(String, String, String, BranchProtectionUpdate)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repositories(mut self, repositories: Vec<Repository>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_list_failure(mut self, failure: Failure) -> Self {
        self.list_failure = Some(failure);
        self
    }

    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Repositories without a scripted reply answer "not protected".
    pub fn with_protection(mut self, repo: &str, reply: ProtectionReply) -> Self {
        self.protections.insert(repo.to_string(), reply);
        self
    }

    pub fn with_update_failure(mut self, repo: &str, failure: Failure) -> Self {
        self.update_failures.insert(repo.to_string(), failure);
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.lock().unwrap().len()
    }

    pub fn update_calls(&self) -> Vec<(String, String, String, BranchProtectionUpdate)> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn total_call_count(&self) -> usize {
        self.list_call_count() + self.get_call_count() + self.update_calls().len()
    }
}

#[async_trait]
impl BranchProtectionClient for MockClient {
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<Repository>, GitHubError> {
        self.list_calls.lock().unwrap().push(org.to_string());
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.list_failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(self.repositories.clone()),
        }
    }

    async fn get_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchProtection, GitHubError> {
        self.get_calls.lock().unwrap().push((
            owner.to_string(),
            repo.to_string(),
            branch.to_string(),
        ));
        match self.protections.get(repo) {
            Some(ProtectionReply::Protected(protection)) => Ok(protection.clone()),
            Some(ProtectionReply::Fails(failure)) => Err(failure.to_error()),
            Some(ProtectionReply::NotProtected) | None => Err(GitHubError::NotFound),
        }
    }

    async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        update: &BranchProtectionUpdate,
    ) -> Result<BranchProtection, GitHubError> {
        self.update_calls.lock().unwrap().push((
            owner.to_string(),
            repo.to_string(),
            branch.to_string(),
            update.clone(),
        ));
        match self.update_failures.get(repo) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(BranchProtection::from(update)),
        }
    }
}

/// Event recorded by [`RecordingObserver`], keyed by repository full name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Listed(String, usize),
    Skipped(String),
    Classified(String, ProtectionStatus),
    Applied(String, ProtectionStatus),
    Failed(String),
    Finished(String, usize),
    CycleFailed(String),
    Stopped(String, u64),
}

#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl ScanObserver for RecordingObserver {
    fn repositories_listed(&self, org: &str, count: usize) {
        self.push(Event::Listed(org.to_string(), count));
    }

    fn repository_skipped(&self, repository: &Repository) {
        self.push(Event::Skipped(repository.full_name().to_string()));
    }

    fn repository_classified(&self, repository: &Repository, _branch: &str, status: ProtectionStatus) {
        self.push(Event::Classified(repository.full_name().to_string(), status));
    }

    fn protection_applied(&self, repository: &Repository, _branch: &str, status: ProtectionStatus) {
        self.push(Event::Applied(repository.full_name().to_string(), status));
    }

    fn repository_failed(&self, repository: &Repository, _error: &ReconcileError) {
        self.push(Event::Failed(repository.full_name().to_string()));
    }

    fn scan_finished(&self, org: &str, summary: &ScanSummary) {
        self.push(Event::Finished(org.to_string(), summary.repositories));
    }

    fn cycle_failed(&self, org: &str, _error: &ScanError) {
        self.push(Event::CycleFailed(org.to_string()));
    }

    fn scheduler_stopped(&self, org: &str, cycles: u64) {
        self.push(Event::Stopped(org.to_string(), cycles));
    }
}

pub(crate) fn private_repo(name: &str) -> Repository {
    Repository::new("test-org", name, true, Some("main"))
}

pub(crate) fn public_repo(name: &str) -> Repository {
    Repository::new("test-org", name, false, Some("main"))
}
