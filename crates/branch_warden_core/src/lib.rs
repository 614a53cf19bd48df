//! Branch protection enforcement for GitHub organizations.
//!
//! This crate keeps the default branch of every private repository in an organization
//! protected. A scan lists the organization's repositories and reconciles each one:
//!
//! - [`policy`] decides which repositories need protection and whether an existing
//!   protection is compliant,
//! - [`composer`] builds the protection update to submit, preserving unrelated settings,
//! - [`reconciler`] classifies one repository and applies the update when needed,
//! - [`scanner`] drives the reconciler over a whole organization and aggregates failures,
//! - [`scheduler`] runs scans once or on a fixed interval until shutdown is requested.
//!
//! Progress is reported through an injected [`ScanObserver`]; [`TracingObserver`] turns
//! the events into `tracing` log records.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use branch_warden_core::{run_check, TracingObserver};
//! use github_client::{create_token_client, GitHubClient};
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from("ghp_example".to_string());
//! let client = Arc::new(GitHubClient::new(create_token_client(&token, None)?));
//! let summary = run_check(client, "my-org", Arc::new(TracingObserver)).await?;
//! println!("Repaired {} repositories", summary.repaired);
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub use composer::{compose_for_invalid, compose_for_unprotected};

pub mod errors;
pub use errors::{GitHubError, ReconcileError, RepositoryFailure, RepositoryFailures, ScanError};

pub mod observer;
pub use observer::{ProtectionStatus, ScanObserver, TracingObserver};

pub mod policy;
pub use policy::{is_compliant, requires_protection};

pub mod reconciler;
pub use reconciler::{ReconcileOutcome, RepositoryReconciler};

pub mod scanner;
pub use scanner::{run_check, OrganizationScanner, ScanSummary};

pub mod scheduler;
pub use scheduler::{run, Schedule, Scheduler};

#[cfg(test)]
mod test_support;
