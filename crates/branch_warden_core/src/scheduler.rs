//! Scheduling of organization scans.
//!
//! A [`Scheduler`] runs a scan once, or once per interval until its shutdown future
//! resolves. Shutdown is only observed between cycles: a running scan always finishes,
//! and no new cycle starts once shutdown has been requested.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use github_client::BranchProtectionClient;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument};

use crate::{OrganizationScanner, ScanError, ScanObserver};

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

/// How often scans run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Run a single scan and report its result
    Once,
    /// Run a scan every interval until shutdown
    Every(Duration),
}

impl Schedule {
    /// Longest accepted interval between scans, in minutes (one year).
    pub const MAX_INTERVAL_MINUTES: u64 = 366 * 24 * 60;

    /// Builds a schedule from a frequency in minutes, where zero means a single scan.
    ///
    /// Returns `None` for intervals longer than [`Schedule::MAX_INTERVAL_MINUTES`].
    pub fn from_minutes(minutes: u64) -> Option<Self> {
        if minutes == 0 {
            return Some(Schedule::Once);
        }
        if minutes > Self::MAX_INTERVAL_MINUTES {
            return None;
        }
        minutes
            .checked_mul(60)
            .map(|secs| Schedule::Every(Duration::from_secs(secs)))
    }
}

/// Drives an [`OrganizationScanner`] according to a [`Schedule`].
pub struct Scheduler {
    scanner: OrganizationScanner,
}

impl Scheduler {
    /// Creates a scheduler for the given scanner. Cycle events go to the scanner's observer.
    pub fn new(scanner: OrganizationScanner) -> Self {
        Self { scanner }
    }

    /// Runs scans of an organization according to the schedule.
    ///
    /// With [`Schedule::Once`] the scan result is returned and `shutdown` is not polled.
    /// With [`Schedule::Every`] the first scan runs one interval after the call, failing
    /// cycles are reported to the observer and do not stop the loop, and the call returns
    /// `Ok(())` once `shutdown` resolves and the running cycle, if any, has finished.
    /// A zero interval is treated as [`Schedule::Once`].
    ///
    /// # Errors
    ///
    /// Only returns an error for [`Schedule::Once`], when the single scan fails.
    #[instrument(skip(self, shutdown), fields(org = %org))]
    pub async fn run<F>(&self, org: &str, schedule: Schedule, shutdown: F) -> Result<(), ScanError>
    where
        F: Future<Output = ()>,
    {
        let period = match schedule {
            Schedule::Every(period) if !period.is_zero() => period,
            _ => return self.scanner.scan(org).await.map(|_| ()),
        };

        info!(
            org = org,
            interval_secs = period.as_secs(),
            "Starting periodic branch protection checks"
        );

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        tokio::pin!(shutdown);
        let mut cycles: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    cycles += 1;
                    if let Err(e) = self.scanner.scan(org).await {
                        self.scanner.observer().cycle_failed(org, &e);
                    }
                }
            }
        }

        self.scanner.observer().scheduler_stopped(org, cycles);
        Ok(())
    }
}

/// Runs scans of an organization on a schedule until shutdown.
///
/// # Arguments
///
/// * `client` - Client used for all GitHub calls
/// * `org` - The organization to scan
/// * `schedule` - Single run or fixed interval
/// * `observer` - Receives scan and cycle events
/// * `shutdown` - Resolves when the periodic loop should stop
///
/// # Errors
///
/// See [`Scheduler::run`].
pub async fn run<F>(
    client: Arc<dyn BranchProtectionClient>,
    org: &str,
    schedule: Schedule,
    observer: Arc<dyn ScanObserver>,
    shutdown: F,
) -> Result<(), ScanError>
where
    F: Future<Output = ()>,
{
    Scheduler::new(OrganizationScanner::new(client, observer))
        .run(org, schedule, shutdown)
        .await
}
