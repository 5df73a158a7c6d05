//! Scenario runner
//!
//! Spawns one tokio task per virtual user and folds their session reports
//! into a run summary. The runner imposes no scheduling policy beyond
//! "each session runs to completion independently"; a failing session never
//! aborts the run.

pub mod spike;

pub use spike::SpikeScenario;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use uuid::Uuid;

use crate::session::{SessionEnd, SessionReport};

/// A workload the runner can drive
#[async_trait]
pub trait Scenario: Send + Sync + 'static {
    /// Runs exactly once before any virtual user starts
    async fn on_start(&self) -> anyhow::Result<()>;

    /// Drives one virtual user to completion
    async fn run_user(&self, user: usize) -> SessionReport;
}

/// Drives a [`Scenario`] with a fixed number of concurrent virtual users
pub struct Runner {
    users: usize,
    ramp_delay: Duration,
}

impl Runner {
    pub fn new(users: usize, ramp_delay: Duration) -> Self {
        Self { users, ramp_delay }
    }

    /// Run the scenario to completion and aggregate all session reports.
    ///
    /// Fails only if `on_start` fails; per-user problems are counted in the
    /// summary instead.
    pub async fn execute<S: Scenario>(&self, scenario: S) -> anyhow::Result<RunSummary> {
        let run_id = Uuid::new_v4();
        info!(%run_id, users = self.users, "starting run");

        scenario.on_start().await?;

        let scenario = Arc::new(scenario);
        let start = Instant::now();

        let mut handles = Vec::with_capacity(self.users);
        for user in 0..self.users {
            let scenario = scenario.clone();
            handles.push(tokio::spawn(async move { scenario.run_user(user).await }));
            if !self.ramp_delay.is_zero() {
                tokio::time::sleep(self.ramp_delay).await;
            }
        }

        let mut summary = RunSummary::new(run_id);
        for handle in handles {
            match handle.await {
                Ok(report) => summary.absorb(&report),
                Err(err) => {
                    error!(error = %err, "virtual user task died");
                    summary.aborted += 1;
                }
            }
        }
        summary.duration = start.elapsed();

        info!(
            %run_id,
            completed = summary.completed,
            failures = summary.failures(),
            "run finished"
        );
        Ok(summary)
    }
}

/// Aggregated counters for one run
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,

    /// Sessions that made a full pass over their plan
    pub completed: u64,
    /// Sessions that never ran because the pool was empty
    pub pool_exhausted: u64,
    /// Sessions that never got past login
    pub login_failures: u64,
    /// Sessions that died before doing any work (setup failure, panic)
    pub aborted: u64,

    pub enroll_calls: u64,
    pub enrolled: u64,
    pub conflicts: u64,
    pub rejected: u64,
    pub transient_errors: u64,
    pub gave_up: u64,

    pub duration: Duration,
}

impl RunSummary {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            completed: 0,
            pool_exhausted: 0,
            login_failures: 0,
            aborted: 0,
            enroll_calls: 0,
            enrolled: 0,
            conflicts: 0,
            rejected: 0,
            transient_errors: 0,
            gave_up: 0,
            duration: Duration::ZERO,
        }
    }

    pub fn absorb(&mut self, report: &SessionReport) {
        match report.end {
            SessionEnd::Completed => self.completed += 1,
            SessionEnd::PoolExhausted => self.pool_exhausted += 1,
            SessionEnd::LoginFailed => self.login_failures += 1,
            SessionEnd::Aborted => self.aborted += 1,
        }
        self.enroll_calls += report.enroll_calls;
        self.enrolled += report.enrolled;
        self.conflicts += report.conflicts;
        self.rejected += report.rejected;
        self.transient_errors += report.transient_errors;
        self.gave_up += report.gave_up;
    }

    /// Sessions counted toward the test's failure metric
    pub fn failures(&self) -> u64 {
        self.login_failures + self.aborted
    }

    /// Human-readable run report
    pub fn report(&self) -> String {
        format!(
            "run {} finished in {:.1}s\n\
             sessions: {} completed, {} login-failed, {} pool-exhausted, {} aborted\n\
             enrollment: {} calls, {} enrolled, {} conflicts, {} rejected, {} server errors, {} gave up",
            self.run_id,
            self.duration.as_secs_f64(),
            self.completed,
            self.login_failures,
            self.pool_exhausted,
            self.aborted,
            self.enroll_calls,
            self.enrolled,
            self.conflicts,
            self.rejected,
            self.transient_errors,
            self.gave_up,
        )
    }
}
