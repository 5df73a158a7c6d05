//! Virtual-user session engine
//!
//! One [`StudentSession`] drives one simulated student end to end: claim an
//! identity, log in, walk a randomized enrollment plan, and for each course
//! click until the attempt succeeds, is rejected, or the click budget runs
//! out. Sessions run concurrently and independently; the shared student
//! pool is the only point of contact between them.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::client::RegistrationApi;
use crate::config::SessionConfig;
use crate::fixtures::{FixtureStore, Student};
use crate::outcome::{AttemptOutcome, classify};
use crate::plan::{PlanEntry, build_plan};

use super::state::{SessionEnd, SessionReport, SessionState};

/// Login status codes that are worth retrying
const LOGIN_RETRYABLE: [u16; 4] = [500, 502, 503, 504];

/// One virtual user's session state machine
pub struct StudentSession<C> {
    api: C,
    fixtures: Arc<FixtureStore>,
    config: SessionConfig,
    user: usize,
    state: SessionState,
}

impl<C: RegistrationApi> StudentSession<C> {
    pub fn new(api: C, fixtures: Arc<FixtureStore>, config: SessionConfig, user: usize) -> Self {
        Self {
            api,
            fixtures,
            config,
            user,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to `Terminated` and report how it went.
    ///
    /// A session runs exactly once; driving it again is a no-op that
    /// reports an aborted session.
    pub async fn run(&mut self) -> SessionReport {
        let mut report = SessionReport::new();

        if self.state != SessionState::Idle {
            warn!(user = self.user, state = ?self.state, "session already driven");
            return report;
        }

        let Some(student) = self.fixtures.claim_student() else {
            info!(user = self.user, "student pool exhausted, session never ran");
            self.state = SessionState::Terminated;
            report.end = SessionEnd::PoolExhausted;
            return report;
        };
        debug!(
            user = self.user,
            remaining = self.fixtures.remaining_students(),
            phone = %student.phone_number,
            "claimed student"
        );

        self.state = SessionState::LoggingIn;
        if !self.login(&student, &mut report).await {
            self.state = SessionState::Terminated;
            report.end = SessionEnd::LoginFailed;
            return report;
        }

        self.state = SessionState::Enrolling;
        let plan = {
            let mut rng = rand::rng();
            build_plan(
                self.fixtures.course_count(),
                self.config.min_courses,
                self.config.max_courses,
                self.config.min_clicks,
                self.config.max_clicks,
                &mut rng,
            )
        };
        let plan = match plan {
            Ok(plan) => plan,
            Err(err) => {
                error!(user = self.user, error = %err, "enrollment plan rejected");
                self.state = SessionState::Terminated;
                return report;
            }
        };

        for entry in &plan {
            self.process_entry(entry, &mut report).await;
        }

        self.state = SessionState::Terminated;
        report.end = SessionEnd::Completed;
        info!(
            user = self.user,
            courses = plan.len(),
            enrolled = report.enrolled,
            conflicts = report.conflicts,
            "session finished"
        );
        report
    }

    /// Login with the claimed identity, retrying server errors up to the
    /// configured ceiling. Credential rejections and transport failures are
    /// terminal on the first occurrence.
    async fn login(&self, student: &Student, report: &mut SessionReport) -> bool {
        let max = self.config.login_max_attempts;
        for attempt in 1..=max {
            report.login_attempts = attempt;
            match self
                .api
                .login(&student.phone_number, &student.birth_date)
                .await
            {
                Ok(200) => {
                    debug!(user = self.user, phone = %student.phone_number, "login succeeded");
                    return true;
                }
                Ok(status) if LOGIN_RETRYABLE.contains(&status) => {
                    warn!(
                        user = self.user,
                        attempt,
                        max,
                        status,
                        "login hit a server error, retrying"
                    );
                }
                Ok(status) => {
                    error!(user = self.user, status, "login rejected");
                    return false;
                }
                Err(err) => {
                    error!(user = self.user, error = %err, "login transport failure");
                    return false;
                }
            }
        }
        error!(user = self.user, attempts = max, "login failed after retry budget");
        false
    }

    /// Work one plan entry: a best-effort course listing, then up to
    /// `click_budget` enrollment attempts.
    async fn process_entry(&self, entry: &PlanEntry, report: &mut SessionReport) {
        self.think().await;
        match self.api.list_courses().await {
            Ok(status) => debug!(user = self.user, status, "listed courses"),
            // Listing is not outcome-gated; the plan proceeds regardless.
            Err(err) => debug!(user = self.user, error = %err, "course listing failed"),
        }

        let mut remaining = entry.click_budget;
        while remaining > 0 {
            self.think().await;
            report.enroll_calls += 1;

            let outcome = match self.api.enroll(entry.course_id).await {
                Ok(status) => classify(status),
                Err(err) => {
                    debug!(
                        user = self.user,
                        course = entry.course_id,
                        error = %err,
                        "enrollment transport failure"
                    );
                    AttemptOutcome::Transient
                }
            };

            match outcome {
                AttemptOutcome::Success => {
                    report.enrolled += 1;
                    info!(user = self.user, course = entry.course_id, "enrolled");
                    break;
                }
                AttemptOutcome::Rejected => {
                    report.rejected += 1;
                    debug!(user = self.user, course = entry.course_id, "enrollment rejected");
                    break;
                }
                AttemptOutcome::Conflict => {
                    report.conflicts += 1;
                    remaining -= 1;
                }
                AttemptOutcome::Transient => {
                    report.transient_errors += 1;
                    remaining -= 1;
                }
            }

            if remaining == 0 {
                report.gave_up += 1;
                debug!(
                    user = self.user,
                    course = entry.course_id,
                    budget = entry.click_budget,
                    "click budget exhausted, moving on"
                );
            }
        }
    }

    /// Random think-time wait between network calls
    async fn think(&self) {
        let min = self.config.think_time_min;
        let max = self.config.think_time_max.max(min);
        let wait = if min == max {
            min
        } else {
            let mut rng = rand::rng();
            rng.random_range(min..=max)
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}
