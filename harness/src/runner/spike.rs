//! Spike scenario: every virtual user rushes enrollment at once
//!
//! `on_start` resets the registration window through the admin API and
//! validates the configured plan ranges; each user then claims a student
//! and drives a [`StudentSession`] over its own HTTP client.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::error;

use super::Scenario;
use crate::client::{AdminClient, HttpRegistrationClient};
use crate::config::Config;
use crate::fixtures::FixtureStore;
use crate::plan::build_plan;
use crate::session::{SessionReport, StudentSession};

pub struct SpikeScenario {
    config: Config,
    fixtures: Arc<FixtureStore>,
}

impl SpikeScenario {
    pub fn new(config: Config, fixtures: Arc<FixtureStore>) -> Self {
        Self { config, fixtures }
    }
}

#[async_trait]
impl Scenario for SpikeScenario {
    async fn on_start(&self) -> anyhow::Result<()> {
        // Surface plan misconfiguration before a single user logs in.
        let s = &self.config.session;
        {
            let mut rng = rand::rng();
            build_plan(
                self.fixtures.course_count(),
                s.min_courses,
                s.max_courses,
                s.min_clicks,
                s.max_clicks,
                &mut rng,
            )?;
        }

        let admin = AdminClient::login(
            &self.config.target_url,
            &self.config.admin.id,
            &self.config.admin.pw,
        )
        .await?;
        admin.prepare().await?;
        Ok(())
    }

    async fn run_user(&self, user: usize) -> SessionReport {
        let api = match HttpRegistrationClient::new(&self.config.target_url) {
            Ok(api) => api,
            Err(err) => {
                error!(user, error = %err, "could not build HTTP client");
                return SessionReport::new();
            }
        };

        let mut session = StudentSession::new(
            api,
            self.fixtures.clone(),
            self.config.session.clone(),
            user,
        );
        session.run().await
    }
}
