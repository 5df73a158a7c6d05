//! Admin setup client
//!
//! Runs the one-time registration-window setup before virtual users start:
//! login, pause, reset enrollments, start. Authentication rides on the
//! session cookie obtained at login.

use serde_json::json;
use tracing::{info, warn};

use super::ClientError;

pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Log in with admin credentials and return an authenticated client
    pub async fn login(base_url: &str, admin_id: &str, admin_pw: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let client = Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        };

        let status = client
            .http
            .post(client.url("/api/v1/auth/login"))
            .json(&json!({ "username": admin_id, "password": admin_pw }))
            .send()
            .await?
            .status();

        if !status.is_success() {
            return Err(ClientError::AdminRejected {
                call: "login",
                status: status.as_u16(),
            });
        }

        info!("admin login succeeded");
        Ok(client)
    }

    pub async fn pause_registration(&self) -> Result<(), ClientError> {
        self.expect_success(
            "pause",
            self.http.post(self.url("/api/v1/admin/registration/pause")),
        )
        .await
    }

    pub async fn reset_enrollments(&self) -> Result<(), ClientError> {
        self.expect_success(
            "reset",
            self.http
                .delete(self.url("/api/v1/admin/setup/enrollments/reset")),
        )
        .await
    }

    pub async fn start_registration(&self) -> Result<(), ClientError> {
        self.expect_success(
            "start",
            self.http.post(self.url("/api/v1/admin/registration/start")),
        )
        .await
    }

    /// Full pre-run sequence: pause, reset, start.
    ///
    /// Reset is only accepted while registration is paused, so pause comes
    /// first; a pause rejection is tolerated because the window may already
    /// be paused.
    pub async fn prepare(&self) -> Result<(), ClientError> {
        if let Err(err) = self.pause_registration().await {
            warn!(error = %err, "pause rejected, registration may already be paused");
        }
        self.reset_enrollments().await?;
        self.start_registration().await?;
        info!("registration window reset and started");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn expect_success(
        &self,
        call: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<(), ClientError> {
        let status = req.send().await?.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::AdminRejected {
                call,
                status: status.as_u16(),
            })
        }
    }
}
