//! reqwest-backed implementation of the registration API

use async_trait::async_trait;
use serde_json::json;

use super::{ClientError, RegistrationApi};

/// Per-user HTTP client
///
/// Each virtual user gets its own instance with its own cookie jar, so the
/// session cookie obtained at login is replayed on subsequent calls and
/// never shared across users.
pub struct HttpRegistrationClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRegistrationClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationClient {
    async fn login(&self, username: &str, password: &str) -> Result<u16, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }

    async fn list_courses(&self) -> Result<u16, ClientError> {
        let resp = self.http.get(self.url("/api/v1/courses/")).send().await?;
        Ok(resp.status().as_u16())
    }

    async fn enroll(&self, course_id: u32) -> Result<u16, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/v1/course-reg/enrollment"))
            .json(&json!({ "course_id": course_id }))
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }
}
