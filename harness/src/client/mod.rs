//! HTTP transport for the registration API
//!
//! The session state machine only consumes raw status codes; everything
//! HTTP-specific lives behind the [`RegistrationApi`] seam so tests can
//! script responses without a network.

pub mod admin;
pub mod http;

pub use admin::AdminClient;
pub use http::HttpRegistrationClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the HTTP transport
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed")]
    Request(#[from] reqwest::Error),

    #[error("admin {call} call rejected with HTTP {status}")]
    AdminRejected { call: &'static str, status: u16 },
}

/// The three calls a virtual user makes against the registration service
///
/// Each method resolves to the response status code; transport-level
/// failures (connect, timeout) surface as `ClientError` and are mapped by
/// the caller.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// `POST /api/v1/auth/login`
    async fn login(&self, username: &str, password: &str) -> Result<u16, ClientError>;

    /// `GET /api/v1/courses/`
    async fn list_courses(&self) -> Result<u16, ClientError>;

    /// `POST /api/v1/course-reg/enrollment`
    async fn enroll(&self, course_id: u32) -> Result<u16, ClientError>;
}
