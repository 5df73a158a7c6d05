//! Session lifecycle types

/// Lifecycle of one virtual user
///
/// `Terminated` is absorbing; a session is never resurrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    LoggingIn,
    Enrolling,
    Terminated,
}

/// How a session reached `Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// One full pass over the enrollment plan
    Completed,
    /// The student pool was empty; the session never ran (not a failure)
    PoolExhausted,
    /// Login never produced a 200 within the attempt ceiling
    LoginFailed,
    /// The session could not be set up (plan misconfiguration, client build)
    Aborted,
}

/// Per-session outcome record handed back to the runner
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub end: SessionEnd,
    /// Login calls issued
    pub login_attempts: u32,
    /// Enrollment calls issued
    pub enroll_calls: u64,
    /// Courses successfully enrolled
    pub enrolled: u64,
    /// 409 responses (duplicate/contended clicks)
    pub conflicts: u64,
    /// Business rejections (403/404)
    pub rejected: u64,
    /// Retryable server/transport errors
    pub transient_errors: u64,
    /// Plan entries whose click budget ran out
    pub gave_up: u64,
}

impl SessionReport {
    /// A fresh report; `end` stays `Aborted` until a terminal transition
    /// overwrites it.
    pub fn new() -> Self {
        Self {
            end: SessionEnd::Aborted,
            login_attempts: 0,
            enroll_calls: 0,
            enrolled: 0,
            conflicts: 0,
            rejected: 0,
            transient_errors: 0,
            gave_up: 0,
        }
    }

    /// Whether the runner should count this session toward the failure metric
    pub fn is_failure(&self) -> bool {
        matches!(self.end, SessionEnd::LoginFailed | SessionEnd::Aborted)
    }
}

impl Default for SessionReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        let mut report = SessionReport::new();
        assert!(report.is_failure());

        report.end = SessionEnd::LoginFailed;
        assert!(report.is_failure());

        report.end = SessionEnd::Completed;
        assert!(!report.is_failure());

        report.end = SessionEnd::PoolExhausted;
        assert!(!report.is_failure());
    }
}
