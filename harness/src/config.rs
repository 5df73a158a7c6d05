//! Harness configuration
//!
//! Configuration is loaded from environment variables. Defaults match the
//! spike scenario shipped with the test-data generator.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the registration service under test
    pub target_url: String,
    /// Number of virtual users to simulate
    pub users: usize,
    /// Delay between spawning consecutive virtual users (zero = full herd)
    pub ramp_delay: Duration,

    /// Admin credentials for the pre-run setup calls
    pub admin: AdminConfig,

    /// Fixture file locations
    pub fixtures: FixtureConfig,

    /// Per-user session behavior
    pub session: SessionConfig,
}

/// Admin credentials used once before the workload starts
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub id: String,
    pub pw: String,
}

/// Locations of the generated fixture files
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub students_path: PathBuf,
    pub courses_path: PathBuf,
}

/// Behavior knobs for one virtual user's session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Minimum number of courses per enrollment plan
    pub min_courses: u32,
    /// Maximum number of courses per enrollment plan
    pub max_courses: u32,
    /// Minimum click budget per course
    pub min_clicks: u32,
    /// Maximum click budget per course
    pub max_clicks: u32,
    /// Lower bound of the think-time wait between calls
    pub think_time_min: Duration,
    /// Upper bound of the think-time wait between calls
    pub think_time_max: Duration,
    /// Login attempt ceiling before the session gives up
    pub login_max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "http://127.0.0.1:8080".to_string(),
            users: 50,
            ramp_delay: Duration::ZERO,
            admin: AdminConfig::default(),
            fixtures: FixtureConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            id: "admin".to_string(),
            pw: "1234".to_string(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            students_path: PathBuf::from("students.json"),
            courses_path: PathBuf::from("courses.json"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_courses: 1,
            max_courses: 5,
            min_clicks: 1,
            max_clicks: 5,
            think_time_min: Duration::from_millis(100),
            think_time_max: Duration::from_millis(500),
            login_max_attempts: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Target config
        if let Ok(url) = env::var("TARGET_URL")
            && !url.is_empty()
        {
            config.target_url = url;
        }
        if let Ok(val) = env::var("USERS")
            && let Ok(v) = val.parse()
        {
            config.users = v;
        }
        if let Ok(val) = env::var("RAMP_DELAY_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.ramp_delay = Duration::from_millis(ms);
        }

        // Admin config
        if let Ok(id) = env::var("ADMIN_ID") {
            config.admin.id = id;
        }
        if let Ok(pw) = env::var("ADMIN_PW") {
            config.admin.pw = pw;
        }

        // Fixture config
        if let Ok(path) = env::var("STUDENTS_FILE") {
            config.fixtures.students_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("COURSES_FILE") {
            config.fixtures.courses_path = PathBuf::from(path);
        }

        // Session config
        if let Ok(val) = env::var("MIN_COURSES_TO_ENROLL")
            && let Ok(v) = val.parse()
        {
            config.session.min_courses = v;
        }
        if let Ok(val) = env::var("MAX_COURSES_TO_ENROLL")
            && let Ok(v) = val.parse()
        {
            config.session.max_courses = v;
        }
        if let Ok(val) = env::var("MIN_INITIAL_CLICKS")
            && let Ok(v) = val.parse()
        {
            config.session.min_clicks = v;
        }
        if let Ok(val) = env::var("MAX_INITIAL_CLICKS")
            && let Ok(v) = val.parse()
        {
            config.session.max_clicks = v;
        }
        if let Ok(val) = env::var("THINK_TIME_MIN_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.session.think_time_min = Duration::from_millis(ms);
        }
        if let Ok(val) = env::var("THINK_TIME_MAX_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            config.session.think_time_max = Duration::from_millis(ms);
        }
        if let Ok(val) = env::var("LOGIN_MAX_ATTEMPTS")
            && let Ok(v) = val.parse()
        {
            config.session.login_max_attempts = v;
        }

        config
    }
}
