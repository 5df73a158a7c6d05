//! Fixture record types and error definitions
//!
//! Record shapes mirror the JSON files produced by the offline test-data
//! generator (`students.json`, `courses.json`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading fixture files
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture file contains no {0} records")]
    Empty(&'static str),
}

/// One student identity from the generated pool
///
/// `phone_number` is the login identifier and `birth_date` the credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub phone_number: String,
    pub birth_date: String,
}

/// One course record from the generated catalog
///
/// Only the record count feeds the harness (course ids are `1..=N`); the
/// remaining fields are carried so the same file the registration service
/// was seeded with parses as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    pub name: String,
    pub instructor: String,
    #[serde(default)]
    pub description: String,
    pub schedules: String,
    pub capacity: u32,
    pub is_special: bool,
}
