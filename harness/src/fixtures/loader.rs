//! One-time fixture loading
//!
//! Reads the generated `students.json` and `courses.json` arrays at startup
//! and builds the shared [`FixtureStore`]. Any I/O or parse problem fails
//! the run before a single virtual user starts.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

use super::store::FixtureStore;
use super::types::{CourseRecord, FixtureError, Student};

/// Load both fixture files and build the shared store
pub fn load_fixtures(students_path: &Path, courses_path: &Path) -> Result<FixtureStore, FixtureError> {
    let students: Vec<Student> = read_json(students_path)?;
    let courses: Vec<CourseRecord> = read_json(courses_path)?;

    if students.is_empty() {
        return Err(FixtureError::Empty("student"));
    }
    if courses.is_empty() {
        return Err(FixtureError::Empty("course"));
    }

    info!(
        students = students.len(),
        courses = courses.len(),
        "loaded fixtures"
    );

    Ok(FixtureStore::new(students, courses.len()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FixtureError> {
    let raw = fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
