//! Shared fixture store
//!
//! Holds the claimable student pool and the course catalog size after the
//! one-time load. The student pool is the only resource mutated by more
//! than one session; claims are linearizable within this process.

use std::sync::Mutex;
use std::sync::PoisonError;

use super::types::Student;

/// Immutable-after-load fixture context shared by all sessions
#[derive(Debug)]
pub struct FixtureStore {
    students: Mutex<Vec<Student>>,
    course_count: usize,
}

impl FixtureStore {
    pub fn new(students: Vec<Student>, course_count: usize) -> Self {
        Self {
            students: Mutex::new(students),
            course_count,
        }
    }

    /// Atomically remove and return one student from the pool.
    ///
    /// Returns `None` once the pool is exhausted; callers must abort session
    /// creation rather than retry. Exclusivity holds within one process only:
    /// deployments running several worker processes must pre-shard the
    /// student file, or the same identity will be claimed more than once.
    pub fn claim_student(&self) -> Option<Student> {
        self.students
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    /// Number of courses in the catalog (ids are `1..=course_count`)
    pub fn course_count(&self) -> usize {
        self.course_count
    }

    /// Students still claimable
    pub fn remaining_students(&self) -> usize {
        self.students
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
