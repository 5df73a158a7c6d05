//! Enrollment planning
//!
//! Builds the randomized per-user plan: which courses to go after, and how
//! many times an impatient user will click each one before giving up.

use rand::Rng;
use rand::seq::index;
use thiserror::Error;

/// Errors raised when the requested plan shape is unsatisfiable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("course catalog is empty")]
    NoCourses,

    #[error("inverted {what} range: min {min} > max {max}")]
    InvalidRange {
        what: &'static str,
        min: u32,
        max: u32,
    },
}

/// One unit of work in a virtual user's plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    /// Course identifier in `1..=course_count`
    pub course_id: u32,
    /// Maximum enrollment attempts before the user moves on
    pub click_budget: u32,
}

/// Build a randomized enrollment plan.
///
/// Picks a plan length uniformly from `[min_courses, max_courses]` clamped
/// to `[1, course_count]`, samples that many distinct course ids without
/// replacement, and draws an independent click budget per course from
/// `[min_clicks, max_clicks]`. Execution order follows selection order.
pub fn build_plan<R: Rng + ?Sized>(
    course_count: usize,
    min_courses: u32,
    max_courses: u32,
    min_clicks: u32,
    max_clicks: u32,
    rng: &mut R,
) -> Result<Vec<PlanEntry>, PlanError> {
    if course_count == 0 {
        return Err(PlanError::NoCourses);
    }
    if min_courses > max_courses {
        return Err(PlanError::InvalidRange {
            what: "course",
            min: min_courses,
            max: max_courses,
        });
    }
    if min_clicks > max_clicks {
        return Err(PlanError::InvalidRange {
            what: "click",
            min: min_clicks,
            max: max_clicks,
        });
    }

    let lo = (min_courses.max(1) as usize).min(course_count);
    let hi = (max_courses.max(1) as usize).min(course_count);
    let k = rng.random_range(lo..=hi);

    // Click budgets are at least 1 by invariant.
    let clicks_lo = min_clicks.max(1);
    let clicks_hi = max_clicks.max(clicks_lo);

    let plan = index::sample(rng, course_count, k)
        .into_iter()
        .map(|idx| PlanEntry {
            course_id: idx as u32 + 1,
            click_budget: rng.random_range(clicks_lo..=clicks_hi),
        })
        .collect();

    Ok(plan)
}
