//! Course record model

use serde::{Deserialize, Serialize};

/// Lowest score a course can receive
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a course can receive
pub const MAX_SCORE: f64 = 10.0;

/// A completed or in-progress course
///
/// The course code is not part of the record: it is the key the record is
/// stored under (see [`normalize_code`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Display name (e.g., "Calculus I")
    pub name: String,

    /// Credit weight used in averaging (can be fractional)
    pub credits: f64,

    /// Score in the closed range [0, 10]
    pub score: f64,

    /// Free-text grouping label (e.g., "Fall 2024")
    pub semester: String,
}

impl CourseRecord {
    /// Create a new course record
    ///
    /// # Arguments
    /// * `name` - Course display name
    /// * `credits` - Credit weight
    /// * `score` - Score between 0 and 10
    /// * `semester` - Semester label
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        credits: f64,
        score: f64,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credits,
            score,
            semester: semester.into(),
        }
    }

    /// Credit-weighted points contributed by this course (`credits × score`)
    #[must_use]
    pub fn points(&self) -> f64 {
        self.credits * self.score
    }

    /// Build the record that results from applying `update` to this one
    ///
    /// Fields left as `None` in the update keep their current value.
    #[must_use]
    pub fn with_update(&self, update: &CourseUpdate) -> Self {
        Self {
            name: update.name.clone().unwrap_or_else(|| self.name.clone()),
            credits: update.credits.unwrap_or(self.credits),
            score: update.score.unwrap_or(self.score),
            semester: update
                .semester
                .clone()
                .unwrap_or_else(|| self.semester.clone()),
        }
    }
}

/// Partial replacement values for an existing course
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseUpdate {
    /// New display name
    pub name: Option<String>,
    /// New credit weight
    pub credits: Option<f64>,
    /// New score
    pub score: Option<f64>,
    /// New semester label
    pub semester: Option<String>,
}

impl CourseUpdate {
    /// Returns `true` when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.credits.is_none()
            && self.score.is_none()
            && self.semester.is_none()
    }
}

/// Normalize a course code to its storage key: trimmed and upper-cased
///
/// # Examples
/// ```
/// use gradebook::core::models::normalize_code;
/// assert_eq!(normalize_code(" cs101 "), "CS101");
/// ```
#[must_use]
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Returns `true` if `score` is a finite value within [0, 10]
#[must_use]
pub fn is_valid_score(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Returns `true` if `credits` is a finite, strictly positive value
#[must_use]
pub fn is_valid_credits(credits: f64) -> bool {
    credits.is_finite() && credits > 0.0
}
