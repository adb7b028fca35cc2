//! Credit-weighted averages ("GPA") over course records
//!
//! Every function here is a pure function of the records it is given; nothing
//! is cached between calls.

use crate::core::models::CourseRecord;
use indexmap::IndexMap;

/// Average per semester label, in first-seen order
///
/// A value of `None` means the semester's total credits were zero, so its
/// average is undefined.
pub type SemesterAverages = IndexMap<String, Option<f64>>;

/// Running sums for a credit-weighted average
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedAverage {
    /// Σ credits × score
    pub points: f64,
    /// Σ credits
    pub credits: f64,
    /// Number of courses folded in
    pub count: usize,
}

impl WeightedAverage {
    /// Fold one course into the sums
    pub fn add(&mut self, record: &CourseRecord) {
        self.points += record.points();
        self.credits += record.credits;
        self.count += 1;
    }

    /// Fold another set of sums into this one
    pub fn merge(&mut self, other: &Self) {
        self.points += other.points;
        self.credits += other.credits;
        self.count += other.count;
    }

    /// The weighted average, or `None` when total credits are zero
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn average(&self) -> Option<f64> {
        if self.credits == 0.0 {
            None
        } else {
            Some(self.points / self.credits)
        }
    }
}

impl<'a> FromIterator<&'a CourseRecord> for WeightedAverage {
    fn from_iter<I: IntoIterator<Item = &'a CourseRecord>>(iter: I) -> Self {
        let mut acc = Self::default();
        for record in iter {
            acc.add(record);
        }
        acc
    }
}

/// Overall credit-weighted average: `Σ(credits × score) / Σ credits`
///
/// Returns `None` for an empty set of records or when the credits sum to zero.
pub fn overall_average<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    records.into_iter().collect::<WeightedAverage>().average()
}

/// Credit-weighted average within each semester
///
/// Records are grouped by exact `semester` string; an empty input yields an
/// empty mapping.
pub fn per_semester_average<'a, I>(records: I) -> SemesterAverages
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    group_by_semester(records)
        .into_iter()
        .map(|(semester, acc)| (semester, acc.average()))
        .collect()
}

fn group_by_semester<'a, I>(records: I) -> IndexMap<String, WeightedAverage>
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let mut groups: IndexMap<String, WeightedAverage> = IndexMap::new();
    for record in records {
        groups
            .entry(record.semester.clone())
            .or_default()
            .add(record);
    }
    groups
}

/// Averages for a single semester within a [`GpaSummary`]
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterSummary {
    /// Semester label
    pub semester: String,
    /// Credit-weighted average, `None` if undefined
    pub average: Option<f64>,
    /// Total credits recorded for the semester
    pub credits: f64,
    /// Number of courses in the semester
    pub course_count: usize,
}

/// Overall and per-semester averages computed in one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpaSummary {
    /// Overall credit-weighted average, `None` if undefined
    pub overall: Option<f64>,
    /// Total credits across all courses
    pub total_credits: f64,
    /// Number of courses summarized
    pub course_count: usize,
    /// Per-semester breakdown in first-seen order
    pub semesters: Vec<SemesterSummary>,
}

impl GpaSummary {
    /// Returns `true` when no courses were summarized
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.course_count == 0
    }
}

/// Summarize records into overall and per-semester averages
///
/// Uses the same semester grouping as [`per_semester_average`]; the overall
/// sums are the merge of every group.
pub fn summarize<'a, I>(records: I) -> GpaSummary
where
    I: IntoIterator<Item = &'a CourseRecord>,
{
    let mut overall = WeightedAverage::default();
    let semesters = group_by_semester(records)
        .into_iter()
        .map(|(semester, acc)| {
            overall.merge(&acc);
            SemesterSummary {
                semester,
                average: acc.average(),
                credits: acc.credits,
                course_count: acc.count,
            }
        })
        .collect();

    GpaSummary {
        overall: overall.average(),
        total_credits: overall.credits,
        course_count: overall.count,
        semesters,
    }
}
