//! Plain-text rendering of the gradebook table and GPA summary

use crate::core::gpa::GpaSummary;
use crate::core::models::CourseRecord;
use std::fmt::Write;

/// Table header line
pub const TABLE_HEADER: &str = "CODE  | NAME                | CRED | SCORE | SEM";

/// Separator printed under the table header
pub const TABLE_RULE: &str = "-----------------------------------------------";

/// Message printed instead of a summary when there are no courses
pub const NO_COURSES: &str = "No courses!";

/// Format an average to two decimal places, or `n/a` when undefined
#[must_use]
pub fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "n/a".to_string(), |value| format!("{value:.2}"))
}

/// Render the course table
///
/// One row per course in the order given:
/// `CODE  | NAME                | CRED | SCORE | SEM`
#[must_use]
pub fn course_table<'a, I>(courses: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a CourseRecord)>,
{
    let mut table = String::new();
    let _ = writeln!(table, "==== Gradebook ====");
    let _ = writeln!(table, "{TABLE_HEADER}");
    let _ = writeln!(table, "{TABLE_RULE}");

    for (code, course) in courses {
        let _ = writeln!(
            table,
            "{code:<5} | {:<18} | {:<4} | {:<5} | {}",
            course.name, course.credits, course.score, course.semester
        );
    }
    table
}

/// Render the GPA summary
///
/// Prints the overall average followed by one line per semester, each to two
/// decimal places. An empty summary renders as [`NO_COURSES`].
#[must_use]
pub fn gpa_summary(summary: &GpaSummary) -> String {
    if summary.is_empty() {
        return format!("{NO_COURSES}\n");
    }

    let mut output = String::new();
    let _ = writeln!(output, "==== GPA Summary ====");
    let _ = writeln!(output, "Overall GPA: {}", format_average(summary.overall));
    for semester in &summary.semesters {
        let _ = writeln!(
            output,
            "{} GPA: {}",
            semester.semester,
            format_average(semester.average)
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gpa::summarize;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(Some(48.0 / 7.0)), "6.86");
        assert_eq!(format_average(Some(8.0)), "8.00");
        assert_eq!(format_average(None), "n/a");
    }

    #[test]
    fn test_course_table_rows() {
        let math = CourseRecord::new("Calculus I", 3.0, 8.5, "Fall");
        let phys = CourseRecord::new("Physics I", 4.0, 6.0, "Spring");
        let table = course_table(vec![("MATH101", &math), ("PHYS101", &phys)]);

        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "==== Gradebook ====");
        assert_eq!(lines[1], TABLE_HEADER);
        assert_eq!(lines[2], TABLE_RULE);
        assert_eq!(lines[3], "MATH101 | Calculus I         | 3    | 8.5   | Fall");
        assert_eq!(lines[4], "PHYS101 | Physics I          | 4    | 6     | Spring");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_course_table_empty() {
        let table = course_table(Vec::<(&str, &CourseRecord)>::new());
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_gpa_summary_lines() {
        let courses = vec![
            CourseRecord::new("Calculus I", 3.0, 8.0, "Fall"),
            CourseRecord::new("Physics I", 4.0, 6.0, "Fall"),
            CourseRecord::new("Chemistry", 2.0, 9.0, "Spring"),
        ];
        let rendered = gpa_summary(&summarize(&courses));

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "==== GPA Summary ====",
                "Overall GPA: 7.33",
                "Fall GPA: 6.86",
                "Spring GPA: 9.00",
            ]
        );
    }

    #[test]
    fn test_gpa_summary_empty() {
        let courses: Vec<CourseRecord> = Vec::new();
        assert_eq!(gpa_summary(&summarize(&courses)), "No courses!\n");
    }
}
