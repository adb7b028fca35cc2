//! One-shot course command handlers (`add`, `update`, `delete`, `list`, `summary`)

use gradebook::core::gpa::summarize;
use gradebook::core::models::normalize_code;
use gradebook::core::{report, CourseUpdate, RecordStore, Result, Storage};
use gradebook::verbose;
use std::io::{self, Write};

/// Record a new course and confirm on `out`
///
/// # Errors
/// Propagates any store error (duplicate code, invalid values, storage failure).
pub fn add<S: Storage, W: Write>(
    store: &mut RecordStore<S>,
    out: &mut W,
    code: &str,
    name: &str,
    credits: f64,
    score: f64,
    semester: &str,
) -> Result<()> {
    store.create(code, name, credits, score, semester)?;
    verbose!("Gradebook now holds {} course(s)", store.len());
    writeln!(out, "✓ Added {}", normalize_code(code))?;
    Ok(())
}

/// Apply a partial update and confirm on `out`
///
/// An update with no fields leaves the gradebook untouched.
///
/// # Errors
/// Propagates any store error (unknown code, invalid values, storage failure).
pub fn update<S: Storage, W: Write>(
    store: &mut RecordStore<S>,
    out: &mut W,
    code: &str,
    update: &CourseUpdate,
) -> Result<()> {
    if update.is_empty() {
        writeln!(out, "Nothing to update; pass --name, --credits, --score or --semester")?;
        return Ok(());
    }
    store.update(code, update)?;
    writeln!(out, "✓ Updated {}", normalize_code(code))?;
    Ok(())
}

/// Remove a course and confirm on `out`
///
/// # Errors
/// Propagates any store error (unknown code, storage failure).
pub fn delete<S: Storage, W: Write>(
    store: &mut RecordStore<S>,
    out: &mut W,
    code: &str,
) -> Result<()> {
    let removed = store.delete(code)?;
    writeln!(
        out,
        "✓ Deleted {} ({})",
        normalize_code(code),
        removed.name
    )?;
    Ok(())
}

/// Print the course table
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn list<S: Storage, W: Write>(store: &RecordStore<S>, out: &mut W) -> io::Result<()> {
    write!(out, "{}", report::course_table(store.list()))
}

/// Print the GPA summary
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn summary<S: Storage, W: Write>(store: &RecordStore<S>, out: &mut W) -> io::Result<()> {
    write!(out, "{}", report::gpa_summary(&summarize(store.records())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradebook::core::{GradebookError, MemoryStorage};

    fn store() -> RecordStore<MemoryStorage> {
        RecordStore::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_add_then_list() {
        let mut store = store();
        let mut out = Vec::new();
        add(&mut store, &mut out, "cs101", "Intro", 3.0, 9.0, "Fall").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "✓ Added CS101\n");

        let mut out = Vec::new();
        list(&store, &mut out).unwrap();
        let table = String::from_utf8(out).unwrap();
        assert!(table.contains("CS101 | Intro"));
    }

    #[test]
    fn test_update_unknown_code() {
        let mut store = store();
        let mut out = Vec::new();
        let update = CourseUpdate {
            score: Some(5.0),
            ..CourseUpdate::default()
        };
        let result = super::update(&mut store, &mut out, "CS999", &update);
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
    }

    #[test]
    fn test_update_without_fields_writes_nothing() {
        let mut store = store();
        store.create("CS101", "Intro", 3.0, 9.0, "Fall").unwrap();

        let mut out = Vec::new();
        super::update(&mut store, &mut out, "cs101", &CourseUpdate::default()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Nothing to update; pass --name, --credits, --score or --semester\n"
        );
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_update_confirms() {
        let mut store = store();
        store.create("CS101", "Intro", 3.0, 9.0, "Fall").unwrap();

        let mut out = Vec::new();
        let update = CourseUpdate {
            credits: Some(4.0),
            ..CourseUpdate::default()
        };
        super::update(&mut store, &mut out, "cs101", &update).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "✓ Updated CS101\n");
        assert_eq!(store.storage().save_count(), 2);
    }

    #[test]
    fn test_delete_reports_name() {
        let mut store = store();
        store.create("CS101", "Intro", 3.0, 9.0, "Fall").unwrap();

        let mut out = Vec::new();
        delete(&mut store, &mut out, "cs101").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "✓ Deleted CS101 (Intro)\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_summary_output() {
        let mut store = store();
        store.create("MATH101", "Calculus I", 3.0, 8.0, "Fall").unwrap();
        store.create("PHYS101", "Physics I", 4.0, 6.0, "Fall").unwrap();

        let mut out = Vec::new();
        summary(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Overall GPA: 6.86"));
        assert!(text.contains("Fall GPA: 6.86"));
    }
}
