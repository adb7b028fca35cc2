//! Record store: the single source of truth for course records
//!
//! Every successful mutation rewrites the whole gradebook through the
//! [`Storage`] collaborator. Validation happens before anything changes, so a
//! rejected request never touches memory or storage. If the save itself fails,
//! the in-memory change is kept and the storage error is returned.

use crate::core::error::{GradebookError, Result};
use crate::core::models::{
    is_valid_credits, is_valid_score, normalize_code, CourseRecord, CourseUpdate,
};
use crate::core::storage::{Records, Storage};
use crate::info;

/// Course records keyed by normalized code, backed by a [`Storage`]
#[derive(Debug)]
pub struct RecordStore<S: Storage> {
    records: Records,
    storage: S,
}

impl<S: Storage> RecordStore<S> {
    /// Open a store, loading whatever `storage` currently holds
    ///
    /// # Errors
    /// Returns an error if the storage cannot be read or parsed.
    pub fn open(storage: S) -> Result<Self> {
        let records = storage.load()?;
        Ok(Self { records, storage })
    }

    /// Record a new course
    ///
    /// The code is trimmed and upper-cased before use.
    ///
    /// # Errors
    /// - [`GradebookError::InvalidCode`] if the code is blank
    /// - [`GradebookError::AlreadyExists`] if the code is already recorded
    /// - [`GradebookError::InvalidScore`] if `score` is outside [0, 10]
    /// - [`GradebookError::InvalidCredits`] if `credits` is not positive
    /// - any storage error raised while saving
    pub fn create(
        &mut self,
        code: &str,
        name: &str,
        credits: f64,
        score: f64,
        semester: &str,
    ) -> Result<()> {
        let key = Self::key_for(code)?;
        if self.records.contains_key(&key) {
            return Err(GradebookError::AlreadyExists(key));
        }
        let record = CourseRecord::new(name, credits, score, semester);
        validate(&record)?;

        self.records.insert(key.clone(), record);
        info!("Added course {key}");
        self.persist()
    }

    /// Replace some fields of an existing course
    ///
    /// Fields left as `None` keep their previous value. The resulting record is
    /// validated the same way as on [`create`](Self::create).
    ///
    /// # Errors
    /// - [`GradebookError::NotFound`] if the code is not recorded
    /// - [`GradebookError::InvalidScore`] / [`GradebookError::InvalidCredits`] for
    ///   out-of-range replacement values
    /// - any storage error raised while saving
    pub fn update(&mut self, code: &str, update: &CourseUpdate) -> Result<()> {
        let key = normalize_code(code);
        let current = self
            .records
            .get(&key)
            .ok_or_else(|| GradebookError::NotFound(key.clone()))?;
        let record = current.with_update(update);
        validate(&record)?;

        self.records.insert(key.clone(), record);
        info!("Updated course {key}");
        self.persist()
    }

    /// Remove a course
    ///
    /// # Errors
    /// - [`GradebookError::NotFound`] if the code is not recorded
    /// - any storage error raised while saving
    pub fn delete(&mut self, code: &str) -> Result<CourseRecord> {
        let key = normalize_code(code);
        let removed = self
            .records
            .shift_remove(&key)
            .ok_or_else(|| GradebookError::NotFound(key.clone()))?;
        info!("Deleted course {key}");
        self.persist()?;
        Ok(removed)
    }

    /// All courses as `(code, record)` pairs in insertion order
    pub fn list(&self) -> impl Iterator<Item = (&str, &CourseRecord)> {
        self.records
            .iter()
            .map(|(code, record)| (code.as_str(), record))
    }

    /// All course records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &CourseRecord> {
        self.records.values()
    }

    /// Look up a course by code (case-insensitive)
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CourseRecord> {
        self.records.get(&normalize_code(code))
    }

    /// Whether a course with this code (case-insensitive) is recorded
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(&normalize_code(code))
    }

    /// Number of recorded courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no courses are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backing storage
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn key_for(code: &str) -> Result<String> {
        let key = normalize_code(code);
        if key.is_empty() {
            return Err(GradebookError::InvalidCode);
        }
        Ok(key)
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.records)
    }
}

fn validate(record: &CourseRecord) -> Result<()> {
    if !is_valid_score(record.score) {
        return Err(GradebookError::InvalidScore(record.score));
    }
    if !is_valid_credits(record.credits) {
        return Err(GradebookError::InvalidCredits(record.credits));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    fn empty_store() -> RecordStore<MemoryStorage> {
        RecordStore::open(MemoryStorage::new()).unwrap()
    }

    fn seeded_store() -> RecordStore<MemoryStorage> {
        let mut store = empty_store();
        store
            .create("math101", "Calculus I", 3.0, 8.0, "Fall")
            .unwrap();
        store
            .create("phys101", "Physics I", 4.0, 6.0, "Fall")
            .unwrap();
        store
    }

    /// Storage whose saves always fail
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn load(&self) -> Result<Records> {
            Ok(Records::new())
        }

        fn save(&mut self, _records: &Records) -> Result<()> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn test_create_normalizes_code() {
        let mut store = empty_store();
        store.create("cs101", "Intro", 3.0, 9.0, "Fall").unwrap();

        let listed: Vec<_> = store.list().collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, "CS101");
        assert_eq!(listed[0].1, &CourseRecord::new("Intro", 3.0, 9.0, "Fall"));
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_create_duplicate_is_case_insensitive() {
        let mut store = empty_store();
        store.create("cs101", "Intro", 3.0, 9.0, "Fall").unwrap();

        let result = store.create("CS101", "Other", 4.0, 5.0, "Spring");
        assert!(matches!(result, Err(GradebookError::AlreadyExists(code)) if code == "CS101"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("cs101").unwrap().name, "Intro");
        assert_eq!(store.storage().save_count(), 1);
    }

    #[test]
    fn test_create_rejects_out_of_range_score() {
        let mut store = empty_store();

        let low = store.create("CS101", "Intro", 3.0, -0.5, "Fall");
        assert!(matches!(low, Err(GradebookError::InvalidScore(_))));
        let high = store.create("CS101", "Intro", 3.0, 10.5, "Fall");
        assert!(matches!(high, Err(GradebookError::InvalidScore(_))));

        assert!(store.is_empty());
        assert_eq!(store.storage().save_count(), 0);
    }

    #[test]
    fn test_create_accepts_score_bounds() {
        let mut store = empty_store();
        store.create("A", "Zero", 1.0, 0.0, "Fall").unwrap();
        store.create("B", "Ten", 1.0, 10.0, "Fall").unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_rejects_non_positive_credits() {
        let mut store = empty_store();

        let zero = store.create("CS101", "Intro", 0.0, 5.0, "Fall");
        assert!(matches!(zero, Err(GradebookError::InvalidCredits(_))));
        let negative = store.create("CS101", "Intro", -2.0, 5.0, "Fall");
        assert!(matches!(negative, Err(GradebookError::InvalidCredits(_))));

        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rejects_blank_code() {
        let mut store = empty_store();
        let result = store.create("   ", "Intro", 3.0, 5.0, "Fall");
        assert!(matches!(result, Err(GradebookError::InvalidCode)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_missing_code() {
        let mut store = seeded_store();
        let update = CourseUpdate {
            score: Some(9.0),
            ..CourseUpdate::default()
        };

        let result = store.update("CHEM101", &update);
        assert!(matches!(result, Err(GradebookError::NotFound(code)) if code == "CHEM101"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.storage().save_count(), 2);
    }

    #[test]
    fn test_update_preserves_unspecified_fields() {
        let mut store = seeded_store();
        let update = CourseUpdate {
            name: Some("Calculus I (Honors)".to_string()),
            score: Some(9.0),
            ..CourseUpdate::default()
        };

        store.update("Math101", &update).unwrap();
        let course = store.get("MATH101").unwrap();
        assert_eq!(course.name, "Calculus I (Honors)");
        assert!((course.credits - 3.0).abs() < f64::EPSILON);
        assert!((course.score - 9.0).abs() < f64::EPSILON);
        assert_eq!(course.semester, "Fall");
        assert_eq!(store.storage().save_count(), 3);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = seeded_store();
        let update = CourseUpdate {
            semester: Some("Spring".to_string()),
            ..CourseUpdate::default()
        };
        store.update("MATH101", &update).unwrap();

        let codes: Vec<_> = store.list().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["MATH101", "PHYS101"]);
    }

    #[test]
    fn test_update_validates_score_and_credits() {
        let mut store = seeded_store();

        let bad_score = CourseUpdate {
            score: Some(11.0),
            ..CourseUpdate::default()
        };
        assert!(matches!(
            store.update("MATH101", &bad_score),
            Err(GradebookError::InvalidScore(_))
        ));

        let bad_credits = CourseUpdate {
            credits: Some(0.0),
            ..CourseUpdate::default()
        };
        assert!(matches!(
            store.update("MATH101", &bad_credits),
            Err(GradebookError::InvalidCredits(_))
        ));

        assert_eq!(
            store.get("MATH101").unwrap(),
            &CourseRecord::new("Calculus I", 3.0, 8.0, "Fall")
        );
        assert_eq!(store.storage().save_count(), 2);
    }

    #[test]
    fn test_delete() {
        let mut store = seeded_store();

        let removed = store.delete("math101").unwrap();
        assert_eq!(removed.name, "Calculus I");
        assert!(!store.contains("MATH101"));
        assert!(store.contains("PHYS101"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.storage().records().len(), 1);
    }

    #[test]
    fn test_delete_missing_code() {
        let mut store = seeded_store();

        let result = store.delete("CHEM101");
        assert!(matches!(result, Err(GradebookError::NotFound(_))));
        assert_eq!(store.len(), 2);
        assert_eq!(store.storage().save_count(), 2);
    }

    #[test]
    fn test_open_loads_existing_records() {
        let mut records = Records::new();
        records.insert(
            "CS101".to_string(),
            CourseRecord::new("Intro", 3.0, 9.0, "Fall"),
        );

        let store = RecordStore::open(MemoryStorage::with_records(records)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("cs101"));
    }

    #[test]
    fn test_failed_save_keeps_memory_change() {
        let mut store = RecordStore::open(BrokenStorage).unwrap();

        let result = store.create("CS101", "Intro", 3.0, 9.0, "Fall");
        assert!(matches!(result, Err(GradebookError::Io(_))));
        assert!(store.contains("CS101"));
    }
}
