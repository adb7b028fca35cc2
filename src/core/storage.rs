//! Persistence for the record store
//!
//! The store only needs two operations from its backing storage: load the
//! whole mapping of course code to record, and save the whole mapping back.
//! [`JsonFileStorage`] keeps the gradebook in a single JSON file; [`MemoryStorage`]
//! keeps it in memory and is handy for tests and dry runs.

use crate::core::error::Result;
use crate::core::models::{normalize_code, CourseRecord};
use crate::{debug, warn};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Course records keyed by normalized course code, in insertion order
pub type Records = IndexMap<String, CourseRecord>;

/// Default gradebook file name, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "gradebook.json";

/// Backing storage for a [`RecordStore`](crate::core::store::RecordStore)
pub trait Storage {
    /// Load every stored record
    ///
    /// Returns an empty mapping when nothing has been stored yet.
    ///
    /// # Errors
    /// Returns an error if the stored data cannot be read or parsed.
    fn load(&self) -> Result<Records>;

    /// Replace the stored records with `records`
    ///
    /// # Errors
    /// Returns an error if the data cannot be written.
    fn save(&mut self, records: &Records) -> Result<()>;
}

/// Gradebook stored as one pretty-printed JSON object
///
/// ```json
/// {
///     "MATH101": {
///         "name": "Calculus I",
///         "credits": 3.0,
///         "score": 8.0,
///         "semester": "Fall"
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backed by the file at `path`
    ///
    /// The file does not need to exist; it is created on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a gradebook from JSON text
    ///
    /// Keys are normalized to uppercase. If two keys collide after
    /// normalization, the first one is kept.
    ///
    /// # Errors
    /// Returns an error if `json` is not an object of course records.
    pub fn parse(json: &str) -> Result<Records> {
        let raw: IndexMap<String, CourseRecord> = serde_json::from_str(json)?;
        let mut records = Records::with_capacity(raw.len());
        for (code, record) in raw {
            let key = normalize_code(&code);
            if records.contains_key(&key) {
                warn!("Ignoring duplicate course code '{code}' in gradebook file");
                continue;
            }
            records.insert(key, record);
        }
        Ok(records)
    }

    /// Render a gradebook as JSON text with 4-space indentation
    ///
    /// # Errors
    /// Returns an error if serialization fails (non-finite numbers are written as `null`,
    /// so this does not happen in practice).
    pub fn render(records: &Records) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Records> {
        if !self.path.exists() {
            debug!(
                "No gradebook at {}, starting empty",
                self.path.display()
            );
            return Ok(Records::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let records = Self::parse(&content)?;
        debug!(
            "Loaded {} course(s) from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&mut self, records: &Records) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, Self::render(records)?)?;
        debug!(
            "Saved {} course(s) to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-memory storage that remembers the last saved snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Records,
    saves: usize,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an in-memory storage pre-populated with `records`
    #[must_use]
    pub const fn with_records(records: Records) -> Self {
        Self { records, saves: 0 }
    }

    /// The last saved snapshot
    #[must_use]
    pub const fn records(&self) -> &Records {
        &self.records
    }

    /// How many times [`Storage::save`] has been called
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Records> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &Records) -> Result<()> {
        self.records.clone_from(records);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GradebookError;
    use tempfile::TempDir;

    fn sample_records() -> Records {
        let mut records = Records::new();
        records.insert(
            "MATH101".to_string(),
            CourseRecord::new("Calculus I", 3.0, 8.0, "Fall"),
        );
        records.insert(
            "PHYS101".to_string(),
            CourseRecord::new("Physics I", 4.0, 6.0, "Fall"),
        );
        records
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("gradebook.json"));

        let records = storage.load().unwrap();
        assert!(records.is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("gradebook.json");
        let mut storage = JsonFileStorage::new(&path);

        storage.save(&sample_records()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_uses_four_space_indent() {
        let json = JsonFileStorage::render(&sample_records()).unwrap();
        assert!(json.starts_with("{\n    \"MATH101\": {\n        \"name\": \"Calculus I\""));
    }

    #[test]
    fn test_render_keeps_insertion_order() {
        let json = JsonFileStorage::render(&sample_records()).unwrap();
        let math = json.find("MATH101").unwrap();
        let phys = json.find("PHYS101").unwrap();
        assert!(math < phys);
    }

    #[test]
    fn test_parse_normalizes_keys() {
        let json = r#"{"cs101": {"name": "Intro", "credits": 3, "score": 9, "semester": "Fall"}}"#;
        let records = JsonFileStorage::parse(json).unwrap();
        assert!(records.contains_key("CS101"));
        assert!((records["CS101"].credits - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_keeps_first_duplicate() {
        let json = r#"{
            "CS101": {"name": "First", "credits": 3, "score": 9, "semester": "Fall"},
            "cs101": {"name": "Second", "credits": 4, "score": 5, "semester": "Spring"}
        }"#;
        let records = JsonFileStorage::parse(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records["CS101"].name, "First");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let result = JsonFileStorage::parse(r#"{"CS101": {"name": "Intro"}}"#);
        assert!(matches!(result, Err(GradebookError::Parse(_))));

        let result = JsonFileStorage::parse("not json");
        assert!(matches!(result, Err(GradebookError::Parse(_))));
    }

    #[test]
    fn test_memory_storage_counts_saves() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.save_count(), 0);

        storage.save(&sample_records()).unwrap();
        storage.save(&Records::new()).unwrap();

        assert_eq!(storage.save_count(), 2);
        assert!(storage.records().is_empty());
        assert!(storage.load().unwrap().is_empty());
    }
}
