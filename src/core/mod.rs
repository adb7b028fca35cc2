//! Core module: course records, storage, and GPA aggregation

pub mod config;
pub mod error;
pub mod gpa;
pub mod models;
pub mod report;
pub mod storage;
pub mod store;

pub use error::{GradebookError, Result};
pub use models::{CourseRecord, CourseUpdate};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use store::RecordStore;

/// Returns the current version of the `gradebook` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
