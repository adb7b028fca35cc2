//! Data models for `gradebook`

pub mod course;

pub use course::{
    is_valid_credits, is_valid_score, normalize_code, CourseRecord, CourseUpdate, MAX_SCORE,
    MIN_SCORE,
};
