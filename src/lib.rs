//! Library for `gradebook`
//! Course records, their persistence, and credit-weighted averages.

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
