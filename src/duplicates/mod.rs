//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Concurrent name comparison over the entry index ([`Comparator`])
//! - The resulting [`DuplicateSet`]
//!
//! Only base names are compared. File contents are never read.

pub mod comparator;
pub mod set;

pub use comparator::{Comparator, ComparatorConfig, CompareError, DEFAULT_WORKERS};
pub use set::DuplicateSet;
