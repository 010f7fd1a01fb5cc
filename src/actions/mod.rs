//! File actions module.
//!
//! This module provides functionality for:
//! - Deciding the fate of each flagged duplicate ([`disposition`])
//! - Removing files permanently or to the system trash ([`delete`])
//!
//! ```no_run
//! use namedupe::actions::delete::permanent_delete;
//! use std::path::Path;
//!
//! let result = permanent_delete(Path::new("/path/to/duplicate.txt"));
//! ```

pub mod delete;
pub mod disposition;

// Re-export commonly used types
pub use delete::{
    delete_to_trash, permanent_delete, remover_for, DeleteError, DeleteResult, PermanentRemover,
    Remover, TrashRemover,
};

pub use disposition::{
    Choice, Disposer, DispositionError, DispositionReport, DispositionState, Outcome,
};
