//! File removal for flagged duplicates.
//!
//! # Overview
//!
//! This module provides the deletion step used by the disposition engine:
//! - Permanent deletion (default)
//! - Move to system trash (`--trash`, recoverable)
//!
//! Both go through the [`Remover`] trait so the disposition engine can be
//! driven against a recording double in tests.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::actions::delete::{permanent_delete, PermanentRemover, Remover};
//! use std::path::Path;
//!
//! match permanent_delete(Path::new("/path/to/duplicate.txt")) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//!
//! let mut remover = PermanentRemover;
//! remover.remove(Path::new("/path/to/another.txt")).ok();
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0} - try running with elevated privileges")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, permanent: bool) -> Self {
        Self {
            path,
            size,
            permanent,
        }
    }
}

/// Removes one file on behalf of the disposition engine.
pub trait Remover {
    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`DeleteError`] if the file could not be removed.
    fn remove(&mut self, path: &Path) -> Result<DeleteResult, DeleteError>;
}

/// [`Remover`] that deletes files permanently.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermanentRemover;

impl Remover for PermanentRemover {
    fn remove(&mut self, path: &Path) -> Result<DeleteResult, DeleteError> {
        permanent_delete(path)
    }
}

/// [`Remover`] that moves files to the system trash.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrashRemover;

impl Remover for TrashRemover {
    fn remove(&mut self, path: &Path) -> Result<DeleteResult, DeleteError> {
        delete_to_trash(path)
    }
}

/// Build the remover selected by the `--trash` flag.
#[must_use]
pub fn remover_for(trash: bool) -> Box<dyn Remover> {
    if trash {
        Box::new(TrashRemover)
    } else {
        Box::new(PermanentRemover)
    }
}

impl<R: Remover + ?Sized> Remover for Box<R> {
    fn remove(&mut self, path: &Path) -> Result<DeleteResult, DeleteError> {
        (**self).remove(path)
    }
}

/// Delete a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if its metadata cannot be read
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    let size = metadata.len();

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, false))
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, true))
}
