//! Scanner module for directory traversal and entry indexing.
//!
//! This module provides functionality for:
//! - Depth-first directory traversal through a pluggable [`Filesystem`]
//! - Hidden file filtering
//! - Building the position-ordered [`EntryIndex`] consumed by the comparator
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`fs`]: The enumeration seam ([`Filesystem`], [`DirHandle`]) and its OS implementation
//! - [`walker`]: Recursive traversal that appends leaves to the index
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::{OsFilesystem, Walker, WalkerConfig};
//!
//! let config = WalkerConfig {
//!     include_hidden: false,
//! };
//!
//! let walker = Walker::new(OsFilesystem, config);
//! let index = walker.walk(".").unwrap();
//! for entry in index.iter() {
//!     println!("{:>4} {}", entry.position, entry.full_path.display());
//! }
//! ```

pub mod fs;
pub mod walker;

use std::ffi::OsString;
use std::path::PathBuf;

// Re-export main types
pub use fs::{ChildInfo, DirHandle, Filesystem, OsFilesystem};
pub use walker::{join_child, Walker};

/// A discovered regular file.
///
/// Only `name` takes part in duplicate detection, compared as raw bytes.
/// The size is carried along for the reclaimable-space summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// 0-based rank in the index, assigned on append
    pub position: usize,
    /// Base file name, the equality key for duplicate detection
    pub name: OsString,
    /// Path used for display and deletion
    pub full_path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl Entry {
    /// Create a new entry. The position is assigned by [`EntryIndex::push`].
    #[must_use]
    pub fn new(name: impl Into<OsString>, full_path: impl Into<PathBuf>) -> Self {
        Self {
            position: 0,
            name: name.into(),
            full_path: full_path.into(),
            size: 0,
        }
    }

    /// Attach the size reported by enumeration.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

/// Ordered, insertion-stable collection of discovered files.
///
/// Positions always equal the entry's index in the collection.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: Vec<Entry>,
}

impl EntryIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, assigning it the next position.
    ///
    /// Returns the assigned position.
    pub fn push(&mut self, mut entry: Entry) -> usize {
        let position = self.entries.len();
        entry.position = position;
        self.entries.push(entry);
        position
    }

    /// Set every entry's position to its index in the sequence.
    ///
    /// Called by the comparator right before dispatch.
    pub fn assign_positions(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.position = position;
        }
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Iterate entries in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// All entries in position order.
    #[must_use]
    pub fn as_slice(&self) -> &[Entry] {
        &self.entries
    }
}

impl FromIterator<Entry> for EntryIndex {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.push(entry);
        }
        index
    }
}

impl<'a> IntoIterator for &'a EntryIndex {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Index entries whose names start with `.` (and descend into such directories).
    pub include_hidden: bool,
}

impl WalkerConfig {
    /// Create a new configuration from CLI arguments.
    #[must_use]
    pub fn new(include_hidden: bool) -> Self {
        Self { include_hidden }
    }
}

/// Errors that can occur during directory scanning.
///
/// Every variant is fatal: the first one aborts the scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when opening or listing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised while opening or listing `path`.
    #[must_use]
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotADirectory => Self::NotADirectory(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// Path associated with this error.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::NotADirectory(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
