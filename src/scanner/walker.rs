//! Depth-first directory walker that builds the [`EntryIndex`].
//!
//! # Overview
//!
//! The walker opens the root through a [`Filesystem`], lists its children,
//! and for each child:
//!
//! - skips it when its name starts with `.` and hidden mode is off
//! - recurses into it when it is a directory (directories are never indexed)
//! - appends it to the index otherwise
//!
//! Recursion is synchronous, so positions follow depth-first order. The first
//! open or list error aborts the whole walk.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::scanner::{OsFilesystem, Walker, WalkerConfig};
//!
//! let walker = Walker::new(OsFilesystem, WalkerConfig::new(true));
//! match walker.walk("/home/user/Downloads") {
//!     Ok(index) => println!("Indexed {} files", index.len()),
//!     Err(e) => eprintln!("Scan failed: {}", e),
//! }
//! ```

use std::ffi::{OsStr, OsString};
use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use super::{Entry, EntryIndex, Filesystem, ScanError, WalkerConfig};
use crate::progress::ProgressCallback;

/// Join a directory path and a child name.
///
/// A separator is inserted unless `dir` already ends with one.
///
/// # Example
///
/// ```
/// use namedupe::scanner::join_child;
/// use std::ffi::OsStr;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(join_child(Path::new("./"), OsStr::new("a")), PathBuf::from("./a"));
/// assert_eq!(join_child(Path::new("dir"), OsStr::new("a")), PathBuf::from("dir/a"));
/// ```
#[must_use]
pub fn join_child(dir: &Path, name: &OsStr) -> PathBuf {
    let dir = dir.as_os_str();
    let mut joined = OsString::with_capacity(dir.len() + name.len() + 1);
    joined.push(dir);
    let ends_with_separator = dir
        .as_encoded_bytes()
        .last()
        .is_some_and(|&b| is_separator(char::from(b)));
    if !ends_with_separator {
        let mut sep = [0u8; 4];
        joined.push(MAIN_SEPARATOR.encode_utf8(&mut sep));
    }
    joined.push(name);
    PathBuf::from(joined)
}

/// Directory walker that appends every visible regular file to an index.
pub struct Walker<F> {
    /// Enumeration capability
    fs: F,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress callback
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl<F: Filesystem> Walker<F> {
    /// Create a new walker over the given filesystem.
    #[must_use]
    pub fn new(fs: F, config: WalkerConfig) -> Self {
        Self {
            fs,
            config,
            progress_callback: None,
        }
    }

    /// Set the progress callback, told about every indexed file.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walk the tree under `root` and return the populated index.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] raised while opening or listing any
    /// directory, including the root.
    pub fn walk(&self, root: impl AsRef<Path>) -> Result<EntryIndex, ScanError> {
        let mut index = EntryIndex::new();
        self.walk_into(root, &mut index)?;
        Ok(index)
    }

    /// Walk the tree under `root`, appending to an existing index.
    ///
    /// Entries appended before a failure stay in `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Walker::walk`].
    pub fn walk_into(
        &self,
        root: impl AsRef<Path>,
        index: &mut EntryIndex,
    ) -> Result<(), ScanError> {
        let root = root.as_ref();
        log::info!("Indexing {}", root.display());

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start("indexing", 0);
        }

        let result = self.read_dir(root, index);

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end("indexing");
        }

        result?;
        log::info!("Indexed {} files under {}", index.len(), root.display());
        Ok(())
    }

    fn read_dir(&self, dir: &Path, index: &mut EntryIndex) -> Result<(), ScanError> {
        let mut handle = self
            .fs
            .open_dir(dir)
            .map_err(|e| ScanError::from_io(dir, e))?;

        let children = handle.children();
        if let Err(e) = handle.close() {
            log::debug!("Failed to close {}: {}", dir.display(), e);
        }
        let children = children.map_err(|e| ScanError::from_io(dir, e))?;

        for child in children {
            if child.is_hidden() && !self.config.include_hidden {
                log::trace!("Skipping hidden entry {:?} in {}", child.name, dir.display());
                continue;
            }

            let path = join_child(dir, &child.name);

            if child.is_dir {
                self.read_dir(&path, index)?;
                continue;
            }

            log::trace!("Indexed #{}: {}", index.len(), path.display());
            if let Some(ref callback) = self.progress_callback {
                callback.on_progress(index.len() + 1, &child.name.to_string_lossy());
            }

            index.push(Entry::new(child.name, path).with_size(child.size));
        }

        Ok(())
    }
}
