//! Filesystem enumeration seam.
//!
//! The walker never touches `std::fs` directly. It opens directories through
//! a [`Filesystem`], lists their children through the returned [`DirHandle`],
//! and closes the handle when done. [`OsFilesystem`] is the production
//! implementation; tests substitute in-memory trees.

use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildInfo {
    /// Base name of the child
    pub name: OsString,
    /// Whether the child is a directory (symlinks are not followed)
    pub is_dir: bool,
    /// Size in bytes
    pub size: u64,
}

impl ChildInfo {
    /// A regular file child with no metadata.
    #[must_use]
    pub fn file(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            size: 0,
        }
    }

    /// A directory child.
    #[must_use]
    pub fn dir(name: impl Into<OsString>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            size: 0,
        }
    }

    /// Whether the name starts with the hidden-file marker `.`.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.as_encoded_bytes().first() == Some(&b'.')
    }
}

/// An open directory.
pub trait DirHandle {
    /// List every child of the directory.
    fn children(&mut self) -> io::Result<Vec<ChildInfo>>;

    /// Release the handle.
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Capability to open directories for enumeration.
pub trait Filesystem {
    /// Open the directory at `path`.
    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle + '_>>;
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle + '_>> {
        (**self).open_dir(path)
    }
}

/// [`Filesystem`] backed by `std::fs`.
///
/// Children are sorted by name so traversal order is the same on every
/// platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn open_dir(&self, path: &Path) -> io::Result<Box<dyn DirHandle + '_>> {
        let read_dir = fs::read_dir(path)?;
        Ok(Box::new(OsDirHandle {
            path: path.to_path_buf(),
            read_dir: Some(read_dir),
        }))
    }
}

struct OsDirHandle {
    path: PathBuf,
    read_dir: Option<ReadDir>,
}

impl DirHandle for OsDirHandle {
    fn children(&mut self) -> io::Result<Vec<ChildInfo>> {
        let Some(read_dir) = self.read_dir.take() else {
            return Ok(Vec::new());
        };

        let mut children = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let metadata = entry.metadata()?;
            children.push(ChildInfo {
                name: entry.file_name(),
                is_dir: file_type.is_dir(),
                size: metadata.len(),
            });
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        log::trace!("Listed {} children of {}", children.len(), self.path.display());
        Ok(children)
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}
