//! Concurrent name comparison over a fully built index.
//!
//! # Overview
//!
//! The [`Comparator`] runs a fixed pool of worker threads draining a bounded
//! work queue. The index is enqueued in position order and the queue is then
//! closed. For an entry `e`, a worker scans the index from position 0:
//!
//! - a candidate at or after `e`'s position ends the scan (`e` is unique)
//! - a candidate with the same name flags `e` and ends the scan
//!
//! The first entry carrying a given name is therefore never flagged, and
//! every later one is flagged against it independently.
//!
//! A worker failure raises a shared cancel flag: the producer stops
//! enqueuing, the other workers stop pulling, and the first recorded error is
//! returned once every worker has been joined.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::duplicates::{Comparator, ComparatorConfig};
//! use namedupe::scanner::{OsFilesystem, Walker, WalkerConfig};
//!
//! let mut index = Walker::new(OsFilesystem, WalkerConfig::default())
//!     .walk(".")
//!     .unwrap();
//!
//! let comparator = Comparator::new(ComparatorConfig::default());
//! let duplicates = comparator.find_duplicates(&mut index).unwrap();
//! for entry in &duplicates {
//!     println!("Duplicate: {}", entry.full_path.display());
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver};

use super::DuplicateSet;
use crate::progress::ProgressCallback;
use crate::scanner::{Entry, EntryIndex};

/// Number of comparison workers used by the application.
pub const DEFAULT_WORKERS: usize = 64;

/// Configuration for the comparator.
#[derive(Clone)]
pub struct ComparatorConfig {
    /// Number of worker threads, also the work queue capacity.
    pub workers: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ComparatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorConfig")
            .field("workers", &self.workers)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl ComparatorConfig {
    /// Set the worker count (at least 1).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Errors that can stop the comparison phase.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// The comparison was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Comparison interrupted by user")]
    Interrupted,

    /// The duplicate set lock was poisoned by a failing worker.
    #[error("Duplicate set lock poisoned")]
    Poisoned,

    /// A worker thread panicked.
    #[error("Comparison worker panicked")]
    WorkerPanicked,

    /// A worker thread could not be started.
    #[error("Failed to spawn comparison worker: {0}")]
    Spawn(#[source] std::io::Error),
}

/// State shared by the producer and every worker of one run.
struct Shared<'a> {
    index: &'a EntryIndex,
    duplicates: Mutex<DuplicateSet>,
    cancel: AtomicBool,
    first_error: Mutex<Option<CompareError>>,
    processed: AtomicUsize,
}

impl Shared<'_> {
    /// Record `err` if no error was recorded yet, and cancel the run.
    fn fail(&self, err: CompareError) {
        self.cancel.store(true, Ordering::SeqCst);
        if let Ok(mut slot) = self.first_error.lock() {
            if slot.is_none() {
                log::debug!("Comparison failing fast: {}", err);
                *slot = Some(err);
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }
}

/// Worker pool that flags entries whose name already appeared earlier.
#[derive(Debug, Default)]
pub struct Comparator {
    config: ComparatorConfig,
}

impl Comparator {
    /// Create a new comparator with the given configuration.
    #[must_use]
    pub fn new(config: ComparatorConfig) -> Self {
        Self { config }
    }

    /// Create a new comparator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ComparatorConfig::default())
    }

    /// Flag every entry whose name matches an entry at a smaller position.
    ///
    /// Positions are reassigned to match the index order before dispatch.
    /// The returned set is in worker completion order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompareError`] reported by any worker, or
    /// [`CompareError::Interrupted`] if shutdown was requested.
    pub fn find_duplicates(&self, index: &mut EntryIndex) -> Result<DuplicateSet, CompareError> {
        let start_time = Instant::now();
        index.assign_positions();
        let index: &EntryIndex = index;

        if self.config.is_shutdown_requested() {
            return Err(CompareError::Interrupted);
        }

        let workers = self.config.workers.max(1);
        log::info!(
            "Comparing {} entries with {} workers",
            index.len(),
            workers
        );

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("comparing", index.len());
        }

        let shared = Shared {
            index,
            duplicates: Mutex::new(DuplicateSet::new()),
            cancel: AtomicBool::new(false),
            first_error: Mutex::new(None),
            processed: AtomicUsize::new(0),
        };

        thread::scope(|scope| {
            let (sender, receiver) = bounded::<&Entry>(workers);

            let mut handles = Vec::with_capacity(workers);
            for id in 0..workers {
                let receiver = receiver.clone();
                let shared = &shared;
                let spawned = thread::Builder::new()
                    .name(format!("compare-{id}"))
                    .spawn_scoped(scope, move || self.worker(id, receiver, shared));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        shared.fail(CompareError::Spawn(e));
                        break;
                    }
                }
            }
            drop(receiver);

            for entry in index {
                if shared.is_cancelled() {
                    break;
                }
                if self.config.is_shutdown_requested() {
                    shared.fail(CompareError::Interrupted);
                    break;
                }
                if sender.send(entry).is_err() {
                    // Every worker has exited.
                    break;
                }
            }
            drop(sender);

            for handle in handles {
                if handle.join().is_err() {
                    shared.fail(CompareError::WorkerPanicked);
                }
            }
        });

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("comparing");
        }

        let first_error = shared
            .first_error
            .into_inner()
            .map_err(|_| CompareError::Poisoned)?;
        if let Some(err) = first_error {
            return Err(err);
        }
        if self.config.is_shutdown_requested() {
            return Err(CompareError::Interrupted);
        }

        let duplicates = shared
            .duplicates
            .into_inner()
            .map_err(|_| CompareError::Poisoned)?;

        log::info!(
            "Comparison complete: {} of {} entries are duplicates ({:.2?})",
            duplicates.len(),
            index.len(),
            start_time.elapsed()
        );

        Ok(duplicates)
    }

    /// Drain the queue until it is closed or the run is cancelled.
    fn worker(&self, id: usize, receiver: Receiver<&Entry>, shared: &Shared<'_>) {
        for entry in receiver.iter() {
            if shared.is_cancelled() {
                break;
            }
            if self.config.is_shutdown_requested() {
                shared.fail(CompareError::Interrupted);
                break;
            }

            if let Err(e) = compare(entry, shared.index, &shared.duplicates) {
                shared.fail(e);
                break;
            }

            let processed = shared.processed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(processed, &entry.name.to_string_lossy());
            }
        }
        log::trace!("Comparison worker {} finished", id);
    }
}

/// Scan `index` from position 0 for an earlier entry named like `entry`.
///
/// Appends `entry` to `duplicates` on the first match.
fn compare(
    entry: &Entry,
    index: &EntryIndex,
    duplicates: &Mutex<DuplicateSet>,
) -> Result<(), CompareError> {
    for candidate in index {
        if candidate.position >= entry.position {
            return Ok(());
        }

        if candidate.name == entry.name {
            log::trace!(
                "{} duplicates {}",
                entry.full_path.display(),
                candidate.full_path.display()
            );
            duplicates
                .lock()
                .map_err(|_| CompareError::Poisoned)?
                .push(entry.clone());
            return Ok(());
        }
    }

    Ok(())
}
