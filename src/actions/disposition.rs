//! Interactive, silent and list-only handling of flagged duplicates.
//!
//! # Overview
//!
//! The [`Disposer`] walks the duplicate set strictly in order. For each entry
//! it consults the sticky [`DispositionState`]:
//!
//! - `silent_all` set: the file is deleted without prompting
//! - `list_only` set: a `Duplicate: <path>` notice is printed
//! - neither: the operator is asked, and may answer `y`, `n`, `a` or `l`
//!
//! Answering `a` sets `silent_all` and `l` sets `list_only`. Neither is ever
//! cleared, so they govern every later entry of the run. Any other answer
//! repeats the prompt. A failed deletion or an unreadable answer ends the run.
//!
//! # Example
//!
//! ```no_run
//! use namedupe::actions::{Disposer, DispositionState, PermanentRemover};
//! use namedupe::duplicates::DuplicateSet;
//! use std::io;
//!
//! let duplicates = DuplicateSet::new();
//! let mut state = DispositionState::default();
//! let stdin = io::stdin();
//! let mut disposer = Disposer::new(stdin.lock(), io::stdout(), PermanentRemover);
//! let report = disposer.run(&mut state, &duplicates).unwrap();
//! println!("{}", report.summary());
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use super::delete::{DeleteError, DeleteResult, Remover};
use crate::scanner::Entry;

/// Sticky run-wide disposition flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispositionState {
    /// Delete every remaining duplicate without prompting.
    pub silent_all: bool,
    /// Report every remaining duplicate without deleting.
    pub list_only: bool,
}

impl DispositionState {
    /// State for a run started with `-s`.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            silent_all: true,
            list_only: false,
        }
    }

    /// State for a run started with `--list`.
    #[must_use]
    pub fn list_only() -> Self {
        Self {
            silent_all: false,
            list_only: true,
        }
    }

    /// Whether the operator still has to be asked.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.silent_all && !self.list_only
    }
}

/// An operator's answer to the deletion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Delete this file.
    Yes,
    /// Keep this file.
    No,
    /// Delete this file and every later one without asking.
    All,
    /// Delete nothing from here on; print notices instead.
    List,
}

impl Choice {
    /// Parse a response line. Whitespace and case are ignored.
    ///
    /// Returns `None` for anything unrecognised.
    #[must_use]
    pub fn parse(response: &str) -> Option<Self> {
        match response.trim().to_lowercase().as_str() {
            "y" | "yes" => Some(Self::Yes),
            "n" | "no" => Some(Self::No),
            "a" | "all" => Some(Self::All),
            "l" | "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// What happened to one duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was removed.
    Deleted(DeleteResult),
    /// The operator chose to keep the file.
    Skipped,
    /// The file was reported and kept.
    Listed,
}

/// Totals for a disposition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispositionReport {
    /// Files removed
    pub deleted: usize,
    /// Files kept on operator request
    pub skipped: usize,
    /// Files reported in list-only mode
    pub listed: usize,
    /// Prompts shown, including repeated ones
    pub prompts: usize,
    /// Bytes released by removed files
    pub bytes_freed: u64,
}

impl DispositionReport {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Deleted(result) => {
                self.deleted += 1;
                self.bytes_freed += result.size;
            }
            Outcome::Skipped => self.skipped += 1,
            Outcome::Listed => self.listed += 1,
        }
    }

    /// Human-readable summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} file(s), kept {}, listed {}, freed {} bytes",
            self.deleted, self.skipped, self.listed, self.bytes_freed
        )
    }
}

/// Errors that end a disposition run.
#[derive(Debug, thiserror::Error)]
pub enum DispositionError {
    /// The operator's response could not be read.
    #[error("failed to read response: {0}")]
    Input(#[source] io::Error),

    /// A prompt or notice could not be written.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// A flagged file could not be removed.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Sequential disposition engine.
///
/// Prompts and notices go to `output`, answers come from `input`, and
/// deletions go through `remover`.
pub struct Disposer<I, O, R> {
    input: I,
    output: O,
    remover: R,
    prompts: usize,
}

impl<I: BufRead, O: Write, R: Remover> Disposer<I, O, R> {
    /// Create a new disposer.
    #[must_use]
    pub fn new(input: I, output: O, remover: R) -> Self {
        Self {
            input,
            output,
            remover,
            prompts: 0,
        }
    }

    /// Consume the disposer, returning its input, output and remover.
    pub fn into_parts(self) -> (I, O, R) {
        (self.input, self.output, self.remover)
    }

    /// Process every duplicate in order.
    ///
    /// # Errors
    ///
    /// Stops at the first [`DispositionError`].
    pub fn run<'a>(
        &mut self,
        state: &mut DispositionState,
        duplicates: impl IntoIterator<Item = &'a Entry>,
    ) -> Result<DispositionReport, DispositionError> {
        let mut report = DispositionReport::default();
        let prompts_before = self.prompts;

        for entry in duplicates {
            let outcome = self.step(state, entry)?;
            report.record(&outcome);
        }

        report.prompts = self.prompts - prompts_before;
        log::info!("{}", report.summary());
        Ok(report)
    }

    /// Resolve and apply the fate of one duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`DispositionError::Input`] if no answer could be read and
    /// [`DispositionError::Delete`] if removal failed.
    pub fn step(
        &mut self,
        state: &mut DispositionState,
        entry: &Entry,
    ) -> Result<Outcome, DispositionError> {
        let path = entry.full_path.as_path();
        let mut confirmed = false;

        if state.is_interactive() {
            match self.ask(path)? {
                Choice::Yes => confirmed = true,
                Choice::No => {}
                Choice::All => {
                    log::debug!("Silent mode enabled by operator");
                    state.silent_all = true;
                    confirmed = true;
                }
                Choice::List => {
                    log::debug!("List-only mode enabled by operator");
                    state.list_only = true;
                }
            }
        }

        if state.silent_all || confirmed {
            let result = self.remover.remove(path)?;
            Ok(Outcome::Deleted(result))
        } else if state.list_only {
            writeln!(self.output, "Duplicate: {}", path.display())
                .map_err(DispositionError::Output)?;
            Ok(Outcome::Listed)
        } else {
            log::debug!("Kept {}", path.display());
            Ok(Outcome::Skipped)
        }
    }

    /// Prompt until a recognised answer is given.
    fn ask(&mut self, path: &Path) -> Result<Choice, DispositionError> {
        loop {
            self.prompts += 1;
            write!(
                self.output,
                "Do you want to delete file {}\n y - yes\n n - no\n a - all\n l - list only\n[y/n/a/l]: ",
                path.display()
            )
            .and_then(|()| self.output.flush())
            .map_err(DispositionError::Output)?;

            let mut response = String::new();
            let read = self
                .input
                .read_line(&mut response)
                .map_err(DispositionError::Input)?;
            if read == 0 {
                return Err(DispositionError::Input(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                )));
            }

            match Choice::parse(&response) {
                Some(choice) => return Ok(choice),
                None => log::debug!("Unrecognised response {:?}", response.trim()),
            }
        }
    }
}
