//! namedupe - Filename Collision Finder
//!
//! Walks a directory tree, flags every file whose name already appeared
//! earlier in the walk, and lets the operator delete the later copies one
//! prompt at a time, all at once, or not at all.
//!
//! The run is a straight pipeline:
//!
//! 1. [`scanner::Walker`] builds the [`scanner::EntryIndex`] depth-first
//! 2. [`duplicates::Comparator`] flags later same-name entries with a worker pool
//! 3. [`actions::Disposer`] resolves each flagged entry against the sticky
//!    [`actions::DispositionState`]

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use actions::{remover_for, Disposer, DispositionState};
use cli::Cli;
use config::Config;
use duplicates::{Comparator, ComparatorConfig};
use error::ExitCode;
use progress::{Progress, ProgressCallback};
use scanner::{OsFilesystem, Walker, WalkerConfig};
use signal::ShutdownHandler;

/// Run the application with parsed command-line arguments.
///
/// Prompts are read from stdin and written to stdout.
///
/// # Errors
///
/// Returns an error if the tree cannot be read, the comparison fails, or a
/// duplicate cannot be disposed of.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load().merge_cli(&cli);
    let handler = signal::install_handler().unwrap_or_else(|e| {
        log::warn!("{}; Ctrl+C will terminate immediately", e);
        ShutdownHandler::new()
    });

    let stdin = io::stdin();
    run_with_io(&cli, &config, &handler, stdin.lock(), io::stdout())
}

/// Run the full pipeline against explicit prompt streams.
///
/// `config` must already include the command-line overrides.
///
/// # Errors
///
/// Same as [`run_app`].
pub fn run_with_io<I: BufRead, O: Write>(
    cli: &Cli,
    config: &Config,
    handler: &ShutdownHandler,
    input: I,
    output: O,
) -> Result<ExitCode> {
    if cli.delete {
        log::debug!("-d given; deletion is always offered, so it has no effect");
    }

    let progress: Option<Arc<dyn ProgressCallback>> = if cli.quiet || cli.no_progress {
        None
    } else {
        Some(Arc::new(Progress::new(false)))
    };

    let mut walker = Walker::new(OsFilesystem, WalkerConfig::new(config.include_hidden));
    if let Some(ref callback) = progress {
        walker = walker.with_progress_callback(Arc::clone(callback));
    }
    let mut index = walker
        .walk(&cli.directory)
        .with_context(|| format!("Failed to index {}", cli.directory.display()))?;

    let mut comparator_config = ComparatorConfig::default().with_shutdown_flag(handler.get_flag());
    if let Some(ref callback) = progress {
        comparator_config = comparator_config.with_progress_callback(Arc::clone(callback));
    }
    let mut duplicates = Comparator::new(comparator_config).find_duplicates(&mut index)?;

    if duplicates.is_empty() {
        log::info!("No duplicate names found");
        return Ok(ExitCode::Success);
    }
    log::info!(
        "Found {} duplicate(s) holding {} bytes",
        duplicates.len(),
        duplicates.total_size()
    );
    if config.sort_duplicates {
        duplicates.sort_by_position();
    }

    let mut state = DispositionState {
        silent_all: config.silent,
        list_only: config.list_only,
    };
    let mut disposer = Disposer::new(input, output, remover_for(config.trash));
    disposer.run(
        &mut state,
        duplicates
            .iter()
            .take_while(|_| !handler.is_shutdown_requested()),
    )?;

    if handler.is_shutdown_requested() {
        log::warn!("Interrupted before every duplicate was handled");
        return Ok(ExitCode::Interrupted);
    }
    Ok(ExitCode::Success)
}
