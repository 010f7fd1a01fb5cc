//! Command-line interface definitions for namedupe.
//!
//! This module defines all CLI arguments using the clap derive API.
//! `-h` selects hidden-file mode, so help is only available as `--help`.
//!
//! # Example
//!
//! ```bash
//! # Ask about every duplicate name under ~/Music
//! namedupe ~/Music
//!
//! # Include dotfiles and delete every later copy without asking
//! namedupe -h -s ~/Music
//!
//! # Only report, in traversal order
//! namedupe --list --sort ~/Music
//!
//! # Verbose mode for debugging
//! namedupe -v ~/Music
//! ```

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Find files whose names collide and remove the later copies.
///
/// The first file seen with a given name is always kept. Every later file
/// with the same name is offered for deletion, one prompt at a time.
#[derive(Debug, Parser)]
#[command(name = "namedupe")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Include hidden entries (names starting with .)
    #[arg(short = 'h', long = "hidden")]
    pub hidden: bool,

    /// Accepted for compatibility; has no effect
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,

    /// Delete every duplicate without prompting
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Print duplicates without deleting or prompting
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Move duplicates to the system trash instead of removing them
    #[arg(long)]
    pub trash: bool,

    /// Process duplicates in traversal order instead of completion order
    #[arg(long)]
    pub sort: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Directory to scan
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,
}
