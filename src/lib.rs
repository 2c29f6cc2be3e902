//! extsort - sort the files of a directory into per-extension folders
//!
//! This library scans a directory for regular files, groups them by file
//! extension into subfolders such as `.pdf/` and `.png/`, asks before
//! replacing a file that is already in its folder, and appends every change
//! to a `log.txt` kept next to the organized directory.

pub mod activity_log;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod organizer;
pub mod output;
pub mod scanner;

pub use config::{Config, ConfigError};
pub use confirm::{AlwaysOverwrite, ConfirmationProvider, ConsolePrompt, NeverOverwrite};
pub use error::{OrganizeError, OrganizeResult};
pub use organizer::{FileOutcome, OrganizeReport, Organizer, RunOutcome};

pub use cli::{Args, run_cli};
