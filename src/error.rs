//! Error types shared by the scanner, the activity log and the organizer.

use std::path::PathBuf;

/// Errors that can occur while organizing a directory.
///
/// Every variant is fatal for the run. Declined overwrites and files that
/// vanish before they can be moved are per-file outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    /// The target directory (or its parent) cannot be read.
    #[error("Cannot access directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The target directory is not usable, e.g. it has no parent to hold the log.
    #[error("Invalid target directory {}: {reason}", .path.display())]
    InvalidTargetDirectory { path: PathBuf, reason: String },
    /// The activity log could not be opened.
    #[error("Failed to open log file {}: {source}", .path.display())]
    LogOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An activity log line could not be written.
    #[error("Failed to write log file: {source}")]
    LogWrite { source: std::io::Error },
    /// An extension folder could not be created.
    #[error("Failed to create directory {}: {source}", .path.display())]
    FolderCreation {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file could not be moved into its extension folder.
    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    FileMove {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The file being replaced during a confirmed overwrite could not be removed.
    #[error("Failed to remove existing file {}: {source}", .path.display())]
    RemoveExisting {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
