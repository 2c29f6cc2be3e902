//! Append-only activity log.
//!
//! Each run appends a session header followed by one line per folder created,
//! file moved, or file replaced. The line formats are kept stable so existing
//! `log.txt` files stay readable by anything that already parses them:
//!
//! ```text
//!
//!
//! FILES EDITED AT 2025-09-01 14:30:52
//!
//! /home/me/Downloads/.pdf created
//! invoice.pdf moved to /home/me/Downloads/.pdf
//! notes.txt replaced in /home/me/Downloads/.txt
//! ```

use crate::error::{OrganizeError, OrganizeResult};
use chrono::NaiveDateTime;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default name of the log file, created next to the target directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";

/// Timestamp format of the session header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Open handle on the activity log for one run.
///
/// Every line is flushed as soon as it is written, so an aborted run leaves
/// only complete lines behind. The handle is flushed again when dropped.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ActivityLog {
    /// Opens `path` in append mode (creating it if needed) and writes the
    /// session header for a run started at `run_started`.
    pub fn open(path: &Path, run_started: NaiveDateTime) -> OrganizeResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| OrganizeError::LogOpen {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut log = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        log.write_line(&format!(
            "\n\nFILES EDITED AT {}\n",
            run_started.format(TIMESTAMP_FORMAT)
        ))?;
        Ok(log)
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records that an extension folder was created.
    pub fn folder_created(&mut self, destination: &Path) -> OrganizeResult<()> {
        self.write_line(&format!("{} created", destination.display()))
    }

    /// Records a plain move into an extension folder.
    pub fn file_moved(&mut self, file_name: &str, destination: &Path) -> OrganizeResult<()> {
        self.write_line(&format!("{} moved to {}", file_name, destination.display()))
    }

    /// Records a confirmed overwrite inside an extension folder.
    pub fn file_replaced(&mut self, file_name: &str, destination: &Path) -> OrganizeResult<()> {
        self.write_line(&format!(
            "{} replaced in {}",
            file_name,
            destination.display()
        ))
    }

    /// Flushes and closes the log, reporting any final write error.
    pub fn finish(mut self) -> OrganizeResult<()> {
        self.writer
            .flush()
            .map_err(|e| OrganizeError::LogWrite { source: e })
    }

    fn write_line(&mut self, line: &str) -> OrganizeResult<()> {
        writeln!(self.writer, "{}", line)
            .and_then(|()| self.writer.flush())
            .map_err(|e| OrganizeError::LogWrite { source: e })
    }
}

impl Drop for ActivityLog {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
