/// Sorting the files of a directory into per-extension folders.
///
/// The organizer works through the regular files of its target directory one
/// at a time, in listing order. For each file it ensures the extension folder
/// exists, asks for confirmation if a file of the same name is already there,
/// moves the file, and appends a line to the activity log kept next to the
/// target directory.
use crate::activity_log::{ActivityLog, DEFAULT_LOG_FILE_NAME};
use crate::classifier::{extension_of, folder_name_for};
use crate::confirm::ConfirmationProvider;
use crate::error::{OrganizeError, OrganizeResult};
use crate::scanner::{has_regular_file, regular_files};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What happened to a single file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Moved into its extension folder.
    Moved,
    /// Replaced a file of the same name after confirmation.
    Replaced,
    /// Overwrite declined; the file stays where it was.
    Declined,
    /// The file disappeared between the scan and the move.
    Vanished,
    /// Something other than a directory (possibly the file itself) occupies
    /// the extension folder's path; the file stays where it was.
    Blocked,
}

/// State of an extension folder after [`Organizer::ensure_folder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FolderState {
    Existing,
    Created,
    Blocked,
}

/// Record of one processed file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// Path of the file in the target directory, exactly as listed.
    pub source: PathBuf,
    /// File name for display and logging (lossy for non UTF-8 names).
    pub file_name: String,
    /// Extension key the file was classified under.
    pub extension: String,
    /// Extension folder the file was (or would have been) moved into.
    pub destination: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// Extension folders created during the run, in creation order.
    pub folders_created: Vec<PathBuf>,
    /// Every file processed, in processing order.
    pub files: Vec<ProcessedFile>,
}

impl OrganizeReport {
    /// Number of files with the given outcome.
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    /// Number of files that ended up in an extension folder.
    pub fn organized(&self) -> usize {
        self.count(FileOutcome::Moved) + self.count(FileOutcome::Replaced)
    }
}

/// Result of [`Organizer::run`].
#[derive(Debug)]
pub enum RunOutcome {
    /// The target directory held no regular files. Nothing was created or logged.
    NoFiles,
    /// The directory was processed.
    Completed(OrganizeReport),
}

/// A move that a real run would perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub file_name: String,
    pub extension: String,
    /// Extension folder the file would be moved into.
    pub destination: PathBuf,
    /// The folder does not exist yet and would be created.
    pub creates_folder: bool,
    /// A file of the same name is already in the folder; a real run would ask.
    pub needs_confirmation: bool,
    /// The folder's path is taken by something that is not a directory.
    pub blocked: bool,
}

/// Organizes the top-level files of one directory by extension.
///
/// The target directory and run timestamp are supplied by the caller; the
/// organizer reads no process-wide state such as the current directory or
/// clock.
#[derive(Debug, Clone)]
pub struct Organizer {
    target_dir: PathBuf,
    run_started: NaiveDateTime,
    log_file_name: String,
}

impl Organizer {
    /// Creates an organizer for `target_dir` whose log header carries `run_started`.
    pub fn new(target_dir: impl Into<PathBuf>, run_started: NaiveDateTime) -> Self {
        Self {
            target_dir: target_dir.into(),
            run_started,
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }

    /// Uses `name` instead of `log.txt` for the log file next to the target directory.
    pub fn with_log_file_name(mut self, name: impl Into<String>) -> Self {
        self.log_file_name = name.into();
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Location of the activity log: `<parent of target>/<log file name>`.
    pub fn log_path(&self) -> OrganizeResult<PathBuf> {
        let target = self.resolved_target()?;
        Ok(Self::parent_of(&target)?.join(&self.log_file_name))
    }

    /// Organizes the target directory.
    ///
    /// Files are handled strictly one after another. When a file of the same
    /// name already sits in the extension folder, `confirm` is asked and the
    /// run waits for its answer.
    ///
    /// # Errors
    ///
    /// Any failure to read the directory, open or write the log, create an
    /// extension folder, remove a file being replaced, or move a file aborts
    /// the run. Lines already written to the log stay intact.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extsort::confirm::NeverOverwrite;
    /// use extsort::organizer::{Organizer, RunOutcome};
    ///
    /// let organizer = Organizer::new("/home/me/Downloads", chrono::Local::now().naive_local());
    /// match organizer.run(&mut NeverOverwrite) {
    ///     Ok(RunOutcome::NoFiles) => println!("Nothing to do"),
    ///     Ok(RunOutcome::Completed(report)) => println!("{} files organized", report.organized()),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn run(&self, confirm: &mut dyn ConfirmationProvider) -> OrganizeResult<RunOutcome> {
        let target = self.resolved_target()?;
        let log_path = Self::parent_of(&target)?.join(&self.log_file_name);

        if !has_regular_file(&target)? {
            debug!(dir = %target.display(), "no regular files, nothing to do");
            return Ok(RunOutcome::NoFiles);
        }

        let mut log = ActivityLog::open(&log_path, self.run_started)?;
        debug!(log = %log.path().display(), "activity log opened");

        let mut report = OrganizeReport::default();
        for file in regular_files(&target)? {
            let processed = Self::process_file(&target, &file?, &mut log, confirm, &mut report)?;
            report.files.push(processed);
        }

        log.finish()?;
        Ok(RunOutcome::Completed(report))
    }

    /// Works out what [`Organizer::run`] would do without touching anything.
    ///
    /// Returns `None` when the directory holds no regular files.
    pub fn plan(&self) -> OrganizeResult<Option<Vec<PlannedMove>>> {
        let target = self.resolved_target()?;
        if !has_regular_file(&target)? {
            return Ok(None);
        }

        let mut planned_folders = BTreeSet::new();
        let mut moves = Vec::new();
        for file in regular_files(&target)? {
            let file = file?;
            let name = Self::file_name_of(&file)?;
            let file_name = name.to_string_lossy().to_string();
            let extension = extension_of(&file_name).to_string();
            let destination = target.join(folder_name_for(&extension));

            let blocked = destination.exists() && !destination.is_dir();
            let creates_folder =
                !destination.exists() && planned_folders.insert(destination.clone());
            let needs_confirmation = !blocked && destination.join(name).exists();

            moves.push(PlannedMove {
                file_name,
                extension,
                destination,
                creates_folder,
                needs_confirmation,
                blocked,
            });
        }
        Ok(Some(moves))
    }

    fn process_file(
        target: &Path,
        source: &Path,
        log: &mut ActivityLog,
        confirm: &mut dyn ConfirmationProvider,
        report: &mut OrganizeReport,
    ) -> OrganizeResult<ProcessedFile> {
        let name = Self::file_name_of(source)?;
        let file_name = name.to_string_lossy().to_string();
        let extension = extension_of(&file_name).to_string();
        let destination = target.join(folder_name_for(&extension));
        debug!(file = %file_name, extension = %extension, "classified");

        let outcome = match Self::ensure_folder(&destination)? {
            FolderState::Blocked => {
                warn!(
                    file = %file_name,
                    folder = %destination.display(),
                    "extension folder path is taken by a non-directory, leaving file in place"
                );
                FileOutcome::Blocked
            }
            state => {
                if state == FolderState::Created {
                    log.folder_created(&destination)?;
                    report.folders_created.push(destination.clone());
                }
                Self::move_into(source, name, &file_name, &destination, log, confirm)?
            }
        };
        Ok(ProcessedFile {
            source: source.to_path_buf(),
            file_name,
            extension,
            destination,
            outcome,
        })
    }

    /// Creates the extension folder if needed.
    fn ensure_folder(destination: &Path) -> OrganizeResult<FolderState> {
        match fs::symlink_metadata(destination) {
            Ok(meta) if meta.is_dir() => return Ok(FolderState::Existing),
            Ok(_) if destination.is_dir() => return Ok(FolderState::Existing),
            Ok(_) => return Ok(FolderState::Blocked),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(OrganizeError::FolderCreation {
                    path: destination.to_path_buf(),
                    source: e,
                });
            }
        }

        fs::create_dir(destination).map_err(|e| OrganizeError::FolderCreation {
            path: destination.to_path_buf(),
            source: e,
        })?;
        info!(folder = %destination.display(), "created extension folder");
        Ok(FolderState::Created)
    }

    fn move_into(
        source: &Path,
        name: &OsStr,
        file_name: &str,
        destination: &Path,
        log: &mut ActivityLog,
        confirm: &mut dyn ConfirmationProvider,
    ) -> OrganizeResult<FileOutcome> {
        let target_path = destination.join(name);

        if !source.exists() {
            warn!(file = %source.display(), "file vanished before it could be moved");
            return Ok(FileOutcome::Vanished);
        }

        if !target_path.exists() {
            if !Self::rename(source, &target_path)? {
                return Ok(FileOutcome::Vanished);
            }
            log.file_moved(file_name, destination)?;
            info!(file = file_name, to = %destination.display(), "moved");
            return Ok(FileOutcome::Moved);
        }

        if !confirm.should_overwrite(file_name, destination) {
            debug!(file = file_name, "overwrite declined");
            return Ok(FileOutcome::Declined);
        }

        // The answer may have taken a while; the source could be gone by now.
        if !source.exists() {
            warn!(file = %source.display(), "file vanished before it could be moved");
            return Ok(FileOutcome::Vanished);
        }

        fs::remove_file(&target_path).map_err(|e| OrganizeError::RemoveExisting {
            path: target_path.clone(),
            source: e,
        })?;
        if !Self::rename(source, &target_path)? {
            return Ok(FileOutcome::Vanished);
        }
        log.file_replaced(file_name, destination)?;
        info!(file = file_name, to = %destination.display(), "replaced");
        Ok(FileOutcome::Replaced)
    }

    /// Moves `source` to `target_path`. Returns false if the source vanished.
    fn rename(source: &Path, target_path: &Path) -> OrganizeResult<bool> {
        match fs::rename(source, target_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !source.exists() => {
                warn!(file = %source.display(), "file vanished before it could be moved");
                Ok(false)
            }
            Err(e) => Err(OrganizeError::FileMove {
                from: source.to_path_buf(),
                to: target_path.to_path_buf(),
                source: e,
            }),
        }
    }

    fn resolved_target(&self) -> OrganizeResult<PathBuf> {
        let target =
            fs::canonicalize(&self.target_dir).map_err(|e| OrganizeError::DirectoryAccess {
                path: self.target_dir.clone(),
                source: e,
            })?;
        if !target.is_dir() {
            return Err(OrganizeError::InvalidTargetDirectory {
                path: target,
                reason: "not a directory".to_string(),
            });
        }
        Ok(target)
    }

    fn parent_of(target: &Path) -> OrganizeResult<&Path> {
        target
            .parent()
            .ok_or_else(|| OrganizeError::InvalidTargetDirectory {
                path: target.to_path_buf(),
                reason: "has no parent directory to hold the log file".to_string(),
            })
    }

    fn file_name_of(path: &Path) -> OrganizeResult<&OsStr> {
        path.file_name().ok_or_else(|| OrganizeError::FileMove {
            from: path.to_path_buf(),
            to: PathBuf::new(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
        })
    }
}
