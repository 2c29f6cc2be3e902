//! Command-line interface module for extsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration loading and target directory resolution
//! - Choosing how overwrite conflicts are answered
//! - Reporting the outcome of a run or a dry run

use crate::config::Config;
use crate::confirm::{AlwaysOverwrite, ConfirmationProvider, ConsolePrompt, NeverOverwrite};
use crate::organizer::{FileOutcome, OrganizeReport, Organizer, RunOutcome};
use crate::output::OutputFormatter;
use chrono::NaiveDateTime;
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Sort the files of a directory into one subfolder per extension.
#[derive(Debug, Clone, Parser)]
#[command(name = "extsort", version, about)]
pub struct Args {
    /// Directory to organize. Defaults to organizer.target_dir from the configuration.
    pub target_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default lookup.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show what would be moved without changing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing files without asking.
    #[arg(short = 'y', long, conflicts_with = "no")]
    pub yes: bool,

    /// Never overwrite existing files; leave conflicting files in place.
    #[arg(short = 'n', long)]
    pub no: bool,

    /// Print diagnostic output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// How overwrite conflicts are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Ask on the terminal for every conflict.
    Ask,
    Always,
    Never,
}

impl Args {
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        match (self.yes, self.no) {
            (true, _) => OverwritePolicy::Always,
            (false, true) => OverwritePolicy::Never,
            (false, false) => OverwritePolicy::Ask,
        }
    }
}

/// Runs the CLI application with parsed arguments.
///
/// `run_started` is stamped into the activity log header.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use extsort::cli::{run_cli, Args};
///
/// let args = Args::parse_from(["extsort", "/path/to/directory", "--no"]);
/// match run_cli(&args, chrono::Local::now().naive_local()) {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(args: &Args, run_started: NaiveDateTime) -> Result<(), String> {
    let config = Config::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let target_dir = config
        .resolve_target_dir(args.target_dir.as_deref())
        .map_err(|e| e.to_string())?;

    let organizer = Organizer::new(target_dir, run_started)
        .with_log_file_name(config.organizer.log_file_name.as_str());

    if args.dry_run {
        return organize_directory_dry_run(&organizer);
    }

    match args.overwrite_policy() {
        OverwritePolicy::Ask => organize_directory(&organizer, &mut ConsolePrompt::stdio()),
        OverwritePolicy::Always => organize_directory(&organizer, &mut AlwaysOverwrite),
        OverwritePolicy::Never => organize_directory(&organizer, &mut NeverOverwrite),
    }
}

/// Organizes the organizer's target directory and reports the outcome.
///
/// Prints a notice and returns `Ok` when there is nothing to organize.
pub fn organize_directory(
    organizer: &Organizer,
    confirm: &mut dyn ConfirmationProvider,
) -> Result<(), String> {
    OutputFormatter::info(&format!(
        "Organizing contents of: {}",
        organizer.target_dir().display()
    ));

    let report = match organizer.run(confirm) {
        Ok(RunOutcome::NoFiles) => {
            OutputFormatter::warning(
                "No files found in the directory. Please add files to the directory before organizing.",
            );
            return Ok(());
        }
        Ok(RunOutcome::Completed(report)) => report,
        Err(e) => return Err(e.to_string()),
    };

    print_report(&report);

    if let Ok(log_path) = organizer.log_path() {
        OutputFormatter::plain(&format!("Activity logged to {}", log_path.display()));
    }
    OutputFormatter::success("Files organized successfully");
    Ok(())
}

/// Shows what organizing the target directory would do, without changing anything.
pub fn organize_directory_dry_run(organizer: &Organizer) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing contents of: {}",
        organizer.target_dir().display()
    ));

    let plan = organizer.plan().map_err(|e| e.to_string())?;
    let Some(plan) = plan else {
        OutputFormatter::warning(
            "No files found in the directory. Please add files to the directory before organizing.",
        );
        return Ok(());
    };

    OutputFormatter::header("Files would be organized as follows:");
    let mut folder_counts: BTreeMap<String, usize> = BTreeMap::new();
    for planned in &plan {
        let folder = folder_label(&planned.destination);
        if planned.creates_folder {
            OutputFormatter::plain(&format!(
                " + {} would be created",
                planned.destination.display()
            ));
        }
        OutputFormatter::plain(&format!(" - {}", planned.file_name));
        if planned.blocked {
            OutputFormatter::warning(&format!(
                "   {} is not a directory, would be left in place",
                planned.destination.display()
            ));
            continue;
        }
        if planned.needs_confirmation {
            OutputFormatter::warning(&format!(
                "   already exists in {}/, would ask before overwriting",
                folder
            ));
        } else {
            OutputFormatter::plain(&format!("   → Would move to {}/", folder));
        }
        *folder_counts.entry(folder).or_insert(0) += 1;
    }

    OutputFormatter::summary_table(&folder_counts, plan.len());
    OutputFormatter::dry_run_notice("No files were modified.");
    Ok(())
}

fn print_report(report: &OrganizeReport) {
    let mut folder_counts: BTreeMap<String, usize> = BTreeMap::new();

    for file in &report.files {
        let folder = folder_label(&file.destination);
        match file.outcome {
            FileOutcome::Moved => {
                OutputFormatter::plain(&format!(" ✓ {} → {}/", file.file_name, folder));
            }
            FileOutcome::Replaced => {
                OutputFormatter::plain(&format!(" ✓ {} replaced in {}/", file.file_name, folder));
            }
            FileOutcome::Declined => {
                OutputFormatter::warning(&format!("{}: file not overwritten", file.file_name));
            }
            FileOutcome::Vanished => {
                OutputFormatter::warning(&format!(
                    "{}: disappeared before it could be moved",
                    file.file_name
                ));
            }
            FileOutcome::Blocked => {
                OutputFormatter::warning(&format!(
                    "{}: {} is not a directory, file left in place",
                    file.file_name,
                    file.destination.display()
                ));
            }
        }
        if matches!(file.outcome, FileOutcome::Moved | FileOutcome::Replaced) {
            *folder_counts.entry(folder).or_insert(0) += 1;
        }
    }

    if !report.folders_created.is_empty() {
        OutputFormatter::plain(&format!(
            "Created {} extension {}",
            report.folders_created.len(),
            if report.folders_created.len() == 1 {
                "folder"
            } else {
                "folders"
            }
        ));
    }

    OutputFormatter::summary_table(&folder_counts, report.organized());

    let declined = report.count(FileOutcome::Declined);
    if declined > 0 {
        OutputFormatter::warning(&format!(
            "{} {} left in place (not overwritten)",
            declined,
            OutputFormatter::file_word(declined)
        ));
    }
    let vanished = report.count(FileOutcome::Vanished);
    if vanished > 0 {
        OutputFormatter::warning(&format!(
            "{} {} disappeared during the run",
            vanished,
            OutputFormatter::file_word(vanished)
        ));
    }
    let blocked = report.count(FileOutcome::Blocked);
    if blocked > 0 {
        OutputFormatter::warning(&format!(
            "{} {} left in place (extension folder path is not a directory)",
            blocked,
            OutputFormatter::file_word(blocked)
        ));
    }
}

fn folder_label(destination: &Path) -> String {
    destination
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::parse_from(["extsort", "/tmp/inbox"]);
        assert_eq!(args.target_dir, Some(PathBuf::from("/tmp/inbox")));
        assert!(!args.dry_run);
        assert_eq!(args.overwrite_policy(), OverwritePolicy::Ask);
    }

    #[test]
    fn test_parse_without_target() {
        let args = Args::parse_from(["extsort", "--dry-run"]);
        assert_eq!(args.target_dir, None);
        assert!(args.dry_run);
    }

    #[test]
    fn test_overwrite_flags() {
        let args = Args::parse_from(["extsort", "dir", "--yes"]);
        assert_eq!(args.overwrite_policy(), OverwritePolicy::Always);

        let args = Args::parse_from(["extsort", "dir", "-n"]);
        assert_eq!(args.overwrite_policy(), OverwritePolicy::Never);
    }

    #[test]
    fn test_yes_and_no_conflict() {
        let result = Args::try_parse_from(["extsort", "dir", "--yes", "--no"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_flag() {
        let args = Args::parse_from(["extsort", "--config", "/etc/extsort.toml", "-v"]);
        assert_eq!(args.config, Some(PathBuf::from("/etc/extsort.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_folder_label() {
        assert_eq!(folder_label(Path::new("/data/.txt")), ".txt");
        assert_eq!(folder_label(Path::new("/data/no_extension")), "no_extension");
    }
}
