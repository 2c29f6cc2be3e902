//! Output formatting and styling module.
//!
//! Every user-facing line printed by the CLI goes through [`OutputFormatter`],
//! so colors and symbols stay consistent.

use colored::*;
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extsort::output::OutputFormatter;
    /// OutputFormatter::success("Files organized successfully");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints a table of file counts per extension folder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extsort::output::OutputFormatter;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert(".pdf".to_string(), 15);
    /// counts.insert(".png".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 23);
    /// ```
    pub fn summary_table(folder_counts: &BTreeMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        let width = folder_counts
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max(6); // "Folder"

        println!("{:<width$} | {}", "Folder".bold(), "Files".bold(), width = width);
        println!("{}", "-".repeat(width + 10));

        for (folder, count) in folder_counts {
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                Self::file_word(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            Self::file_word(total_files),
            width = width
        );
    }

    /// "file" or "files" depending on `count`.
    pub fn file_word(count: usize) -> &'static str {
        if count == 1 { "file" } else { "files" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_word() {
        assert_eq!(OutputFormatter::file_word(0), "files");
        assert_eq!(OutputFormatter::file_word(1), "file");
        assert_eq!(OutputFormatter::file_word(7), "files");
    }
}
