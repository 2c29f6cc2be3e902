//! Overwrite confirmation.
//!
//! The organizer never talks to the terminal directly. When a file would
//! replace one already in its extension folder it asks a
//! [`ConfirmationProvider`], which the binary backs with an interactive prompt
//! and tests back with a scripted answer list.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Decides whether an existing file in an extension folder may be replaced.
pub trait ConfirmationProvider {
    /// Returns true if `file_name` may overwrite the file of the same name in
    /// `destination`. Blocks until an answer is available.
    fn should_overwrite(&mut self, file_name: &str, destination: &Path) -> bool;
}

/// Asks the operator on a reader/writer pair, normally stdin and stdout.
///
/// Only `y` (case-insensitive, surrounding whitespace ignored) confirms. Any
/// other answer, end of input, or a failed read declines, and a declined
/// prompt is followed by a "File not overwritten" notice.
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, file_name: &str, destination: &Path) -> io::Result<bool> {
        write!(
            self.output,
            "\n{} already exists in\n{}.\nDo you want to overwrite it? (y/n): ",
            file_name,
            destination.display()
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output, "\nFile not overwritten")?;
            return Ok(false);
        }
        let confirmed = answer.trim().eq_ignore_ascii_case("y");
        if !confirmed {
            writeln!(self.output, "\nFile not overwritten")?;
        }
        Ok(confirmed)
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmationProvider for ConsolePrompt<R, W> {
    fn should_overwrite(&mut self, file_name: &str, destination: &Path) -> bool {
        match self.ask(file_name, destination) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, file = file_name, "overwrite prompt failed, declining");
                false
            }
        }
    }
}

/// Confirms every overwrite (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOverwrite;

impl ConfirmationProvider for AlwaysOverwrite {
    fn should_overwrite(&mut self, _file_name: &str, _destination: &Path) -> bool {
        true
    }
}

/// Declines every overwrite (`--no`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverOverwrite;

impl ConfirmationProvider for NeverOverwrite {
    fn should_overwrite(&mut self, _file_name: &str, _destination: &Path) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = {
            let mut prompt = ConsolePrompt::new(Cursor::new(input.as_bytes()), &mut output);
            prompt.should_overwrite("report.txt", Path::new("/data/.txt"))
        };
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_confirms() {
        assert!(answer("y\n").0);
        assert!(answer("Y\n").0);
        assert!(answer("  y  \r\n").0);
    }

    #[test]
    fn test_anything_else_declines() {
        assert!(!answer("n\n").0);
        assert!(!answer("yes\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("").0);
    }

    #[test]
    fn test_prompt_names_file_and_destination() {
        let (_, shown) = answer("n\n");
        assert!(shown.contains("report.txt"));
        assert!(shown.contains("/data/.txt"));
        assert!(shown.contains("(y/n)"));
        assert!(shown.contains("File not overwritten"));

        let (_, shown) = answer("y\n");
        assert!(!shown.contains("File not overwritten"));
    }

    #[test]
    fn test_reads_one_answer_per_prompt() {
        let mut output = Vec::new();
        let mut prompt = ConsolePrompt::new(Cursor::new(b"y\nn\n".as_slice()), &mut output);
        assert!(prompt.should_overwrite("a.txt", Path::new("/data/.txt")));
        assert!(!prompt.should_overwrite("b.txt", Path::new("/data/.txt")));
        assert!(!prompt.should_overwrite("c.txt", Path::new("/data/.txt")));
    }

    #[test]
    fn test_fixed_answers() {
        assert!(AlwaysOverwrite.should_overwrite("a", Path::new("/x")));
        assert!(!NeverOverwrite.should_overwrite("a", Path::new("/x")));
    }
}
