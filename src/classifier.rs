//! Extension-based classification of file names.
//!
//! Every file is keyed by its extension: the text from the last `.` to the end
//! of the name, dot included. The key is used verbatim as the name of the
//! destination folder, except for files without an extension.

/// Folder that collects every file without an extension.
///
/// Extension keys always begin with `.`, so this name never collides with an
/// extension folder.
pub const NO_EXTENSION_DIR: &str = "no_extension";

/// Returns the extension of a file name, including the leading dot.
///
/// Leading dots of a dot-file do not start an extension, so `.bashrc` has no
/// extension while `.config.toml` has `.toml`. Case is preserved.
///
/// # Examples
///
/// ```
/// use extsort::classifier::extension_of;
///
/// assert_eq!(extension_of("report.txt"), ".txt");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("README"), "");
/// assert_eq!(extension_of(".bashrc"), "");
/// ```
pub fn extension_of(file_name: &str) -> &str {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(idx) => &file_name[stem_start + idx..],
        None => "",
    }
}

/// Returns the folder name used for an extension key.
///
/// A bare `.` (a name ending in a dot) names no extension text and would alias
/// the target directory itself, so it shares the no-extension folder.
///
/// # Examples
///
/// ```
/// use extsort::classifier::{folder_name_for, NO_EXTENSION_DIR};
///
/// assert_eq!(folder_name_for(".pdf"), ".pdf");
/// assert_eq!(folder_name_for(""), NO_EXTENSION_DIR);
/// ```
pub fn folder_name_for(extension: &str) -> &str {
    if extension.is_empty() || extension == "." {
        NO_EXTENSION_DIR
    } else {
        extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_extension() {
        assert_eq!(extension_of("photo.png"), ".png");
        assert_eq!(extension_of("notes.md"), ".md");
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(extension_of("backup.tar.gz"), ".gz");
        assert_eq!(extension_of("v1.2.3.zip"), ".zip");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(extension_of("IMG_0001.JPG"), ".JPG");
        assert_ne!(extension_of("a.TXT"), extension_of("b.txt"));
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("Makefile"), "");
    }

    #[test]
    fn test_dotfiles() {
        assert_eq!(extension_of(".gitignore"), "");
        assert_eq!(extension_of("..hidden"), "");
        assert_eq!(extension_of(".env.local"), ".local");
    }

    #[test]
    fn test_trailing_dot() {
        assert_eq!(extension_of("weird."), ".");
    }

    #[test]
    fn test_folder_names() {
        assert_eq!(folder_name_for(".txt"), ".txt");
        assert_eq!(folder_name_for(""), "no_extension");
        assert_eq!(folder_name_for(extension_of("README")), NO_EXTENSION_DIR);
        assert_eq!(folder_name_for(extension_of("weird.")), NO_EXTENSION_DIR);
    }
}
