//! Directory scanning.
//!
//! Lists the direct children of a directory that are regular files. The
//! listing is consumed lazily, so files that disappear while the scan is in
//! progress are simply not reported.

use crate::error::{OrganizeError, OrganizeResult};
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// Lazy iterator over the regular files directly inside a directory.
///
/// Yields paths in directory-listing order. Subdirectories are skipped and
/// nothing is recursed into. Symbolic links are followed when deciding whether
/// an entry is a regular file.
#[derive(Debug)]
pub struct RegularFiles {
    dir: PathBuf,
    entries: ReadDir,
}

impl Iterator for RegularFiles {
    type Item = OrganizeResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    return Some(Err(OrganizeError::DirectoryAccess {
                        path: self.dir.clone(),
                        source: e,
                    }));
                }
            };

            let path = entry.path();
            // Entries that vanish before they can be inspected are not files anymore.
            if fs::metadata(&path).is_ok_and(|meta| meta.is_file()) {
                return Some(Ok(path));
            }
        }
        None
    }
}

/// Starts a scan of the regular files in `dir`.
///
/// # Errors
///
/// Returns `OrganizeError::DirectoryAccess` if the directory cannot be listed.
pub fn regular_files(dir: &Path) -> OrganizeResult<RegularFiles> {
    let entries = fs::read_dir(dir).map_err(|e| OrganizeError::DirectoryAccess {
        path: dir.to_path_buf(),
        source: e,
    })?;

    Ok(RegularFiles {
        dir: dir.to_path_buf(),
        entries,
    })
}

/// Returns true if `dir` holds at least one regular file.
///
/// Stops at the first file found.
pub fn has_regular_file(dir: &Path) -> OrganizeResult<bool> {
    Ok(regular_files(dir)?.next().transpose()?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = regular_files(dir)
            .expect("Failed to scan")
            .map(|p| {
                p.expect("Scan error")
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_lists_only_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("a.txt"), "a").unwrap();
        fs::write(base_path.join("README"), "readme").unwrap();
        fs::create_dir(base_path.join("folder")).unwrap();
        fs::write(base_path.join("folder").join("nested.txt"), "nested").unwrap();

        assert_eq!(names(base_path), vec!["README", "a.txt"]);
    }

    #[test]
    fn test_has_regular_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        assert!(!has_regular_file(base_path).unwrap());

        fs::create_dir(base_path.join(".txt")).unwrap();
        assert!(!has_regular_file(base_path).unwrap());

        fs::write(base_path.join("notes.txt"), "notes").unwrap();
        assert!(has_regular_file(base_path).unwrap());
    }

    #[test]
    fn test_missing_directory_is_access_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let result = regular_files(&missing);
        assert!(matches!(result, Err(OrganizeError::DirectoryAccess { .. })));
        assert!(has_regular_file(&missing).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_counts_as_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let outside = TempDir::new().expect("Failed to create temp directory");

        let real = outside.path().join("real.txt");
        fs::write(&real, "real").unwrap();
        std::os::unix::fs::symlink(&real, base_path.join("link.txt")).unwrap();
        std::os::unix::fs::symlink(outside.path(), base_path.join("dirlink")).unwrap();

        assert_eq!(names(base_path), vec!["link.txt"]);
    }
}
