//! Input directory scanner using the `ignore` crate.
//!
//! Only the top level of the directory is listed. Symlinks are resolved, so a
//! link to a kernel file is scanned like the file itself. Hidden files are skipped and
//! no `.gitignore`/`.ignore` rules apply: every visible regular file is treated
//! as a kernel. Results are sorted by file name so batches run in a stable order.

use crate::error::ScanError;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// List the kernel files directly inside `root`.
pub fn scan_kernels(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .max_depth(Some(1))
        .follow_links(true) // Symlinked kernels count as files
        .hidden(true) // Skip dotfiles
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        match entry {
            Ok(entry) => {
                if entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable entry: {}", e),
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Scanned kernel directory");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_lists_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b"), "1\n").unwrap();
        fs::write(dir.path().join("a"), "1\n").unwrap();
        fs::write(dir.path().join("c.graph"), "1\n").unwrap();

        let files = scan_kernels(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c.graph"]);
    }

    #[test]
    fn test_scan_skips_hidden_and_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden"), "1\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner"), "1\n").unwrap();
        fs::write(dir.path().join("top"), "1\n").unwrap();

        let files = scan_kernels(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top"));
    }

    #[test]
    fn test_scan_ignores_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*\n").unwrap();
        fs::write(dir.path().join("kernel"), "1\n").unwrap();

        let files = scan_kernels(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_kernels() {
        let dir = TempDir::new().unwrap();
        let store = dir.path().join("store");
        let kernels = dir.path().join("kernels");
        fs::create_dir(&store).unwrap();
        fs::create_dir(&kernels).unwrap();
        fs::write(store.join("real"), "1\n").unwrap();
        fs::write(kernels.join("plain"), "1\n").unwrap();
        std::os::unix::fs::symlink(store.join("real"), kernels.join("linked")).unwrap();

        let files = scan_kernels(&kernels).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["linked", "plain"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_broken_symlink() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plain"), "1\n").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let files = scan_kernels(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("plain"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let err = scan_kernels(Path::new("/no/such/kernels")).unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }

    #[test]
    fn test_scan_file_is_not_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("kernel");
        fs::write(&file, "1\n").unwrap();

        let err = scan_kernels(&file).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }
}
