// src/core/fs_ops.rs
//! Blocking file system helpers used by the packager

use std::fs;
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::error::PackageError;

pub struct FsOps;

impl FsOps {
    pub fn ensure_dir_exists(path: &Path) -> Result<(), PackageError> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| PackageError::io(path, e))?;
            app_log!(debug, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub fn write_file_safe(path: &Path, content: &[u8]) -> Result<(), PackageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent)?;
        }

        fs::write(path, content).map_err(|e| PackageError::io(path, e))?;
        app_log!(debug, "Written file: {}", path.display());
        Ok(())
    }

    pub fn remove_dir_all(path: &Path) -> Result<(), PackageError> {
        if path.exists() {
            fs::remove_dir_all(path).map_err(|e| PackageError::io(path, e))?;
            app_log!(info, "Removed directory: {}", path.display());
        }
        Ok(())
    }

    pub fn remove_file(path: &Path) -> Result<(), PackageError> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| PackageError::io(path, e))?;
        }
        Ok(())
    }

    /// Remove whatever is at `path`, directory or file.
    pub fn remove_path(path: &Path) -> Result<(), PackageError> {
        if path.is_dir() {
            Self::remove_dir_all(path)
        } else {
            Self::remove_file(path)
        }
    }

    /// True when `path` exists and is not an empty directory.
    pub fn is_occupied(path: &Path) -> Result<bool, PackageError> {
        if !path.exists() {
            return Ok(false);
        }
        if !path.is_dir() {
            return Ok(true);
        }
        let mut entries = fs::read_dir(path).map_err(|e| PackageError::io(path, e))?;
        Ok(entries.next().is_some())
    }

    /// All files below `root`, depth first, sorted by name at every level.
    pub fn list_files_sorted(root: &Path) -> Result<Vec<PathBuf>, PackageError> {
        let mut entries: Vec<PathBuf> = fs::read_dir(root)
            .map_err(|e| PackageError::io(root, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(|e| PackageError::io(root, e))?;
        entries.sort();

        let mut files = Vec::new();
        for path in entries {
            if path.is_dir() {
                files.extend(Self::list_files_sorted(&path)?);
            } else {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Forward-slash path of `path` relative to `base`.
    pub fn relative_name(base: &Path, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(base).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_sorted() {
        let dir = TempDir::new().unwrap();
        FsOps::write_file_safe(&dir.path().join("b.txt"), b"b").unwrap();
        FsOps::write_file_safe(&dir.path().join("a/z.txt"), b"z").unwrap();
        FsOps::write_file_safe(&dir.path().join("README.md"), b"r").unwrap();

        let names: Vec<String> = FsOps::list_files_sorted(dir.path())
            .unwrap()
            .iter()
            .filter_map(|p| FsOps::relative_name(dir.path(), p))
            .collect();
        assert_eq!(names, vec!["README.md", "a/z.txt", "b.txt"]);
    }

    #[test]
    fn test_is_occupied() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("site");
        assert!(!FsOps::is_occupied(&target).unwrap());

        FsOps::ensure_dir_exists(&target).unwrap();
        assert!(!FsOps::is_occupied(&target).unwrap());

        FsOps::write_file_safe(&target.join("index.html"), b"x").unwrap();
        assert!(FsOps::is_occupied(&target).unwrap());

        FsOps::remove_dir_all(&target).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_remove_path_handles_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("site.zip");
        let nested = dir.path().join("site");
        FsOps::write_file_safe(&file, b"x").unwrap();
        FsOps::write_file_safe(&nested.join("index.html"), b"x").unwrap();

        FsOps::remove_path(&file).unwrap();
        FsOps::remove_path(&nested).unwrap();
        FsOps::remove_path(&dir.path().join("missing")).unwrap();
        assert!(!file.exists());
        assert!(!nested.exists());
    }
}
