// src/core/packager.rs
//! Writes the rendered page and a deployment README, then zips them.
//!
//! Archives are reproducible: entries are added in sorted order with a fixed
//! timestamp (1980-01-01) and fixed permissions, so identical input yields an
//! identical zip.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::app_log;
use crate::core::fs_ops::FsOps;
use crate::error::PackageError;
use crate::types::ResumeRecord;
use crate::utils::slugify;

pub const INDEX_FILE: &str = "index.html";
pub const README_FILE: &str = "README.md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub dir: PathBuf,
    /// Delete a non-empty `dir` and an existing `<dir>.zip` before writing.
    /// Off by default.
    pub replace_existing: bool,
}

impl Destination {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            replace_existing: false,
        }
    }

    pub fn replacing(mut self, replace_existing: bool) -> Self {
        self.replace_existing = replace_existing;
        self
    }

    /// `<dir>.zip`, next to the directory.
    pub fn archive_path(&self) -> Result<PathBuf, PackageError> {
        let name = self.dir.file_name().ok_or_else(|| {
            PackageError::io(
                &self.dir,
                io::Error::new(io::ErrorKind::InvalidInput, "destination has no directory name"),
            )
        })?;
        let mut archive = OsString::from(name);
        archive.push(".zip");
        Ok(self.dir.with_file_name(archive))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageResult {
    pub index_path: PathBuf,
    pub readme_path: PathBuf,
    pub archive_path: PathBuf,
}

pub struct ProjectPackager;

impl ProjectPackager {
    /// Write the project into `destination.dir` and zip it to `<dir>.zip`.
    ///
    /// An occupied directory or an existing archive is only removed when
    /// `replace_existing` is set; otherwise nothing is touched.
    pub fn package(
        html: &str,
        record: &ResumeRecord,
        destination: &Destination,
    ) -> Result<PackageResult, PackageError> {
        let dir = &destination.dir;
        let archive_path = destination.archive_path()?;

        let dir_occupied = FsOps::is_occupied(dir)?;
        let archive_exists = archive_path.exists();

        if !destination.replace_existing {
            if dir_occupied {
                return Err(PackageError::DestinationExists(dir.clone()));
            }
            if archive_exists {
                return Err(PackageError::DestinationExists(archive_path));
            }
        }

        if dir_occupied {
            app_log!(warn, "Replacing existing destination {}", dir.display());
            FsOps::remove_path(dir)?;
        }
        if archive_exists {
            app_log!(warn, "Replacing existing archive {}", archive_path.display());
            FsOps::remove_path(&archive_path)?;
        }

        if let Err(err) = Self::write_project(html, record, dir) {
            Self::discard(dir, None);
            return Err(err);
        }

        let archive = match create_archive_file(&archive_path) {
            Ok(file) => file,
            Err(err) => {
                Self::discard(dir, None);
                return Err(err);
            }
        };

        if let Err(err) = write_archive(dir, archive, &archive_path) {
            Self::discard(dir, Some(&archive_path));
            return Err(err);
        }

        app_log!(
            info,
            "Packaged homepage for {} into {}",
            record.name,
            archive_path.display()
        );

        Ok(PackageResult {
            index_path: dir.join(INDEX_FILE),
            readme_path: dir.join(README_FILE),
            archive_path,
        })
    }

    fn write_project(html: &str, record: &ResumeRecord, dir: &Path) -> Result<(), PackageError> {
        FsOps::ensure_dir_exists(dir)?;
        FsOps::write_file_safe(&dir.join(INDEX_FILE), html.as_bytes())?;
        FsOps::write_file_safe(&dir.join(README_FILE), readme(record).as_bytes())
    }

    /// Best-effort cleanup. `archive` is only passed once this call created it.
    fn discard(dir: &Path, archive: Option<&Path>) {
        app_log!(error, "Packaging failed, cleaning up {}", dir.display());
        if let Err(cleanup) = FsOps::remove_dir_all(dir) {
            app_log!(warn, "Cleanup failed: {}", cleanup);
        }
        if let Some(archive) = archive {
            if let Err(cleanup) = FsOps::remove_file(archive) {
                app_log!(warn, "Cleanup failed: {}", cleanup);
            }
        }
    }
}

/// Open `archive_path` for writing; fails if anything is already there.
fn create_archive_file(archive_path: &Path) -> Result<File, PackageError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(archive_path)
        .map_err(|e| PackageError::io(archive_path, e))
}

/// Zip every file below `dir` into `file` with relative names.
pub fn write_archive(dir: &Path, file: File, archive_path: &Path) -> Result<(), PackageError> {
    let archive_err = |source| PackageError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };

    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    for path in FsOps::list_files_sorted(dir)? {
        let Some(name) = FsOps::relative_name(dir, &path) else {
            continue;
        };
        let bytes = std::fs::read(&path).map_err(|e| PackageError::io(&path, e))?;

        zip.start_file(name.as_str(), options).map_err(archive_err)?;
        zip.write_all(&bytes)
            .map_err(|e| PackageError::io(archive_path, e))?;
        app_log!(trace, "Archived {}", name);
    }

    zip.finish().map_err(archive_err)?;
    Ok(())
}

/// GitHub Pages deployment notes, parametrized only by the display name.
pub fn readme(record: &ResumeRecord) -> String {
    let name = record.name.trim();
    let slug = slugify(name);

    format!(
        "# {name} Homepage\n\
         \n\
         Static personal homepage generated from a résumé. Everything lives in\n\
         `index.html`; there are no external assets.\n\
         \n\
         ## Deploy to GitHub Pages\n\
         \n\
         1. Create a public repository, for example `{slug}.github.io`.\n\
         2. Upload `index.html` and this `README.md` to the `main` branch.\n\
         3. Open Settings → Pages and set Source to `main` / root.\n\
         4. Visit `https://{slug}.github.io` once the deployment finishes.\n\
         \n\
         ## Preview locally\n\
         \n\
         Open `index.html` in any browser.\n"
    )
}
