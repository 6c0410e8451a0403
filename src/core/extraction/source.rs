// src/core/extraction/source.rs
//! Source documents handed to the extraction models

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::error::ExtractionFailure;
use crate::utils::get_file_extension;

const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "webp"];

/// One page (or the whole PDF) as raw bytes with its MIME type.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DocumentPage {
    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }
}

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub pages: Vec<DocumentPage>,
}

impl SourceDocument {
    /// Load a PDF, a single page image, or a directory of page images.
    pub fn load(path: &Path) -> Result<Self, ExtractionFailure> {
        let metadata = std::fs::metadata(path).map_err(|source| ExtractionFailure::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let pages = if metadata.is_dir() {
            Self::load_directory(path)?
        } else {
            vec![Self::load_page(path)?]
        };

        app_log!(
            info,
            "Loaded source document {} ({} page(s))",
            path.display(),
            pages.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            pages,
        })
    }

    /// Wrap in-memory bytes; the MIME type is derived from `file_name`.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, ExtractionFailure> {
        let mime_type = mime_type_for(Path::new(file_name))?;
        Ok(Self {
            path: PathBuf::from(file_name),
            pages: vec![DocumentPage {
                file_name: file_name.to_string(),
                mime_type,
                bytes,
            }],
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(path: &Path) -> Result<DocumentPage, ExtractionFailure> {
        let mime_type = mime_type_for(path)?;
        let bytes = std::fs::read(path).map_err(|source| ExtractionFailure::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if bytes.is_empty() {
            return Err(ExtractionFailure::UnsupportedSource {
                path: path.to_path_buf(),
                reason: "file is empty".to_string(),
            });
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(DocumentPage {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Page images only, sorted by file name. PDFs inside a directory are
    /// ambiguous and rejected.
    fn load_directory(dir: &Path) -> Result<Vec<DocumentPage>, ExtractionFailure> {
        let unreadable = |source| ExtractionFailure::SourceUnreadable {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if !path.is_file() {
                continue;
            }
            match get_file_extension(&path).as_deref() {
                Some("pdf") => {
                    return Err(ExtractionFailure::UnsupportedSource {
                        path: dir.to_path_buf(),
                        reason: "directories may only contain page images".to_string(),
                    })
                }
                Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => paths.push(path),
                _ => app_log!(debug, "Ignoring {}", path.display()),
            }
        }

        if paths.is_empty() {
            return Err(ExtractionFailure::UnsupportedSource {
                path: dir.to_path_buf(),
                reason: "no page images found".to_string(),
            });
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        paths.iter().map(|path| Self::load_page(path)).collect()
    }
}

fn mime_type_for(path: &Path) -> Result<&'static str, ExtractionFailure> {
    let mime = match get_file_extension(path).as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        other => {
            return Err(ExtractionFailure::UnsupportedSource {
                path: path.to_path_buf(),
                reason: match other {
                    Some(ext) => format!(
                        "extension '.{}' is not one of {}",
                        ext,
                        SUPPORTED_EXTENSIONS.join(", ")
                    ),
                    None => "file has no extension".to_string(),
                },
            })
        }
    };
    Ok(mime)
}
