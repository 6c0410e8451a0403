// src/error.rs
//! Error taxonomy shared by every pipeline stage

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::extraction::Provider;

/// The extracted JSON parsed but does not have the minimal résumé shape.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("resume payload is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid section at index {index}: {reason}")]
    InvalidSection { index: usize, reason: String },

    #[error("resume payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Error)]
#[error("unknown theme '{id}'. Available themes: {available}")]
pub struct UnknownTheme {
    pub id: String,
    pub available: String,
}

/// The extraction gateway could not produce JSON. Never retried.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    #[error("{provider}: no API key configured")]
    MissingCredential { provider: Provider },

    #[error("{provider}: request failed: {source}")]
    Transport {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: service returned status {status}: {message}")]
    Api {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("{provider}: unexpected response shape: {detail}")]
    MalformedResponse { provider: Provider, detail: String },

    #[error("{provider}: model output is not JSON: {source}")]
    NotJson {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported source document {path}: {reason}")]
    UnsupportedSource { path: PathBuf, reason: String },

    #[error("failed to read source document {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("destination {0} already exists; pass replace to overwrite it")]
    DestinationExists(PathBuf),

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl PackageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Pipeline phase a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    Extraction,
    Validation,
    Rendering,
    Packaging,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Extraction => "extraction",
            Stage::Validation => "validation",
            Stage::Rendering => "rendering",
            Stage::Packaging => "packaging",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Theme(#[from] UnknownTheme),

    #[error(transparent)]
    Packaging(#[from] PackageError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Input { .. } => Stage::Input,
            PipelineError::Extraction(_) => Stage::Extraction,
            PipelineError::Schema(_) => Stage::Validation,
            PipelineError::Theme(_) => Stage::Rendering,
            PipelineError::Packaging(_) => Stage::Packaging,
        }
    }

    /// One-line status for the CLI, naming the failed stage.
    pub fn status_line(&self) -> String {
        format!("{} failed: {}", self.stage(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_attribution() {
        let err = PipelineError::from(SchemaError::MissingField("name"));
        assert_eq!(err.stage(), Stage::Validation);
        assert_eq!(
            err.status_line(),
            "validation failed: missing required field `name`"
        );

        let err = PipelineError::from(UnknownTheme {
            id: "retro".to_string(),
            available: "academic-light".to_string(),
        });
        assert_eq!(err.stage(), Stage::Rendering);

        let err = PipelineError::from(ExtractionFailure::MissingCredential {
            provider: Provider::Gemini,
        });
        assert_eq!(err.stage(), Stage::Extraction);
        assert!(err.status_line().starts_with("extraction failed: gemini"));
    }
}
