//! Résumé to static homepage generator.
//!
//! A vendor model extracts structured résumé JSON from a PDF or page images,
//! [`types::resume::parse_resume_record`] validates it, one of the registered
//! themes renders it to a self-contained HTML page and the packager writes the
//! page plus a deployment README to a directory and a zip archive.

pub mod logging;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod generator;
pub mod types;
pub mod utils;

use serde_json::Value;
use std::path::PathBuf;

pub use config::SiteConfig;
pub use crate::core::{
    get_renderer, list_themes, render, render_batch, Destination, PackageResult, ProjectPackager,
    ThemeInfo, ThemeRenderer,
};
pub use error::{ExtractionFailure, PackageError, PipelineError, SchemaError, Stage, UnknownTheme};
pub use generator::SiteGenerator;
pub use types::resume::parse_resume_record;
pub use types::ResumeRecord;

/// Convenience function: validate `raw`, render it with `theme` and package the
/// result into `output_dir`.
pub fn generate_site(
    raw: &Value,
    theme: &str,
    output_dir: PathBuf,
    replace_existing: bool,
) -> Result<PackageResult, PipelineError> {
    let config = SiteConfig::new(theme)
        .with_output_dir(output_dir)
        .with_replace_existing(replace_existing);
    SiteGenerator::new(config)?.build_from_json(raw)
}
