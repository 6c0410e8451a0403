// src/generator.rs
use serde_json::Value;
use std::path::Path;

use crate::app_log;
use crate::config::SiteConfig;
use crate::core::extraction::{ExtractionGateway, SourceDocument};
use crate::core::packager::{PackageResult, ProjectPackager};
use crate::core::theme_registry::{get_renderer, ThemeRenderer};
use crate::error::PipelineError;
use crate::types::resume::parse_resume_record;
use crate::types::ResumeRecord;

/// Extraction → validation → rendering → packaging.
pub struct SiteGenerator {
    pub config: SiteConfig,
    renderer: ThemeRenderer,
}

impl SiteGenerator {
    /// Resolves the theme up front so a bad id fails before any work is done.
    pub fn new(config: SiteConfig) -> Result<Self, PipelineError> {
        let renderer = get_renderer(&config.theme)?;
        Ok(Self { config, renderer })
    }

    pub fn theme_id(&self) -> &'static str {
        self.renderer.id()
    }

    pub fn render(&self, record: &ResumeRecord) -> String {
        self.renderer.render(record)
    }

    pub fn build_from_record(&self, record: &ResumeRecord) -> Result<PackageResult, PipelineError> {
        let html = self.render(record);
        app_log!(
            info,
            "Rendered {} section(s) for {} with theme {}",
            record.sections.len(),
            record.name,
            self.theme_id()
        );

        let result = ProjectPackager::package(&html, record, &self.config.destination())?;

        app_log!(
            info,
            "✅ Homepage for {} written to {}",
            record.name,
            result.index_path.display()
        );
        Ok(result)
    }

    pub fn build_from_json(&self, raw: &Value) -> Result<PackageResult, PipelineError> {
        let record = parse_resume_record(raw)?;
        self.build_from_record(&record)
    }

    pub async fn build_from_source(
        &self,
        gateway: &dyn ExtractionGateway,
        document: &SourceDocument,
    ) -> Result<PackageResult, PipelineError> {
        let record = extract_record(gateway, document).await?;
        self.build_from_record(&record)
    }
}

/// Run the gateway and validate what it returns.
pub async fn extract_record(
    gateway: &dyn ExtractionGateway,
    document: &SourceDocument,
) -> Result<ResumeRecord, PipelineError> {
    app_log!(
        info,
        "Extracting {} with {}",
        document.path.display(),
        gateway.provider()
    );
    let raw = gateway.extract(document).await?;
    Ok(parse_resume_record(&raw)?)
}

/// Read a JSON file into a validated record.
pub fn load_record(path: &Path) -> Result<ResumeRecord, PipelineError> {
    let content = std::fs::read_to_string(path).map_err(|e| PipelineError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(ResumeRecord::from_json_str(&content)?)
}
