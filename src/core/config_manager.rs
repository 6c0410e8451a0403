// src/core/config_manager.rs
//! Layered configuration: defaults, optional YAML file, then environment

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::theme_registry::DEFAULT_THEME;

const DEFAULT_CONFIG_FILE: &str = "homepage.yaml";
const DEFAULT_OUTPUT_DIR: &str = "homepage_project";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub extraction: ExtractionConfig,
    /// YAML file the settings were read from, if one existed.
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub default_theme: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub gemini_model: String,
    pub openai_model: String,
    pub gemini_base_url: String,
    pub openai_base_url: String,
    pub max_tokens: u32,
    /// No timeout unless the caller asks for one.
    pub timeout_seconds: Option<u64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_DIR),
            default_theme: DEFAULT_THEME.to_string(),
            log_file: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_seconds: None,
        }
    }
}

/// Shape of `homepage.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    output_path: Option<PathBuf>,
    theme: Option<String>,
    log_file: Option<PathBuf>,
    extraction: ExtractionFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractionFile {
    gemini_model: Option<String>,
    openai_model: Option<String>,
    gemini_base_url: Option<String>,
    openai_base_url: Option<String>,
    max_tokens: Option<u32>,
    timeout_seconds: Option<u64>,
}

impl ConfigManager {
    /// Load `.env`, the YAML file (`HOMEPAGE_CONFIG` or `./homepage.yaml`) if
    /// present, then apply environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var("HOMEPAGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_optional_file(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn from_optional_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::from_file(ConfigFile::default()));
        }
        let mut config = Self::from_file(Self::read_file(path)?);
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_yaml(content: &str) -> Result<ConfigFile> {
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn from_file(file: ConfigFile) -> Self {
        let env_defaults = EnvironmentConfig::default();
        let extraction_defaults = ExtractionConfig::default();
        let ex = file.extraction;

        Self {
            environment: EnvironmentConfig {
                output_path: file.output_path.unwrap_or(env_defaults.output_path),
                default_theme: file.theme.unwrap_or(env_defaults.default_theme),
                log_file: file.log_file,
            },
            extraction: ExtractionConfig {
                gemini_api_key: None,
                openai_api_key: None,
                gemini_model: ex.gemini_model.unwrap_or(extraction_defaults.gemini_model),
                openai_model: ex.openai_model.unwrap_or(extraction_defaults.openai_model),
                gemini_base_url: ex
                    .gemini_base_url
                    .unwrap_or(extraction_defaults.gemini_base_url),
                openai_base_url: ex
                    .openai_base_url
                    .unwrap_or(extraction_defaults.openai_base_url),
                max_tokens: ex.max_tokens.unwrap_or(extraction_defaults.max_tokens),
                timeout_seconds: ex.timeout_seconds,
            },
            source: None,
        }
    }

    /// Environment wins over the file. Credentials only come from here.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        let set = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = set("HOMEPAGE_OUTPUT_DIR") {
            self.environment.output_path = PathBuf::from(dir);
        }
        if let Some(theme) = set("HOMEPAGE_THEME") {
            self.environment.default_theme = theme;
        }
        if let Some(log_file) = set("HOMEPAGE_LOG_FILE") {
            self.environment.log_file = Some(PathBuf::from(log_file));
        }

        let ex = &mut self.extraction;
        ex.gemini_api_key = set("GEMINI_API_KEY").or_else(|| set("GOOGLE_API_KEY"));
        ex.openai_api_key = set("OPENAI_API_KEY");
        if let Some(model) = set("GEMINI_MODEL") {
            ex.gemini_model = model;
        }
        if let Some(model) = set("OPENAI_MODEL") {
            ex.openai_model = model;
        }
        if let Some(url) = set("GEMINI_BASE_URL") {
            ex.gemini_base_url = url;
        }
        if let Some(url) = set("OPENAI_BASE_URL") {
            ex.openai_base_url = url;
        }
        if let Some(timeout) = set("HOMEPAGE_TIMEOUT_SECS") {
            ex.timeout_seconds = Some(
                timeout
                    .trim()
                    .parse::<u64>()
                    .context("HOMEPAGE_TIMEOUT_SECS must be a whole number of seconds")?,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let mut config = ConfigManager::from_file(ConfigFile::default());
        config.apply_overrides(env(&[])).unwrap();

        assert_eq!(config.environment, EnvironmentConfig::default());
        assert_eq!(config.extraction, ExtractionConfig::default());
        assert_eq!(config.environment.default_theme, "academic-light");
        assert_eq!(config.extraction.timeout_seconds, None);
    }

    #[test]
    fn test_yaml_then_env_layering() {
        let yaml = "output_path: site\ntheme: neon-cyber\nextraction:\n  gemini_model: gemini-1.5-pro\n  timeout_seconds: 90\n";
        let file = ConfigManager::parse_yaml(yaml).unwrap();
        let mut config = ConfigManager::from_file(file);
        config
            .apply_overrides(env(&[
                ("HOMEPAGE_THEME", "aurora"),
                ("OPENAI_API_KEY", "sk-test"),
                ("GEMINI_API_KEY", " "),
            ]))
            .unwrap();

        assert_eq!(config.environment.output_path, PathBuf::from("site"));
        assert_eq!(config.environment.default_theme, "aurora");
        assert_eq!(config.extraction.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.extraction.timeout_seconds, Some(90));
        assert_eq!(config.extraction.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.extraction.gemini_api_key, None);
    }

    #[test]
    fn test_invalid_timeout_is_reported() {
        let mut config = ConfigManager::from_file(ConfigFile::default());
        let err = config
            .apply_overrides(env(&[("HOMEPAGE_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("HOMEPAGE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_source_is_recorded_only_for_existing_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("homepage.yaml");

        let config = ConfigManager::from_optional_file(&path).unwrap();
        assert_eq!(config.source, None);

        std::fs::write(&path, "theme: dark-tech\n").unwrap();
        let config = ConfigManager::from_optional_file(&path).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.environment.default_theme, "dark-tech");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let file = ConfigManager::parse_yaml("  \n").unwrap();
        assert!(file.output_path.is_none());
        assert!(file.theme.is_none());
    }
}
