// src/config.rs
use std::path::PathBuf;

use crate::core::config_manager::EnvironmentConfig;
use crate::core::packager::Destination;
use crate::core::theme_registry::DEFAULT_THEME;

/// Per-run settings for [`crate::generator::SiteGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub theme: String,
    pub output_dir: PathBuf,
    pub replace_existing: bool,
}

impl SiteConfig {
    pub fn new(theme: &str) -> Self {
        Self {
            theme: theme.to_string(),
            output_dir: PathBuf::from("homepage_project"),
            replace_existing: false,
        }
    }

    /// Theme and output directory from the loaded environment.
    pub fn from_environment(env: &EnvironmentConfig) -> Self {
        Self::new(&env.default_theme).with_output_dir(env.output_path.clone())
    }

    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = theme.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_replace_existing(mut self, replace: bool) -> Self {
        self.replace_existing = replace;
        self
    }

    pub fn destination(&self) -> Destination {
        Destination::new(self.output_dir.clone()).replacing(self.replace_existing)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}
