// src/core/theme_registry.rs
use serde::Serialize;

use crate::core::theme_engine::render_document;
use crate::core::themes::{ThemeStyle, THEMES};
use crate::error::UnknownTheme;
use crate::types::ResumeRecord;

pub const DEFAULT_THEME: &str = "academic-light";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// A resolved theme, ready to render any number of records.
#[derive(Debug, Clone, Copy)]
pub struct ThemeRenderer {
    style: &'static ThemeStyle,
}

impl ThemeRenderer {
    pub fn id(&self) -> &'static str {
        self.style.id
    }

    pub fn render(&self, record: &ResumeRecord) -> String {
        render_document(record, self.style)
    }
}

pub fn list_themes() -> Vec<ThemeInfo> {
    THEMES
        .iter()
        .map(|style| ThemeInfo {
            id: style.id,
            display_name: style.display_name,
            description: style.description,
        })
        .collect()
}

pub fn theme_ids() -> Vec<&'static str> {
    THEMES.iter().map(|style| style.id).collect()
}

/// Resolve a theme id. Matching ignores case and accepts `_` for `-`.
pub fn get_renderer(id: &str) -> Result<ThemeRenderer, UnknownTheme> {
    let wanted = id.trim().to_lowercase().replace('_', "-");

    THEMES
        .iter()
        .find(|style| style.id == wanted)
        .map(|style| ThemeRenderer { style })
        .ok_or_else(|| UnknownTheme {
            id: id.to_string(),
            available: theme_ids().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_themes_in_registry_order() {
        let themes = list_themes();
        assert_eq!(themes.len(), 7);
        assert_eq!(themes[0].id, DEFAULT_THEME);
        assert!(themes.iter().any(|t| t.id == "aurora"));
        assert!(themes.iter().all(|t| !t.display_name.is_empty()));
    }

    #[test]
    fn test_get_renderer_normalizes_ids() {
        assert_eq!(get_renderer("gradient_purple").unwrap().id(), "gradient-purple");
        assert_eq!(get_renderer(" Dark-Tech ").unwrap().id(), "dark-tech");
    }

    #[test]
    fn test_unknown_theme_lists_available() {
        let err = get_renderer("retro").unwrap_err();
        assert_eq!(err.id, "retro");
        assert!(err.to_string().starts_with("unknown theme 'retro'. Available themes: academic-light, "));
    }

    #[test]
    fn test_every_theme_resolves() {
        for id in theme_ids() {
            assert_eq!(get_renderer(id).unwrap().id(), id);
        }
    }
}
