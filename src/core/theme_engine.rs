// src/core/theme_engine.rs
//! Turns a [`ResumeRecord`] into a self-contained HTML document.
//!
//! Every theme goes through the same templates under `templates/`; the
//! [`ThemeStyle`] only decides CSS, labels and the optional script. Askama
//! escapes every value that is not explicitly marked `safe`.

use askama::Template;
use std::borrow::Cow;

use crate::app_log;
use crate::core::theme_registry::get_renderer;
use crate::core::themes::{ContactLabels, ThemeStyle, BASE_CSS};
use crate::error::UnknownTheme;
use crate::types::resume::{is_web_url, non_blank};
use crate::types::{Item, ResumeRecord, Section, SectionKind};

/// Result of rendering one theme in a batch.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub theme_id: String,
    pub result: Result<String, UnknownTheme>,
}

impl RenderOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Render `record` with the theme registered under `theme_id`.
pub fn render(record: &ResumeRecord, theme_id: &str) -> Result<String, UnknownTheme> {
    Ok(get_renderer(theme_id)?.render(record))
}

/// Render several themes; an unknown id only fails its own entry.
pub fn render_batch<S: AsRef<str>>(record: &ResumeRecord, theme_ids: &[S]) -> Vec<RenderOutcome> {
    theme_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            let result = render(record, id);
            if let Err(err) = &result {
                app_log!(warn, "Skipping theme: {}", err);
            }
            RenderOutcome {
                theme_id: id.to_string(),
                result,
            }
        })
        .collect()
}

// ===== Templates =====

#[derive(Template)]
#[template(path = "homepage.html")]
struct HomepageTemplate<'a> {
    style: &'a ThemeStyle,
    base_css: &'static str,
    name: &'a str,
    title: &'a str,
    bio: Option<&'a str>,
    contacts: Vec<ContactLink<'a>>,
    sections: Vec<SectionView<'a>>,
}

struct ContactLink<'a> {
    href: String,
    label: Cow<'a, str>,
    external: bool,
}

struct SectionView<'a> {
    /// `timeline`, `grid-list` or `text-content`.
    layout: &'static str,
    title: Option<&'a str>,
    items: Vec<ItemView<'a>>,
    /// Descriptions only, for the text layout.
    paragraphs: Vec<&'a str>,
}

struct ItemView<'a> {
    title: Option<&'a str>,
    subtitle: Option<&'a str>,
    date: Option<&'a str>,
    description: Option<&'a str>,
    tags: Vec<&'a str>,
    link: Option<&'a str>,
}

mod filters {
    /// Newlines to `<br>`. Runs on already escaped text, so the output is
    /// marked `safe` in the templates.
    pub fn nl2br<T: std::fmt::Display>(s: T) -> ::askama::Result<String> {
        Ok(s.to_string().replace("\r\n", "<br>").replace(['\r', '\n'], "<br>"))
    }

    /// Newlines to spaces, for places where markup is not allowed.
    pub fn oneline<T: std::fmt::Display>(s: T) -> ::askama::Result<String> {
        Ok(s.to_string().replace("\r\n", " ").replace(['\r', '\n'], " "))
    }
}

pub fn render_document(record: &ResumeRecord, style: &ThemeStyle) -> String {
    let page = HomepageTemplate {
        style,
        base_css: BASE_CSS,
        name: &record.name,
        title: record.display_title(),
        bio: non_blank(record.bio.as_deref()),
        contacts: contact_links(record, style.contact_labels),
        sections: record.sections.iter().map(section_view).collect(),
    };

    page.render().unwrap_or_else(|err| {
        app_log!(error, "Theme {} failed to render: {}", style.id, err);
        String::new()
    })
}

fn contact_links(record: &ResumeRecord, labels: ContactLabels) -> Vec<ContactLink<'_>> {
    let mut links = Vec::new();

    if let Some(email) = record.email_address() {
        let label = match labels {
            ContactLabels::Icon => "📧 Email",
            ContactLabels::Address => email,
            ContactLabels::Upper => "EMAIL",
        };
        links.push(ContactLink {
            href: format!("mailto:{}", email),
            label: Cow::Borrowed(label),
            external: false,
        });
    }

    if let Some(url) = record.website_url() {
        let label = match labels {
            ContactLabels::Icon => "🌐 Website",
            ContactLabels::Address => record.website.as_deref().map(str::trim).unwrap_or_default(),
            ContactLabels::Upper => "WEBSITE",
        };
        links.push(ContactLink {
            href: url,
            label: Cow::Borrowed(label),
            external: true,
        });
    }

    for social in record.socials.iter().filter(|social| is_web_url(&social.url)) {
        let label = match labels {
            ContactLabels::Upper => Cow::Owned(social.platform.to_uppercase()),
            _ => Cow::Borrowed(social.platform.as_str()),
        };
        links.push(ContactLink {
            href: social.url.trim().to_string(),
            label,
            external: true,
        });
    }

    links
}

fn section_view(section: &Section) -> SectionView<'_> {
    let layout = section.kind.layout();
    let paragraphs = match layout {
        SectionKind::TextContent => section
            .items
            .iter()
            .filter_map(|item| non_blank(item.description.as_deref()))
            .collect(),
        _ => Vec::new(),
    };

    SectionView {
        layout: layout.as_str(),
        title: non_blank(Some(section.title.as_str())),
        items: section.items.iter().map(item_view).collect(),
        paragraphs,
    }
}

fn item_view(item: &Item) -> ItemView<'_> {
    ItemView {
        title: non_blank(item.title.as_deref()),
        subtitle: non_blank(item.subtitle.as_deref()),
        date: non_blank(item.date.as_deref()),
        description: non_blank(item.description.as_deref()),
        tags: item
            .tags
            .iter()
            .map(String::as_str)
            .filter(|tag| !tag.trim().is_empty())
            .collect(),
        link: item
            .link
            .as_deref()
            .filter(|link| is_web_url(link))
            .map(str::trim),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::themes::THEMES;
    use crate::types::SocialLink;
    use serde_json::json;

    fn ada() -> ResumeRecord {
        crate::types::resume::parse_resume_record(&json!({
            "name": "Ada Lovelace",
            "sections": [{
                "title": "Education",
                "kind": "timeline",
                "items": [{"title": "PhD", "subtitle": "Cambridge", "date": "2020"}]
            }]
        }))
        .unwrap()
    }

    fn rich() -> ResumeRecord {
        ResumeRecord {
            name: "Grace Hopper".to_string(),
            title: Some("Computer Scientist".to_string()),
            email: Some("grace@navy.mil".to_string()),
            website: Some("grace.example.org".to_string()),
            bio: Some("Line one\nLine two".to_string()),
            socials: vec![
                SocialLink {
                    platform: "GitHub".to_string(),
                    url: "https://github.com/grace".to_string(),
                },
                SocialLink {
                    platform: "Evil".to_string(),
                    url: "javascript:alert(1)".to_string(),
                },
            ],
            sections: vec![
                Section {
                    title: "Experience".to_string(),
                    kind: SectionKind::Timeline,
                    items: vec![Item {
                        title: Some("Mark I".to_string()),
                        link: Some("https://example.org/mark1".to_string()),
                        ..Item::default()
                    }],
                },
                Section {
                    title: "Projects".to_string(),
                    kind: SectionKind::GridList,
                    items: vec![Item {
                        title: Some("COBOL".to_string()),
                        tags: vec!["languages".to_string(), "business".to_string()],
                        ..Item::default()
                    }],
                },
                Section {
                    title: "About".to_string(),
                    kind: SectionKind::TextContent,
                    items: vec![
                        Item {
                            title: Some("ignored title".to_string()),
                            description: Some("First paragraph".to_string()),
                            ..Item::default()
                        },
                        Item::default(),
                    ],
                },
                Section {
                    title: "Posters".to_string(),
                    kind: SectionKind::Gallery,
                    items: vec![Item {
                        description: Some("Poster caption".to_string()),
                        ..Item::default()
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_ada_scenario() {
        let html = render(&ada(), "academic-light").unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ada Lovelace</title>"));
        assert!(html.contains("<h1>Ada Lovelace</h1>"));
        assert!(html.contains("Researcher"));
        assert!(html.contains("Education"));
        assert!(!html.contains("mailto:"));
        assert!(!html.contains("class=\"bio\""));
        assert!(!html.contains("class=\"contact\""));

        let phd = html.find("PhD").unwrap();
        let cambridge = html.find("Cambridge").unwrap();
        let year = html.find("2020").unwrap();
        assert!(phd < cambridge && cambridge < year);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let record = rich();
        for style in THEMES.iter() {
            assert_eq!(
                render_document(&record, style),
                render_document(&record, style)
            );
        }
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let payload = "<script>alert(\"x\")</script> & more";
        let item = Item {
            title: Some(payload.to_string()),
            subtitle: Some(payload.to_string()),
            date: Some(payload.to_string()),
            description: Some(payload.to_string()),
            tags: vec![payload.to_string()],
            ..Item::default()
        };
        let record = ResumeRecord {
            name: payload.to_string(),
            title: Some(payload.to_string()),
            email: None,
            website: Some(format!("example.org/\"{}", payload)),
            bio: Some(payload.to_string()),
            socials: vec![],
            sections: vec![
                Section {
                    title: payload.to_string(),
                    kind: SectionKind::GridList,
                    items: vec![item.clone()],
                },
                Section {
                    title: payload.to_string(),
                    kind: SectionKind::Timeline,
                    items: vec![item.clone()],
                },
                Section {
                    title: payload.to_string(),
                    kind: SectionKind::TextContent,
                    items: vec![item],
                },
            ],
        };
        let escaped = "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more";

        for style in THEMES.iter() {
            let html = render_document(&record, style);
            assert!(!html.contains("<script>alert"));
            assert!(!html.contains("\"x\""));
            assert!(!html.contains("</script> &"));
            for tag in [
                "<h3>",
                "<p class=\"subtitle\">",
                "<p class=\"date\">",
                "<p class=\"description\">",
                "<p>",
                "<span class=\"tag\">",
                "<title>",
            ] {
                assert!(html.contains(&format!("{}{}", tag, escaped)), "{} in {}", tag, style.id);
            }
        }
    }

    #[test]
    fn test_description_spacing_is_preserved() {
        let text = "line\n    indented   gap";
        let record = ResumeRecord {
            name: "Ada".to_string(),
            title: None,
            email: None,
            website: None,
            bio: Some(text.to_string()),
            socials: vec![],
            sections: vec![
                Section {
                    title: "Work".to_string(),
                    kind: SectionKind::Timeline,
                    items: vec![Item {
                        description: Some(text.to_string()),
                        ..Item::default()
                    }],
                },
                Section {
                    title: "About".to_string(),
                    kind: SectionKind::TextContent,
                    items: vec![Item {
                        description: Some(text.to_string()),
                        ..Item::default()
                    }],
                },
            ],
        };

        for style in THEMES.iter() {
            let html = render_document(&record, style);
            assert!(html.contains("<p class=\"bio\">line<br>    indented   gap</p>"));
            assert!(html.contains("<p class=\"description\">line<br>    indented   gap</p>"));
            assert!(html.contains("<p>line<br>    indented   gap</p>"));
            assert!(html.matches("white-space:pre-wrap").count() >= 3, "{}", style.id);
        }
    }

    #[test]
    fn test_page_title_stays_on_one_line() {
        let mut record = ada();
        record.name = "Ada\r\nLovelace\nKing".to_string();

        let html = render(&record, "academic-light").unwrap();
        assert!(html.contains("<title>Ada Lovelace King</title>"));
        assert!(html.contains("<h1>Ada<br>Lovelace<br>King</h1>"));
    }

    #[test]
    fn test_padded_email_is_trimmed_in_links() {
        let mut record = ada();
        record.email = Some(" ada@example.org ".to_string());

        let html = render(&record, "academic-light").unwrap();
        assert!(html.contains("href=\"mailto:ada@example.org\">ada@example.org</a>"));
    }

    #[test]
    fn test_empty_sections_render_header_only() {
        let record = ResumeRecord {
            name: "Solo".to_string(),
            title: None,
            email: None,
            website: None,
            bio: None,
            socials: vec![],
            sections: vec![],
        };

        for style in THEMES.iter() {
            let html = render_document(&record, style);
            assert!(html.contains("<h1>Solo</h1>"));
            assert!(!html.contains("<section"));
        }
    }

    #[test]
    fn test_section_order_is_preserved_everywhere() {
        let record = rich();
        for style in THEMES.iter() {
            let html = render_document(&record, style);
            let positions: Vec<usize> = ["Experience", "Projects", "About", "Posters"]
                .iter()
                .map(|title| html.find(&format!("{}</h2>", title)).unwrap())
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
            assert!(html.contains("id=\"section-3\""));
        }
    }

    #[test]
    fn test_layout_details() {
        let html = render(&rich(), "gradient-purple").unwrap();

        assert!(html.contains("href=\"mailto:grace@navy.mil\""));
        assert!(html.contains("href=\"https://grace.example.org\""));
        assert!(html.contains("Line one<br>Line two"));
        assert!(html.contains("https://github.com/grace"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("<span class=\"tag\">languages</span><span class=\"tag\">business</span>"));
        assert!(html.contains("href=\"https://example.org/mark1\""));
        assert!(html.contains("<p>First paragraph</p>"));
        assert!(!html.contains("ignored title"));
        assert!(html.contains("<p>Poster caption</p>"));
    }

    #[test]
    fn test_unknown_kind_renders_as_text() {
        let record = crate::types::resume::parse_resume_record(&json!({
            "name": "Ada",
            "sections": [{"title": "Misc", "type": "unknown-type", "items": [{"title": "hidden", "description": "shown"}]}]
        }))
        .unwrap();

        let html = render(&record, "dark-tech").unwrap();
        assert!(html.contains("section-text-content"));
        assert!(html.contains("<p>shown</p>"));
        assert!(!html.contains("hidden"));
    }

    #[test]
    fn test_theme_specific_touches() {
        let record = rich();
        assert!(render(&record, "neon-cyber")
            .unwrap()
            .contains("<h2 class=\"section-title\">&gt; Experience</h2>"));
        assert!(render(&record, "neon-cyber").unwrap().contains(">EMAIL</a>"));

        let aurora = render(&record, "aurora").unwrap();
        assert!(aurora.contains("<canvas id=\"particles-canvas\"></canvas>"));
        assert!(aurora.contains("<script>"));
        assert!(!render(&record, "academic-light").unwrap().contains("<script>"));
    }

    #[test]
    fn test_batch_skips_unknown_themes() {
        let outcomes = render_batch(&ada(), &["academic-light", "retro", "aurora"]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert!(outcomes[2].is_ok());

        let err = outcomes[1].result.as_ref().unwrap_err();
        assert_eq!(err.id, "retro");
        assert!(err.available.contains("academic-light"));
    }
}
