// src/types/resume.rs
//! Normalized résumé data and the permissive parser that builds it from
//! model output

use serde::Serialize;
use serde_json::{Map, Value};

use crate::app_log;
use crate::error::SchemaError;

pub const DEFAULT_TITLE: &str = "Researcher";

// ===== Data Model =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub socials: Vec<SocialLink>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Insertion-ordered and free of duplicates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Timeline,
    GridList,
    #[default]
    TextContent,
    Gallery,
}

impl SectionKind {
    /// Recognize a layout label; accepts `grid_list` and `Grid List` spellings.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();

        match normalized.as_str() {
            "timeline" => Some(Self::Timeline),
            "grid-list" | "grid" => Some(Self::GridList),
            "text-content" | "text" => Some(Self::TextContent),
            "gallery" => Some(Self::Gallery),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeline => "timeline",
            Self::GridList => "grid-list",
            Self::TextContent => "text-content",
            Self::Gallery => "gallery",
        }
    }

    /// Layout actually used for rendering. Gallery has no dedicated layout yet.
    pub fn layout(&self) -> SectionKind {
        match self {
            Self::Gallery => Self::TextContent,
            other => *other,
        }
    }
}

impl ResumeRecord {
    /// Parse raw JSON text into a record.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let raw: Value = serde_json::from_str(content)?;
        parse_resume_record(&raw)
    }

    /// Email without surrounding whitespace, if any is left.
    pub fn email_address(&self) -> Option<&str> {
        non_blank(self.email.as_deref()).map(str::trim)
    }

    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    /// Website as an absolute URL, `https://` added when no scheme is given.
    pub fn website_url(&self) -> Option<String> {
        non_blank(self.website.as_deref()).map(normalize_website)
    }
}

pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn normalize_website(website: &str) -> String {
    let trimmed = website.trim();
    let lower = trimmed.to_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches('/'))
    }
}

/// Only absolute web URLs are ever turned into links.
pub fn is_web_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")) && lower.len() > "https://".len()
}

pub fn is_plausible_email(email: &str) -> bool {
    const FORBIDDEN: &[char] = &['<', '>', '(', ')', '[', ']', ',', ';', ':', '"', '\\'];

    if email.chars().any(|c| c.is_whitespace() || FORBIDDEN.contains(&c)) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

// ===== Parsing =====

/// Validate loosely-typed extractor output into a [`ResumeRecord`].
///
/// Only a missing name, a non-object section entry or a non-array `items`
/// value are rejected. Unknown fields are ignored, unknown section kinds fall
/// back to `text-content` and scalar values are coerced to text. Both the flat
/// shape and the nested `basics` shape are accepted; top-level fields win.
pub fn parse_resume_record(raw: &Value) -> Result<ResumeRecord, SchemaError> {
    let root = raw.as_object().ok_or(SchemaError::NotAnObject)?;
    let basics = root.get("basics").and_then(Value::as_object);

    // A blank top-level value defers to `basics`, but is kept if that has nothing.
    let lookup = |key: &str| -> Option<String> {
        let top = text_field(root, key);
        if top.as_deref().is_some_and(|v| !v.trim().is_empty()) {
            return top;
        }
        basics
            .and_then(|b| text_field(b, key))
            .filter(|v| !v.trim().is_empty())
            .or(top)
    };

    let name = lookup("name")
        .filter(|name| !name.trim().is_empty())
        .ok_or(SchemaError::MissingField("name"))?;

    let title = match lookup("title") {
        Some(title) if !title.trim().is_empty() => Some(title),
        blank => basics
            .and_then(|b| text_field(b, "label"))
            .filter(|label| !label.trim().is_empty())
            .or(blank),
    };

    let email = lookup("email").and_then(|email| {
        let address = email.trim();
        if address.is_empty() {
            None
        } else if is_plausible_email(address) {
            Some(email)
        } else {
            app_log!(warn, "Dropping implausible email address: {}", email);
            None
        }
    });

    let socials_value = root
        .get("socials")
        .or_else(|| basics.and_then(|b| b.get("socials")));

    let sections = match root.get("sections") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_section(index, entry))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(SchemaError::InvalidSection {
                index: 0,
                reason: format!("`sections` must be an array, found {}", json_type(other)),
            })
        }
    };

    Ok(ResumeRecord {
        name,
        title,
        email,
        website: lookup("website"),
        bio: lookup("bio"),
        socials: socials_value.map(parse_socials).unwrap_or_default(),
        sections,
    })
}

fn parse_section(index: usize, entry: &Value) -> Result<Section, SchemaError> {
    let section = entry.as_object().ok_or_else(|| SchemaError::InvalidSection {
        index,
        reason: format!("expected an object, found {}", json_type(entry)),
    })?;

    let title = text_field(section, "title").unwrap_or_default();

    let kind = match text_field(section, "type").or_else(|| text_field(section, "kind")) {
        Some(label) => SectionKind::from_label(&label).unwrap_or_else(|| {
            app_log!(
                warn,
                "Section '{}' has unknown kind '{}', using text-content",
                title,
                label
            );
            SectionKind::TextContent
        }),
        None => SectionKind::default(),
    };

    let items = match section.get("items") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().filter_map(parse_item).collect(),
        Some(other) => {
            return Err(SchemaError::InvalidSection {
                index,
                reason: format!("`items` must be an array, found {}", json_type(other)),
            })
        }
    };

    Ok(Section { title, kind, items })
}

fn parse_item(entry: &Value) -> Option<Item> {
    match entry {
        Value::Object(item) => Some(Item {
            title: text_field(item, "title"),
            subtitle: text_field(item, "subtitle"),
            date: text_field(item, "date"),
            description: text_field(item, "description"),
            tags: item.get("tags").map(parse_tags).unwrap_or_default(),
            link: text_field(item, "link"),
        }),
        Value::String(text) => Some(Item {
            description: Some(text.clone()),
            ..Item::default()
        }),
        other => {
            app_log!(warn, "Skipping section item of type {}", json_type(other));
            None
        }
    }
}

fn parse_tags(value: &Value) -> Vec<String> {
    let candidates: Vec<String> = match value {
        Value::Array(values) => values.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for tag in candidates {
        if !tag.trim().is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn parse_socials(value: &Value) -> Vec<SocialLink> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .filter_map(|social| {
                    Some(SocialLink {
                        platform: text_field(social, "platform")?,
                        url: text_field(social, "url")?,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
