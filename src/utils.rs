// src/utils.rs
use std::path::Path;

/// Lowercase ASCII slug with single dashes, e.g. `"Ada  Lovelace!"` -> `"ada-lovelace"`.
/// Falls back to `"homepage"` when nothing usable remains.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "homepage".to_string()
    } else {
        slug
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    get_file_extension(path)
        .map(|ext| allowed.contains(&ext.as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Ada  Lovelace!"), "ada-lovelace");
        assert_eq!(slugify("  Dr. Jean-Paul Sartre "), "dr-jean-paul-sartre");
        assert_eq!(slugify("王小明"), "homepage");
        assert_eq!(slugify("Test"), "test");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(
            get_file_extension(Path::new("test.pdf")),
            Some("pdf".to_string())
        );
        assert_eq!(
            get_file_extension(Path::new("scans/page.PNG")),
            Some("png".to_string())
        );
        assert_eq!(get_file_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("resume.JSON"), &["json"]));
        assert!(!has_extension(Path::new("resume.pdf"), &["json"]));
        assert!(!has_extension(Path::new("resume"), &["json"]));
    }
}
