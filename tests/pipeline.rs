use homepage_generator::{generate_site, list_themes, parse_resume_record, render, Stage};
use serde_json::json;
use std::fs::File;
use tempfile::TempDir;

#[test]
fn json_to_packaged_site() {
    let raw = json!({
        "name": "Ada Lovelace",
        "title": "Analyst",
        "email": "ada@example.org",
        "sections": [
            {"title": "Education", "type": "timeline", "items": [{"title": "PhD", "subtitle": "Cambridge", "date": 2020}]},
            {"title": "Notes", "type": "gallery", "items": ["On the Analytical Engine"]}
        ]
    });

    let tmp = TempDir::new().unwrap();
    let result = generate_site(&raw, "aurora", tmp.path().join("ada"), false).unwrap();

    let html = std::fs::read_to_string(&result.index_path).unwrap();
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
    assert!(html.contains("mailto:ada@example.org"));
    assert!(html.contains("<p>On the Analytical Engine</p>"));

    let archive = zip::ZipArchive::new(File::open(&result.archive_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 2);
}

#[test]
fn every_theme_renders_the_same_record() {
    let record = parse_resume_record(&json!({
        "name": "Grace & <Hopper>",
        "sections": [{"title": "Work", "type": "grid-list", "items": [{"title": "A-0", "tags": ["x"]}]}]
    }))
    .unwrap();

    for theme in list_themes() {
        let html = render(&record, theme.id).unwrap();
        assert!(html.contains("<h1>Grace &amp; &lt;Hopper&gt;</h1>"), "{}", theme.id);
        assert!(html.contains("id=\"section-0\""));
    }
}

#[test]
fn failures_name_their_stage() {
    let tmp = TempDir::new().unwrap();

    let err = generate_site(&json!({"name": "Ada"}), "retro", tmp.path().join("a"), false).unwrap_err();
    assert_eq!(err.stage(), Stage::Rendering);

    let err = generate_site(&json!({"title": "nameless"}), "aurora", tmp.path().join("b"), false)
        .unwrap_err();
    assert_eq!(err.stage(), Stage::Validation);
    assert!(err.status_line().starts_with("validation failed:"));
}
