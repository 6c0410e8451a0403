// src/core/extraction/prompts.rs
//! Fixed extraction prompt sent alongside the document pages

pub const EXTRACTION_PROMPT: &str = r#"Analyze this academic resume and extract all of its information.
Return a single JSON object with exactly this shape:
{
  "name": "full name",
  "title": "professional title",
  "email": "email address",
  "website": "personal website",
  "bio": "short personal introduction",
  "sections": [
    {
      "title": "section title",
      "type": "timeline | grid-list | text-content",
      "items": [
        {"title": "", "subtitle": "", "date": "", "description": "", "tags": []}
      ]
    }
  ]
}
Use "timeline" for dated entries such as education and positions, "grid-list" for
projects or publications, and "text-content" for free paragraphs.
Omit fields that are not present in the document. Return pure JSON only."#;

/// OpenAI's JSON mode additionally requires the word "JSON" in a system message.
pub const SYSTEM_PROMPT: &str = "You convert resumes into structured JSON.";
