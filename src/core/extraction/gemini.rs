// src/core/extraction/gemini.rs
use async_trait::async_trait;
use serde_json::{json, Value};

use super::prompts::EXTRACTION_PROMPT;
use super::{api_failure, parse_model_output, ExtractionGateway, Provider, SourceDocument};
use crate::app_log;
use crate::error::ExtractionFailure;
use crate::types::response::GeminiResponse;

const PROVIDER: Provider = Provider::Gemini;

pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGateway {
    pub fn new(client: reqwest::Client, api_key: String, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Prompt first, then every page as `inline_data`.
    pub(crate) fn request_body(document: &SourceDocument) -> Value {
        let mut parts = vec![json!({ "text": EXTRACTION_PROMPT })];
        parts.extend(document.pages.iter().map(|page| {
            json!({
                "inline_data": {
                    "mime_type": page.mime_type,
                    "data": page.base64(),
                }
            })
        }));

        json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "temperature": 0.1,
                "responseMimeType": "application/json",
            }
        })
    }
}

#[async_trait]
impl ExtractionGateway for GeminiGateway {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn extract(&self, document: &SourceDocument) -> Result<Value, ExtractionFailure> {
        let url = self.endpoint();
        app_log!(
            info,
            "Calling Gemini model {} with {} page(s)",
            self.model,
            document.page_count()
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(document))
            .send()
            .await
            .map_err(|source| ExtractionFailure::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        app_log!(trace, "Gemini response status: {}", status);
        if !status.is_success() {
            return Err(api_failure(PROVIDER, response).await);
        }

        let body: GeminiResponse =
            response
                .json()
                .await
                .map_err(|source| ExtractionFailure::Transport {
                    provider: PROVIDER,
                    source,
                })?;

        let text = body
            .text()
            .ok_or_else(|| ExtractionFailure::MalformedResponse {
                provider: PROVIDER,
                detail: match body.finish_reason() {
                    Some(reason) => format!("no text in first candidate (finish reason {})", reason),
                    None => "no candidates returned".to_string(),
                },
            })?;

        parse_model_output(PROVIDER, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let doc = SourceDocument::from_bytes("cv.png", vec![1, 2, 3]).unwrap();
        let body = GeminiGateway::request_body(&doc);

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("JSON"));
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "AQID");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiGateway::new(
            reqwest::Client::new(),
            "key".to_string(),
            "gemini-2.0-flash".to_string(),
            "https://generativelanguage.googleapis.com/".to_string(),
        );
        assert_eq!(
            gateway.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
