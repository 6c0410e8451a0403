// src/core/extraction/openai.rs
use async_trait::async_trait;
use serde_json::{json, Value};

use super::prompts::{EXTRACTION_PROMPT, SYSTEM_PROMPT};
use super::{api_failure, parse_model_output, ExtractionGateway, Provider, SourceDocument};
use crate::app_log;
use crate::error::ExtractionFailure;
use crate::types::response::ChatCompletionResponse;

const PROVIDER: Provider = Provider::OpenAi;

pub struct OpenAiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl OpenAiGateway {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url,
            max_tokens,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Images travel as `image_url` data URLs, PDFs as `file` parts.
    pub(crate) fn request_body(&self, document: &SourceDocument) -> Value {
        let mut content = vec![json!({ "type": "text", "text": EXTRACTION_PROMPT })];
        content.extend(document.pages.iter().map(|page| {
            if page.is_pdf() {
                json!({
                    "type": "file",
                    "file": {
                        "filename": page.file_name,
                        "file_data": page.data_url(),
                    }
                })
            } else {
                json!({
                    "type": "image_url",
                    "image_url": { "url": page.data_url() }
                })
            }
        }));

        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": content }
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.1,
            "response_format": { "type": "json_object" }
        })
    }
}

#[async_trait]
impl ExtractionGateway for OpenAiGateway {
    fn provider(&self) -> Provider {
        PROVIDER
    }

    async fn extract(&self, document: &SourceDocument) -> Result<Value, ExtractionFailure> {
        let url = self.endpoint();
        app_log!(
            info,
            "Calling OpenAI model {} with {} page(s)",
            self.model,
            document.page_count()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(document))
            .send()
            .await
            .map_err(|source| ExtractionFailure::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        app_log!(trace, "OpenAI response status: {}", status);
        if !status.is_success() {
            return Err(api_failure(PROVIDER, response).await);
        }

        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|source| ExtractionFailure::Transport {
                    provider: PROVIDER,
                    source,
                })?;

        if let Some(refusal) = body.refusal() {
            return Err(ExtractionFailure::MalformedResponse {
                provider: PROVIDER,
                detail: format!("model refused: {}", refusal),
            });
        }

        let text = body
            .text()
            .ok_or_else(|| ExtractionFailure::MalformedResponse {
                provider: PROVIDER,
                detail: "no message content in first choice".to_string(),
            })?;

        parse_model_output(PROVIDER, text)
    }
}
