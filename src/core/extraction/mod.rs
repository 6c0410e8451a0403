// src/core/extraction/mod.rs
//! Vendor model boundary: turns a source document into raw résumé JSON.
//!
//! The gateways are thin. They send the fixed prompt plus the document pages,
//! strip Markdown fences from the reply and parse it. Nothing is retried.

mod gemini;
mod openai;
pub mod prompts;
pub mod source;

pub use gemini::GeminiGateway;
pub use openai::OpenAiGateway;
pub use source::{DocumentPage, SourceDocument};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::app_log;
use crate::core::config_manager::ExtractionConfig;
use crate::error::ExtractionFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    #[value(name = "openai")]
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "gpt" | "gpt-4o" => Ok(Provider::OpenAi),
            other => Err(format!(
                "unknown provider '{}'. Use gemini or openai",
                other
            )),
        }
    }
}

#[async_trait]
pub trait ExtractionGateway: Send + Sync {
    fn provider(&self) -> Provider;

    /// Send the document to the model and return its JSON reply, unvalidated.
    async fn extract(&self, document: &SourceDocument) -> Result<Value, ExtractionFailure>;
}

/// Build the client for `provider`. An explicit `api_key` wins over the
/// configured one.
pub fn build_gateway(
    provider: Provider,
    api_key: Option<String>,
    config: &ExtractionConfig,
) -> Result<Box<dyn ExtractionGateway>, ExtractionFailure> {
    let configured = match provider {
        Provider::Gemini => config.gemini_api_key.clone(),
        Provider::OpenAi => config.openai_api_key.clone(),
    };

    let api_key = api_key
        .or(configured)
        .filter(|key| !key.trim().is_empty())
        .ok_or(ExtractionFailure::MissingCredential { provider })?;

    let client = http_client(provider, config.timeout_seconds)?;

    app_log!(debug, "Using {} extraction gateway", provider);

    Ok(match provider {
        Provider::Gemini => Box::new(GeminiGateway::new(
            client,
            api_key,
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
        )),
        Provider::OpenAi => Box::new(OpenAiGateway::new(
            client,
            api_key,
            config.openai_model.clone(),
            config.openai_base_url.clone(),
            config.max_tokens,
        )),
    })
}

fn http_client(
    provider: Provider,
    timeout_seconds: Option<u64>,
) -> Result<reqwest::Client, ExtractionFailure> {
    let mut builder = reqwest::Client::builder();
    if let Some(seconds) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    builder
        .build()
        .map_err(|source| ExtractionFailure::Transport { provider, source })
}

/// Remove a surrounding Markdown code fence (```` ```json ```` or ```` ``` ````).
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string on the opening line, if any.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parse a model reply as JSON, tolerating code fences.
pub fn parse_model_output(provider: Provider, text: &str) -> Result<Value, ExtractionFailure> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|source| {
        app_log!(
            warn,
            "{} returned non-JSON output ({} chars)",
            provider,
            text.len()
        );
        ExtractionFailure::NotJson { provider, source }
    })
}

/// Map a non-success HTTP response to an `Api` failure.
async fn api_failure(provider: Provider, response: reqwest::Response) -> ExtractionFailure {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    app_log!(error, "{} returned status {}", provider, status);

    ExtractionFailure::Api {
        provider,
        status: status.as_u16(),
        message: crate::types::response::api_error_message(&body),
    }
}
