// Remote Summarization Client: delegates to a hosted summarization model

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

pub const MAX_INPUT_CHARS: usize = 4000;
pub const MAX_SUMMARY_LENGTH: u32 = 500;
pub const MIN_SUMMARY_LENGTH: u32 = 50;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no summary produced")]
    NoSummary,
}

/// Anything that can turn text into raw summary prose.
#[async_trait]
pub trait RemoteSummarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, RemoteError>;
}

/// Hard cutoff at `MAX_INPUT_CHARS` characters; sentence boundaries are ignored.
pub fn truncate_input(text: &str) -> &str {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub struct RemoteClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    fn request_body(text: &str) -> Value {
        json!({
            "inputs": text,
            "parameters": {
                "max_length": MAX_SUMMARY_LENGTH,
                "min_length": MIN_SUMMARY_LENGTH,
                "do_sample": false
            }
        })
    }
}

#[async_trait]
impl RemoteSummarizer for RemoteClient {
    async fn summarize(&self, text: &str) -> Result<String, RemoteError> {
        let input = truncate_input(text);
        info!(
            "Remote: Submitting {} chars to {}",
            input.chars().count(),
            self.endpoint
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&Self::request_body(input))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Status { status, body });
        }

        let body = resp.text().await?;

        debug!("Remote: Raw response {}", body);
        parse_summary(&body)
    }
}

/// Accepts `[{"summary_text": ...}]` or `{"summary_text": ...}`.
pub fn parse_summary(body: &str) -> Result<String, RemoteError> {
    let value: Value = serde_json::from_str(body)?;

    let entry = match &value {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    entry
        .and_then(|e| e["summary_text"].as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(RemoteError::NoSummary)
}
