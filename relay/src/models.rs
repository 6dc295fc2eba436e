use serde::{Deserialize, Serialize};

use crate::summary::SummarizationResult;

// API Request/Response models
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub style_hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    pub fallback: bool,
}

impl From<SummarizationResult> for SummaryResponse {
    fn from(result: SummarizationResult) -> Self {
        Self {
            success: true,
            summary: result.summary,
            original_length: result.original_length,
            summary_length: result.summary_length,
            fallback: result.used_fallback,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub summary: SummaryResponse,
    pub filename: String,
}

/// A single address, a comma-separated list, or a JSON array of addresses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    pub fn into_list(self) -> Vec<String> {
        let raw = match self {
            Recipients::One(s) => vec![s],
            Recipients::Many(v) => v,
        };

        raw.iter()
            .flat_map(|s| s.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub recipients: Option<Recipients>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub success: bool,
    pub recipients: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}
