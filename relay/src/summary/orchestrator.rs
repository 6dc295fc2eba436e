// Summarization Orchestrator: remote model first, local extractive fallback on any failure

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use super::fallback::FallbackSummarizer;
use super::remote::RemoteSummarizer;
use super::style::{format_prose, StyleDirective};
use super::{SummarizationRequest, SummarizationResult};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("{0}")]
    Validation(String),
}

#[derive(Clone)]
pub struct Summarizer {
    remote: Option<Arc<dyn RemoteSummarizer>>,
    fallback: Arc<FallbackSummarizer>,
}

impl Summarizer {
    pub fn new(remote: Option<Arc<dyn RemoteSummarizer>>) -> Self {
        Self {
            remote,
            fallback: Arc::new(FallbackSummarizer::new()),
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResult, SummarizeError> {
        let text = request.text.as_str();
        if text.trim().is_empty() {
            return Err(SummarizeError::Validation("Text is required".to_string()));
        }

        let request_id = Uuid::new_v4();
        let directive = StyleDirective::from_hint(request.style_hint.as_deref());
        let original_length = text.chars().count();
        info!(
            "Summarizing [{}]: {} chars, style {:?}",
            request_id, original_length, directive
        );

        let remote_outcome = match &self.remote {
            Some(remote) => Some(remote.summarize(text).await),
            None => None,
        };

        let (summary, used_fallback) = match remote_outcome {
            Some(Ok(prose)) => (format_prose(&prose, directive), false),
            Some(Err(e)) => {
                warn!("Remote summarization failed [{}], using fallback: {}", request_id, e);
                (self.fallback.summarize(text, directive), true)
            }
            None => {
                info!("No remote summarizer configured [{}], using fallback", request_id);
                (self.fallback.summarize(text, directive), true)
            }
        };

        let summary_length = summary.chars().count();
        info!(
            "Summary ready [{}]: {} chars, fallback={}",
            request_id, summary_length, used_fallback
        );

        Ok(SummarizationResult {
            summary,
            used_fallback,
            original_length,
            summary_length,
        })
    }
}
