pub mod fallback;
pub mod orchestrator;
pub mod remote;
pub mod style;

pub use orchestrator::{SummarizeError, Summarizer};
pub use style::StyleDirective;

#[derive(Debug, Clone)]
pub struct SummarizationRequest {
    pub text: String,
    pub style_hint: Option<String>,
}

impl SummarizationRequest {
    pub fn new(text: impl Into<String>, style_hint: Option<String>) -> Self {
        Self {
            text: text.into(),
            style_hint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizationResult {
    pub summary: String,
    pub used_fallback: bool,
    pub original_length: usize,
    pub summary_length: usize,
}
