// Fallback Summarizer: extractive summary from the leading sentences, no network

use super::style::{format_sentences, StyleDirective};

pub const MAX_SENTENCES: usize = 5;
/// Sentences at or below this many characters (after trimming) are dropped as fragments.
pub const MIN_SENTENCE_CHARS: usize = 20;

pub struct FallbackSummarizer;

impl FallbackSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// The first `MAX_SENTENCES` sentences longer than `MIN_SENTENCE_CHARS`, in source order.
    pub fn select_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(|c: char| matches!(c, '.' | '!' | '?'))
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
            .take(MAX_SENTENCES)
            .collect()
    }

    pub fn summarize(&self, text: &str, directive: StyleDirective) -> String {
        let sentences = self.select_sentences(text);
        format_sentences(&sentences, directive)
    }
}

impl Default for FallbackSummarizer {
    fn default() -> Self {
        Self::new()
    }
}
