//! Summary relay: summarizes text through a hosted model with a local extractive
//! fallback, and serves the result over HTTP with upload and email delivery.

pub mod api;
pub mod config;
pub mod error;
pub mod mailer;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod summary;
pub mod uploads;

use std::sync::Arc;

use config::Config;
use summary::remote::{RemoteClient, RemoteSummarizer};
use summary::Summarizer;

/// The remote model is only consulted when an API key is configured.
pub fn build_summarizer(config: &Config) -> Summarizer {
    let remote = config.summarizer_api_key.as_ref().map(|key| {
        Arc::new(RemoteClient::new(config.summarizer_url.clone(), key.clone()))
            as Arc<dyn RemoteSummarizer>
    });
    Summarizer::new(remote)
}
