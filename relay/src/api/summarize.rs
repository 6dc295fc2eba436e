use warp::{Rejection, Reply};

use crate::error::reject;
use crate::metrics::Metrics;
use crate::models::{SummarizeRequest, SummaryResponse};
use crate::summary::{SummarizationRequest, Summarizer};

pub async fn handle_summarize(
    body: SummarizeRequest,
    summarizer: Summarizer,
    metrics: Metrics,
) -> Result<impl Reply, Rejection> {
    let request = SummarizationRequest::new(body.text.unwrap_or_default(), body.style_hint);
    let result = summarizer.summarize(&request).await.map_err(reject)?;

    metrics.record_summary(result.used_fallback);
    Ok(warp::reply::json(&SummaryResponse::from(result)))
}
