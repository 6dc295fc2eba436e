use std::sync::Arc;
use tracing::{error, info};
use warp::{Rejection, Reply};

use crate::error::{reject, ApiError};
use crate::mailer::Mailer;
use crate::metrics::Metrics;
use crate::models::{EmailRequest, EmailResponse};

pub const DEFAULT_SUBJECT: &str = "Your Summary";

pub async fn handle_email(
    body: EmailRequest,
    mailer: Arc<Mailer>,
    metrics: Metrics,
) -> Result<impl Reply, Rejection> {
    let summary = body
        .summary
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| reject(ApiError::Validation("Summary is required".to_string())))?;

    let recipients = body.recipients.map(|r| r.into_list()).unwrap_or_default();
    let subject = body
        .subject
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    info!("Emailing summary '{}' to {} recipient(s)", subject, recipients.len());

    if let Err(e) = mailer.send_summary(&recipients, &subject, &summary).await {
        error!("Failed to send email: {}", e);
        return Err(reject(e));
    }

    metrics.record_email();
    Ok(warp::reply::json(&EmailResponse {
        success: true,
        recipients: recipients.len(),
    }))
}
