use std::sync::Arc;
use tracing::error;
use warp::{Filter, Rejection, Reply};

use crate::mailer::Mailer;
use crate::metrics::Metrics;
use crate::summary::Summarizer;
use crate::uploads::UploadStore;

mod email;
mod summarize;
mod upload;

pub fn routes(
    summarizer: Summarizer,
    mailer: Arc<Mailer>,
    uploads: UploadStore,
    metrics: Metrics,
    max_upload_bytes: u64,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api = warp::path("api");

    let summarize_route = api
        .and(warp::path("summarize"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_summarizer(summarizer.clone()))
        .and(with_metrics(metrics.clone()))
        .and_then(summarize::handle_summarize);

    let upload_route = api
        .and(warp::path("upload"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::multipart::form().max_length(max_upload_bytes))
        .and(with_uploads(uploads))
        .and(with_summarizer(summarizer))
        .and(with_metrics(metrics.clone()))
        .and_then(upload::handle_upload);

    let email_route = api
        .and(warp::path("email"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_mailer(mailer))
        .and(with_metrics(metrics))
        .and_then(email::handle_email);

    summarize_route.or(upload_route).or(email_route)
}

/// `GET /health` and `GET /metrics`.
pub fn ops_routes(
    metrics: Metrics,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    // Health check route
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        });

    // Metrics route
    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .map(move || match metrics.render() {
            Ok((buffer, content_type)) => warp::http::Response::builder()
                .header("Content-Type", content_type)
                .body(buffer),
            Err(e) => {
                error!("Failed to encode metrics: {}", e);
                warp::http::Response::builder()
                    .status(warp::http::StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Vec::new())
            }
        });

    health.or(metrics_route)
}

fn with_summarizer(
    summarizer: Summarizer,
) -> impl Filter<Extract = (Summarizer,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || summarizer.clone())
}

fn with_mailer(
    mailer: Arc<Mailer>,
) -> impl Filter<Extract = (Arc<Mailer>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || mailer.clone())
}

fn with_uploads(
    uploads: UploadStore,
) -> impl Filter<Extract = (UploadStore,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || uploads.clone())
}

fn with_metrics(
    metrics: Metrics,
) -> impl Filter<Extract = (Metrics,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || metrics.clone())
}
