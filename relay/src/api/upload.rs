use bytes::Buf;
use futures::TryStreamExt;
use tracing::info;
use warp::multipart::{FormData, Part};
use warp::{Rejection, Reply};

use crate::error::{reject, ApiError};
use crate::metrics::Metrics;
use crate::models::{SummaryResponse, UploadResponse};
use crate::summary::{SummarizationRequest, Summarizer};
use crate::uploads::{is_text_file, UploadError, UploadStore};

pub async fn handle_upload(
    mut form: FormData,
    uploads: UploadStore,
    summarizer: Summarizer,
    metrics: Metrics,
) -> Result<impl Reply, Rejection> {
    info!("Receiving text upload...");

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut style_hint: Option<String> = None;

    while let Some(part) = form
        .try_next()
        .await
        .map_err(|e| reject(ApiError::Validation(format!("Malformed upload: {}", e))))?
    {
        let name = part.name().to_string();
        match name.as_str() {
            "file" => {
                let filename = part.filename().unwrap_or("upload.txt").to_string();
                if !is_text_file(&filename, part.content_type()) {
                    return Err(reject(UploadError::NotText));
                }
                let data = read_part(part).await?;
                file = Some((filename, data));
            }
            "styleHint" => {
                let data = read_part(part).await?;
                style_hint = String::from_utf8(data).ok().filter(|s| !s.trim().is_empty());
            }
            _ => {}
        }
    }

    let (filename, data) = file.ok_or_else(|| reject(UploadError::Missing))?;
    info!("Ingesting file '{}' ({} bytes)", filename, data.len());

    let text = uploads.ingest(&filename, &data).await.map_err(reject)?;
    metrics.record_upload();

    let result = summarizer
        .summarize(&SummarizationRequest::new(text, style_hint))
        .await
        .map_err(reject)?;
    metrics.record_summary(result.used_fallback);

    Ok(warp::reply::json(&UploadResponse {
        summary: SummaryResponse::from(result),
        filename,
    }))
}

async fn read_part(part: Part) -> Result<Vec<u8>, Rejection> {
    part.stream()
        .try_fold(Vec::new(), |mut vec, data| async move {
            vec.extend_from_slice(data.chunk());
            Ok(vec)
        })
        .await
        .map_err(|e| reject(ApiError::Validation(format!("Malformed upload: {}", e))))
}
