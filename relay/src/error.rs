use thiserror::Error;
use warp::http::StatusCode;
use warp::{reject::Reject, Reply, Rejection};

use crate::mailer::MailError;
use crate::models::ErrorResponse;
use crate::summary::SummarizeError;
use crate::uploads::UploadError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Email is not configured")]
    MailNotConfigured,

    #[error("Failed to send email: {0}")]
    MailDelivery(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl Reject for ApiError {}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MailNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MailDelivery(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_response(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(msg) => ErrorResponse::new(msg.clone(), None),
            ApiError::MailNotConfigured => ErrorResponse::new(self.to_string(), None),
            ApiError::MailDelivery(details) => {
                ErrorResponse::new("Failed to send email", Some(details.clone()))
            }
            ApiError::InternalError(details) => {
                ErrorResponse::new("Internal server error", Some(details.clone()))
            }
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::NotConfigured => ApiError::MailNotConfigured,
            MailError::NoRecipients | MailError::Address { .. } => {
                ApiError::Validation(err.to_string())
            }
            MailError::Transport(e) => ApiError::MailDelivery(e.to_string()),
            MailError::Build(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(e) => ApiError::InternalError(e.to_string()),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

pub fn reject(err: impl Into<ApiError>) -> Rejection {
    warp::reject::custom(err.into())
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    let (status, body) = if let Some(api_err) = err.find::<ApiError>() {
        (api_err.status(), api_err.to_response())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("Invalid request body", Some(e.to_string())),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::new("Upload too large", None),
        )
    } else {
        return Err(err);
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
