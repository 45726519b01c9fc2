use axum::Json;
use axum::response::{IntoResponse, Response};
use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::response::{OutcomeReport, ResponseEnvelope};

/// Rejection of client input, raised while constructing a [`super::Webhook`] or a
/// [`super::Payload`]. Always answered with a 400.
#[derive(ThisError, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL is required")]
    UrlRequired,
    #[error("URL cannot be empty")]
    UrlEmpty,
    #[error("URL format is invalid")]
    UrlInvalid,
    #[error("Token is required")]
    TokenRequired,
    #[error("Token cannot be empty")]
    TokenEmpty,
    #[error("Payload is required")]
    PayloadRequired,
}

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    // body could not be decoded into the request shape at all
    #[error("{0}")]
    MalformedBody(String),
    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let report = OutcomeReport {
            url: None,
            status_code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(ResponseEnvelope::build(vec![], vec![report]))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

/// Failure of a single outbound delivery. Converted into a failure outcome at the
/// dispatch boundary, never propagated out of the delivery engine.
#[derive(Debug, ThisError)]
pub enum DeliveryError {
    #[error(transparent)]
    Transport(reqwest::Error),
    #[error("{status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("delivery task aborted")]
    Aborted(#[source] tokio::task::JoinError),
}

impl DeliveryError {
    /// Remote status when one exists, otherwise internal error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeliveryError::Rejected { status, .. } => *status,
            DeliveryError::Transport(_) | DeliveryError::Aborted(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message with every cause in the chain, e.g. the io error under a failed
    /// connect.
    pub fn detail(self) -> String {
        format!("{:#}", anyhow::Error::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::UrlRequired.to_string(), "URL is required");
        assert_eq!(ValidationError::UrlEmpty.to_string(), "URL cannot be empty");
        assert_eq!(ValidationError::UrlInvalid.to_string(), "URL format is invalid");
        assert_eq!(ValidationError::TokenRequired.to_string(), "Token is required");
        assert_eq!(ValidationError::TokenEmpty.to_string(), "Token cannot be empty");
        assert_eq!(ValidationError::PayloadRequired.to_string(), "Payload is required");
    }

    #[test]
    fn app_error_status() {
        assert_eq!(
            AppError::from(ValidationError::TokenEmpty).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("disk on fire")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rejected_delivery_keeps_remote_status() {
        let err = DeliveryError::Rejected {
            status: StatusCode::NOT_FOUND,
            body: "nope".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found: nope");
        assert_eq!(err.detail(), "404 Not Found: nope");
    }

    #[tokio::test]
    async fn aborted_delivery_detail_includes_cause() {
        let joined = tokio::spawn(async {
            if true {
                panic!("boom");
            }
        })
        .await;
        let err = DeliveryError::Aborted(joined.unwrap_err());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = err.detail();
        assert!(detail.starts_with("delivery task aborted: "), "{detail}");
        assert!(detail.contains("panicked"), "{detail}");
    }
}
