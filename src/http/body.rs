use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header;
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::model::error::AppError;

/// Request body read as an urlencoded form when declared so, otherwise as JSON
/// regardless of content type. Anything undecodable is answered with a 400
/// envelope instead of a bare extractor rejection.
#[derive(Debug, Clone)]
pub struct RequestBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RequestBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            return Ok(Self(value));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;
        decode_json(&bytes).map(Self)
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// An empty or `null` body decodes as `{}` so every field reads as missing.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let value = if bytes.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(bytes).map_err(|e| {
            AppError::MalformedBody(format!("Failed to parse the request body as JSON: {e}"))
        })?
    };
    let object = match value {
        Value::Null => Value::Object(Map::new()),
        object @ Value::Object(_) => object,
        _ => {
            return Err(AppError::MalformedBody(
                "Request body must be a JSON object".to_string(),
            ))
        }
    };
    serde_json::from_value(object).map_err(|e| {
        AppError::MalformedBody(format!("Failed to deserialize the request body: {e}"))
    })
}
