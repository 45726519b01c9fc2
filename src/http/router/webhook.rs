use crate::app::AppEnv;
use crate::http::body::RequestBody;
use crate::model::error::AppError;
use crate::model::{RegisterRequest, ResponseEnvelope, TriggerRequest};
use crate::services::i_notify::IWebhookNotifyService;
use crate::services::notify::WebhookNotifyServiceImpl;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

#[tracing::instrument(level = "debug")]
pub async fn home() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " is up")
}

#[tracing::instrument(level = "debug", skip_all)]
#[axum::debug_handler]
pub async fn register_handler(
    State(app): State<Arc<AppEnv<WebhookNotifyServiceImpl>>>,
    RequestBody(request): RequestBody<RegisterRequest>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    match app.notify_svc.register(request).await {
        Ok(envelope) => Ok(Json(envelope)),
        Err(err) => {
            log_failure(&err);
            Err(err)
        }
    }
}

#[tracing::instrument(level = "debug", skip_all)]
#[axum::debug_handler]
pub async fn trigger_handler(
    State(app): State<Arc<AppEnv<WebhookNotifyServiceImpl>>>,
    RequestBody(request): RequestBody<TriggerRequest>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    match app.notify_svc.trigger(request).await {
        Ok(envelope) => Ok(Json(envelope)),
        Err(err) => {
            log_failure(&err);
            Err(err)
        }
    }
}

fn log_failure(err: &AppError) {
    match err {
        AppError::Validation(e) => tracing::debug!("rejected request: {e}"),
        AppError::MalformedBody(e) => tracing::debug!("undecodable request body: {e}"),
        AppError::Internal(e) => tracing::error!("error while handling request: {e:?}"),
    }
}
