use crate::app::AppEnv;
use std::sync::Arc;

use axum::routing::post;
use axum::{routing::get, Router};
use tower::{Layer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

mod webhook;

pub async fn new(app: AppEnv) -> Router {
    let app_state = Arc::new(app);
    Router::new()
        .route("/", get(webhook::home))
        .route("/api/webhooks", post(webhook::register_handler))
        .route("/api/webhooks/test", post(webhook::trigger_handler))
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
}

/// Same routes, with trailing slashes trimmed before routing so `/api/webhooks/`
/// resolves too. A `Router::layer` runs after route matching, hence the wrapper.
pub async fn new_normalized(app: AppEnv) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(new(app).await)
}
