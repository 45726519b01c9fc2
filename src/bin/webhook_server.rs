use anyhow::{Context, Result};
use axum::extract::Request;
use axum::ServiceExt;
use tokio::signal;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use webhook_fanout::app::AppEnv;
use webhook_fanout::services::delivery::DeliveryEngine;
use webhook_fanout::services::notify::WebhookNotifyServiceImpl;
use webhook_fanout::services::registry::InMemoryRegistry;
use webhook_fanout::{http::router, *};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cnf = config::get()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cnf.rust_log).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE))
        .init();

    let registry = InMemoryRegistry::new();
    let engine = DeliveryEngine::from_config(cnf)?;
    tracing::debug!("outbound delivery timeout: {:?}", engine.timeout());
    let notify_svc = WebhookNotifyServiceImpl::new(registry, engine);
    let app = AppEnv::new(notify_svc);
    let router = router::new_normalized(app).await;

    tracing::info!("starting axum server");
    let socket_addr = cnf.socket_addr();
    let sock = tokio::net::TcpSocket::new_v4()?;
    sock.set_reuseaddr(true)?;
    sock.bind(socket_addr.parse().context("invalid APP_HOST/APP_PORT")?)?;
    let listener = sock.listen(cnf.listen_backlog)?;
    tracing::info!("listening on {socket_addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("axum server failed")?;
    tracing::info!("process terminated");
    Ok(())
}

/// Resolves on the first Ctrl-C or SIGTERM. A handler that fails to install only
/// disables its own signal.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    let reason = tokio::select! {
        _ = interrupt => "interrupt",
        _ = terminate => "SIGTERM",
    };
    tracing::info!("{reason} received, draining in-flight requests before exit");
}
