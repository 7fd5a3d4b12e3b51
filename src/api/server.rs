use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{
    services::{next_arrivals, next_arrivals_preflight, not_found, root},
    state::AppState,
};
use crate::config::Config;
use crate::gateway::RedClient;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const NEXT_ARRIVALS_PATH: &str = "/stops/{stop_id}/next_arrivals";

/// Builds the application router.
///
/// Unknown paths, and unsupported methods on known paths, fall through to
/// the plain-text 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root).fallback(not_found))
        .route(
            NEXT_ARRIVALS_PATH,
            get(next_arrivals)
                .options(next_arrivals_preflight)
                .fallback(not_found),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn run(config: Config) -> Result<(), AnyError> {
    let gateway = RedClient::new(&config.upstream)?;
    info!(
        prediction_url = %config.upstream.prediction_url,
        request_timeout = %config.upstream.request_timeout,
        "Upstream gateway ready"
    );

    let address = config.server.bind_addr;
    let state = AppState::new(&config, Arc::new(gateway));
    let app = router(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "Arrivals proxy listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
