//! HTTP server setup.
//!
//! One POST route for Telegram updates (plus a GET probe on the same path) and a
//! `/health` endpoint. Each request is handled on its own task, which is why the
//! rate limiter guards its state with a lock.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::interface::webhook::{self, AppState};
use crate::strings::logs;

pub fn create_router(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route(
            webhook_path,
            get(webhook::webhook_alive).post(webhook::handle_update),
        )
        .route("/health", get(webhook::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: SocketAddr, webhook_path: &str) -> Result<(), std::io::Error> {
    let app = create_router(state, webhook_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;
    tracing::info!("{}", logs::server_listening(&actual_addr.to_string(), webhook_path));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{}", logs::SERVER_STOPPED);
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
