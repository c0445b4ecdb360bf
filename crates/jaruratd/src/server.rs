//! HTTP server for jaruratd

use anyhow::{Context, Result};
use tracing::info;

use crate::routes;
use crate::state::SharedState;

/// Run the HTTP server until Ctrl-C
pub async fn run(state: SharedState) -> Result<()> {
    let addr = state.config.server.bind.clone();
    let provider = state.reconciler.provider_tag().to_string();
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{} (AI provider: {})", addr, provider);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
