//! Embedded HTTP server with background tasks and graceful shutdown.

use std::net::SocketAddr;

use axum::Router;
use tracing::info;

use crate::state::AppState;
use crate::tasks::TaskSet;

/// Starts the background tasks and serves the application until ctrl-c or
/// SIGTERM, then stops the task loops.
pub async fn serve(state: &AppState, app: Router, tasks: TaskSet) -> anyhow::Result<()> {
    let runner = tasks.spawn();

    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen addr {}:{} - {}", host, port, e))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("{} listening on http://{}", env!("CARGO_PKG_NAME"), listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    runner.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received. Stopping server...");
}
