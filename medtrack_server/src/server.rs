use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use medtrack_config::Config;
use medtrack_core::Clock;
use medtrack_session::MedicationTracker;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::build_router;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Medication Tracker";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bind `server.host:server.port` and serve until Ctrl-C.
pub async fn serve(tracker: Arc<MedicationTracker>, config: &Config) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let sweeper = spawn_sweeper(
        Arc::clone(&tracker),
        Duration::from_secs(config.session.sweep_interval_secs.max(1)),
    );

    let app = build_router(AppState::new(tracker, config.history.default_days));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running on http://{addr}");
    info!("Webhook: http://<your-ip>:{}/medication-tracker", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Server stopped");
    Ok(())
}

/// Periodically drop idle sessions from the tracker's registry.
pub fn spawn_sweeper(tracker: Arc<MedicationTracker>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let now = tracker.clock().now();
            let removed = tracker.sessions().sweep(now);
            if removed > 0 {
                debug!(
                    "Swept {removed} idle sessions, {} remain",
                    tracker.sessions().len()
                );
            }
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
