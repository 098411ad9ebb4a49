//! Keystone - CRM REST service
//!
//! Loads configuration, opens the database and serves the API until
//! interrupted.

use std::sync::Arc;

use anyhow::Context;
use keystone_api::utils::logging::init_tracing;
use keystone_api::{build_router, AppContext};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = keystone_infra::config::load().context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    let address = config.server.bind_address();
    let ctx = Arc::new(AppContext::new(config).context("failed to initialise application")?);
    let app = build_router(ctx);

    let listener =
        TcpListener::bind(&address).await.with_context(|| format!("failed to bind {address}"))?;
    info!(address = %listener.local_addr()?, "Keystone listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Keystone stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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

    info!("shutdown signal received");
}
