//! `mealbox serve` — Run the HTTP service.

use anyhow::Context;
use clap::Args;
use mealbox_common::config::MealboxConfig;
use mealbox_server::routes::{AppState, router};
use mealbox_server::service::WorkbookPlanner;
use tokio::net::TcpListener;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind (overrides the configuration).
    #[arg(long, env = "MEALBOX_HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides the configuration).
    #[arg(short, long, env = "MEALBOX_PORT")]
    pub port: Option<u16>,
}

/// Executes the `serve` command until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn execute(args: ServeArgs, mut config: MealboxConfig) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        %addr,
        data_dir = %config.data.dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "mealbox listening"
    );

    let app = router(AppState::new(WorkbookPlanner::from_config(&config)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("mealbox stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                let _ = signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
