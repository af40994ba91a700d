mod config;
mod forwarding;
mod logging;
mod models;
mod normalize;
mod solver;

use config::Config;
use solver::SolverClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub solver: SolverClient,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::setup_tracing(config.is_production);

    info!("Starting FlareProxy adapter...");

    let app_state = Arc::new(AppState {
        solver: SolverClient::new(config.solver_url.clone())?,
    });
    let app = forwarding::router(app_state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(
        solver_url = %config.solver_url,
        "FlareProxy adapter listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("FlareProxy adapter shutting down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, draining in-flight requests..."),
        _ = terminate => info!("SIGTERM received, draining in-flight requests..."),
    }
}
