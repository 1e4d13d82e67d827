use std::sync::Arc;

use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use dic_core::{PgStore, ServiceConfig};

/// Main entry point for the drug interaction checker server
///
/// Loads configuration, opens the database pool and serves the REST API until Ctrl+C or
/// SIGTERM is received.
///
/// # Environment Variables
/// - `PORT`: listening port (default: 3000)
/// - `DIC_BIND_HOST`: listening host (default: "0.0.0.0")
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_TLS_VERIFY`: verify the database certificate (default: true)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
///
/// A `.env` file in the working directory is loaded first if present.
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - configuration is missing or invalid,
/// - the database cannot be reached, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["dic_run=info", "api_rest=info", "dic_core=info", "tower_http=info"] {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServiceConfig::from_env()?;
    tracing::debug!(?cfg, "configuration loaded");

    let store = PgStore::connect(&cfg).await?;
    let app = api_rest::router(AppState::new(Arc::new(store)));

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        "++ Server running on http://{}:{}",
        cfg.bind_host(),
        cfg.port()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
