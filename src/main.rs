//! Subscription Service
//!
//! A REST API for managing subscription records stored in PostgreSQL.
//! Provides CRUD endpoints and an aggregate total cost query.

use std::net::SocketAddr;
use subscription_service::subscriptions::PgSubscriptionRepository;
use subscription_service::{router, AppState, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::load();
    info!("Configuration loaded: {:?}", config);

    info!(
        host = %config.database.host,
        port = %config.database.port,
        database = %config.database.name,
        "Connecting to database"
    );
    let repo = PgSubscriptionRepository::connect(
        config.database.connect_options(),
        config.database.max_connections,
    )
    .await
    .inspect_err(|e| error!("Database connection failed: {}", e))?;

    if config.database.auto_migrate {
        repo.run_migrations()
            .await
            .inspect_err(|e| error!("Migration failed: {}", e))?;
    }

    let app = router(AppState::new(repo));

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
