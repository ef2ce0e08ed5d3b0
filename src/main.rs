use anyhow::{Context, Result};
use car_service::{AppState, config::AppConfig, services::postgres_store::PgCarStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Optional .env file (read first so it can set RUST_LOG) ---
    let dotenv = dotenvy::dotenv();

    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => tracing::debug!("No .env file found"),
        Err(err) => return Err(err).context("loading .env file"),
    }

    // --- Parse config + migrate flag ---
    let (cfg, migrate) = AppConfig::from_env_and_args().context("invalid configuration")?;

    tracing::info!("Starting car-service with config: {:?}", cfg);

    // --- Connect to PostgreSQL ---
    let store = PgCarStore::connect(&cfg.database)
        .await
        .context("connecting to database")?;
    tracing::info!(
        "Connected to database {} at {}:{}",
        cfg.database.database,
        cfg.database.host,
        cfg.database.port
    );

    // --- Ensure schema ---
    store.ensure_schema().await.context("migrating database")?;

    if migrate {
        tracing::info!("Database migration complete.");
        return Ok(()); // exit after migration
    }

    // --- Build router ---
    let app = car_service::app(AppState::new(store));

    // --- Start server ---
    let addr = cfg.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    tracing::info!("Shutdown signal received");
}
