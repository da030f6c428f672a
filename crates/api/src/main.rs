use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

mod app;
mod config;
mod error;
mod jobs;
mod middleware;
mod routes;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Camp Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Install the Prometheus recorder before anything records a metric
    middleware::init_metrics();

    // Create database pool
    let pool = persistence::db::create_pool(&config.database).await?;

    // Run migrations
    info!("Running database migrations...");
    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await?;
    info!("Migrations completed");

    // Seed the first super admin account when none exists
    services::admin_bootstrap::bootstrap_admin(&pool, &config.admin).await?;

    // Background jobs
    let mut scheduler = jobs::JobScheduler::new();
    scheduler.register(jobs::SessionCleanupJob::new(pool.clone()));
    scheduler.register(jobs::PoolSamplerJob::new(pool.clone()));
    scheduler.start();

    // Build application
    let app = app::create_app(config.clone(), pool)?;

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // Let in-flight jobs finish before the process exits
    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(5)).await;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT handler");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.expect("register Ctrl+C handler");
    }

    info!("Shutdown signal received");
}
