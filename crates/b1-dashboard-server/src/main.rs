use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use b1_dashboard_server::config::Settings;
use b1_dashboard_server::routes::build_router;
use b1_dashboard_server::services::ServiceLayerClient;
use b1_dashboard_server::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,b1_dashboard_server=debug".to_string()),
        )
        .with_target(true)
        .init();

    info!("🚀 Starting B1 dashboard server...");

    // Load configuration; a missing or invalid file aborts startup
    let settings = Settings::load()?;
    info!(
        "✅ Configuration loaded ({} selectable databases)",
        settings.databases.len()
    );

    // Session store and its periodic sweep
    let store = Arc::new(SessionStore::new());
    let _sweeper =
        store.spawn_sweeper(Duration::from_secs(settings.session.sweep_interval_seconds));
    info!("✅ Session sweeper started");

    // Service Layer gateway
    let gateway = Arc::new(ServiceLayerClient::new(
        settings.service_layer.clone(),
        settings.session.default_timeout_minutes,
    )?);
    info!("✅ Service Layer client ready ({})", settings.service_layer.base_url);

    let settings = Arc::new(settings);
    let app = build_router(Arc::clone(&settings), store, gateway);

    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));
    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    // dropping the sweeper guard aborts the background sweep
    Ok(())
}
