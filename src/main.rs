use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cafebook::config::AppConfig;
use cafebook::models::Catalog;
use cafebook::routes;
use cafebook::services::reservations::http::HttpReservations;
use cafebook::services::reservations::simulated::SimulatedReservations;
use cafebook::services::reservations::ReservationProvider;
use cafebook::services::sweeper;
use cafebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let catalog = if config.catalog_path.is_empty() {
        Catalog::builtin()
    } else {
        Catalog::load(Path::new(&config.catalog_path))
    };
    tracing::info!(offerings = catalog.offerings.len(), currency = %catalog.currency, "catalog loaded");

    let reservations: Box<dyn ReservationProvider> = if config.reservations_url.is_empty() {
        tracing::info!("using simulated reservations (delay: {:?})", config.submit_delay);
        Box::new(SimulatedReservations::new(config.submit_delay))
    } else {
        tracing::info!("forwarding reservations to {}", config.reservations_url);
        Box::new(HttpReservations::new(config.reservations_url.clone()))
    };

    if config.payment_integrity_secret.is_empty() {
        tracing::warn!("PAYMENT_INTEGRITY_SECRET not set, payment signatures unavailable");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(static_dir = %config.static_dir, "serving static assets");

    let state = Arc::new(AppState::new(config, catalog, reservations));
    sweeper::spawn(Arc::clone(&state));
    let app = routes::router(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
