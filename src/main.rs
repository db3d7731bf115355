// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::map_service::MapService;
use crate::application::panel_service::PanelService;
use crate::application::route_launcher::RouteLauncher;
use crate::domain::map::LatLng;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_reading_source::HttpReadingSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create reading source (infrastructure layer)
    let timeout = config.sensors.request_timeout_secs.map(Duration::from_secs);
    let source = Arc::new(HttpReadingSource::new(timeout)?);

    // Create services (application layer)
    let launcher = RouteLauncher::new(config.navigation.base_url.clone());
    let panel_service = PanelService::new(source, launcher);
    let map_service = MapService::new(
        LatLng {
            lat: config.map.center_lat,
            lng: config.map.center_lng,
        },
        config.map.zoom,
    );

    // Create application state
    let state = Arc::new(AppState {
        panel_service,
        map_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting sensor-route-planner on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
