use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod constants;
mod html_template;
mod locations;
mod projection;
mod render;
mod server;
mod settings;
mod utils;
mod view_state;

use server::{start_server, AppState};
use settings::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("office_streams=info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("Office Streams v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = Settings::config_path();
    let settings = Settings::load().context("Failed to load settings")?;
    if !config_path.exists() {
        match settings.save() {
            Ok(()) => info!("Wrote default settings to {}", config_path.display()),
            Err(e) => warn!("Could not write default settings: {:#}", e),
        }
    }

    let registry = locations::all();
    let issues = locations::check_registry(registry);
    for issue in &issues {
        warn!("registry check: {}", issue);
    }
    info!(
        locations = registry.len(),
        issues = issues.len(),
        "location registry loaded"
    );

    if settings.auto_open_browser {
        match utils::open_in_browser(&settings.host, settings.port) {
            Ok(url) => info!("Opened {} in the default browser", url),
            Err(e) => warn!("Could not open browser: {}", e),
        }
    }

    let app_state = AppState::new(registry, settings);
    start_server(app_state).await?;

    info!("Server stopped");
    Ok(())
}
