use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use tracing::{debug, info, warn};

pub mod events;
pub mod handlers;
pub mod sessions;
pub mod state;

pub use self::state::AppState;
use crate::constants::SESSION_SWEEP_INTERVAL_SECS;
use handlers::{
    create_session, delete_session, get_session, get_view, index_html, list_locations, post_event,
    script_js, style_css, world_map_svg,
};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/script.js", get(script_js))
        .route("/world-map.svg", get(world_map_svg))
        .route("/api/locations", get(list_locations))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/events", post(post_event))
        .route("/api/sessions/:id/view", get(get_view))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

fn spawn_session_sweeper(state: &AppState) {
    let sessions = state.sessions.clone();
    let max_idle = chrono::Duration::minutes(i64::from(state.settings.session_idle_minutes));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(SESSION_SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            let removed = sessions.prune_idle(chrono::Utc::now(), max_idle);
            debug!(removed, "session sweep finished");
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {}", e);
        return std::future::pending().await;
    }
    info!("shutdown requested");
}

/// Resolves `host` (IPv4/IPv6 literal or hostname) to the first usable listen address.
pub async fn resolve_listen_addr(host: &str, port: u16) -> Result<SocketAddr> {
    // Bracketed IPv6 ("[::1]") is accepted as well as the bare form.
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let mut addrs = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Invalid listen host '{}'", host))?;
    addrs
        .next()
        .with_context(|| format!("Listen host '{}' resolved to no addresses", host))
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr = resolve_listen_addr(&state.settings.host, state.settings.port).await?;

    if state.settings.session_idle_minutes > 0 {
        spawn_session_sweeper(&state);
    }

    let app = create_app(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server started at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}
