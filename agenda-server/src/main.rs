mod routes;
mod state;

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use agenda_core::{AgendaConfig, EventStore};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Local overrides for AGENDA_* variables
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("agenda_core=info,agenda_server=info,tower_http=info")
        }))
        .init();

    let config = AgendaConfig::from_env()?;

    // One client for the whole process; an unreachable deployment is
    // fatal here rather than on the first request
    let store = EventStore::connect(&config)
        .await
        .context("Failed to connect to MongoDB")?;
    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::events::router())
        .merge(routes::calendar::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("agenda-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
