mod applications;
mod auth;
mod catalog;
mod config;
mod dashboard;
mod db;
mod errors;
mod extract;
mod format;
mod jobs;
mod matching;
mod models;
mod profiles;
mod routes;
mod search;
mod seed;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::scorer::{MatchScorer, SkillOverlapScorer};
use crate::routes::build_router;
use crate::seed::seed_demo_data;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BlueCoLab API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (migrations run on connect)
    let db = create_pool(&config.database_url).await?;

    if config.seed_demo_data {
        seed_demo_data(&db, &config.demo_password).await?;
    }

    // Skill overlap scoring; curated scores on a job take precedence
    let match_scorer: Arc<dyn MatchScorer> = Arc::new(SkillOverlapScorer);
    info!("Match scorer: {}", match_scorer.backend());

    let state = AppState::new(db, &config, match_scorer);

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins once the web client has a fixed host
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
