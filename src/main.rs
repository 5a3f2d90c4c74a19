// src/main.rs
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobmatch::auth::tokens::TokenIssuer;
use jobmatch::build_router;
use jobmatch::common::config::ApiConfig;
use jobmatch::common::{db, migrations, AppState};
use jobmatch::services::AiGateway;
use jobmatch::store::SqliteStore;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting jobmatch api v{}", env!("CARGO_PKG_VERSION"));

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = ApiConfig::from_env();

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    let pool = db::connect_pool(&config.database_url).await?;
    migrations::run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let store = Arc::new(SqliteStore::new(pool));
    let ai = AiGateway::from_config(&config.ai);
    let tokens = TokenIssuer::new(config.jwt_secret.clone(), config.access_token_expire_minutes);
    let state = Arc::new(AppState::with_store(store, ai, tokens));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let origins: Vec<axum::http::HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    let app = build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
