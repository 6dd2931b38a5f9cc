//! # Inmo Web Server
//!
//! The HTTP boundary of the valuation service. It owns request validation,
//! CORS, and the mapping of engine failures onto status codes; the pricing
//! itself is entirely the `valuation` crate's business.

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use configuration::{Config, StatsSourceKind};
use database::{DbRepository, DbStatsSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use valuation::{FixedStatsSource, StatsSource, ValuationEngine};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub engine: ValuationEngine,
}

/// Builds the application router around an already-constructed state.
/// Split out from `run_server` so tests can drive the router directly.
pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/valuation/estimate", post(handlers::estimate_valuation))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Constructs the statistics source the configuration selects, wires the
/// engine on top of it, and serves until the process is stopped. The source
/// choice happens exactly once, here.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let stats_source: Arc<dyn StatsSource> = match config.valuation.stats_source {
        StatsSourceKind::Database => {
            let db_pool = database::connect().await?;
            database::run_migrations(&db_pool).await?;
            Arc::new(DbStatsSource::new(DbRepository::new(db_pool)))
        }
        StatsSourceKind::Fixed => Arc::new(FixedStatsSource::new(
            config.valuation.fixed_stats.as_zone_stats(),
        )),
    };

    let state = Arc::new(AppState {
        engine: ValuationEngine::new(stats_source),
    });
    let app = build_router(state, &config.application.allowed_origins);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!(app = %config.application.name, "Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
}
