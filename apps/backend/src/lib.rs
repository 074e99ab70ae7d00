pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use dictation_core::{default_sub_levels, AnswerChecker, Catalog, SubLevel};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub checker: AnswerChecker,
    pub catalog: Arc<Catalog>,
    pub sub_levels: Arc<Vec<SubLevel>>,
}

impl AppState {
    /// State with the bundled sub-level courses.
    pub fn new(checker: AnswerChecker, catalog: Catalog) -> Self {
        Self::with_sub_levels(checker, catalog, default_sub_levels())
    }

    pub fn with_sub_levels(
        checker: AnswerChecker,
        catalog: Catalog,
        sub_levels: Vec<SubLevel>,
    ) -> Self {
        Self {
            checker,
            catalog: Arc::new(catalog),
            sub_levels: Arc::new(sub_levels),
        }
    }
}

/// Build the API router without the outer HTTP layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/config", get(routes::check::config))
        .route("/api/check", post(routes::check::check))
        .route("/api/levels", get(routes::items::levels))
        .route("/api/levels/preview", post(routes::items::preview))
        .route("/api/levels/{level}/exam", get(routes::items::exam))
        .route("/api/sub-levels", get(routes::items::sub_levels))
        .route("/api/items", get(routes::items::list))
        .route("/api/items/{id}", get(routes::items::get))
        .route("/api/items/{id}/check", post(routes::items::check))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let catalog = match &config.items_dir {
        Some(dir) => {
            tracing::info!("Loading items from {}...", dir.display());
            services::catalog::load_catalog_dir(dir).await?
        }
        None => {
            tracing::warn!("ITEMS_DIR not set, serving free-form checks only");
            Catalog::new()
        }
    };

    let checker = AnswerChecker::try_new(config.checker)?;
    let state = AppState::new(checker, catalog);

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
