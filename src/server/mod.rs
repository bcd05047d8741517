//! HTTP surface: `/getRecipes`, `/randomQuote` and `/health`.

pub mod auth;
pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use auth::AuthConfig;
pub use error::{ApiError, ErrorBody};

use crate::config::ServiceConfig;
use crate::error::{GenerationError, Result};
use crate::generation::Orchestrator;

/// Shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, auth: AuthConfig) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            auth: Arc::new(auth),
        }
    }
}

/// Build the router. Generation routes sit behind the shared-secret gate;
/// `/health` does not.
pub fn router(state: AppState) -> Router {
    let generation = Router::new()
        .route("/getRecipes", get(routes::get_recipes))
        .route("/randomQuote", get(routes::random_quote))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth::require_shared_secret,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .merge(generation)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `config.port` and serve until Ctrl-C.
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    let auth = AuthConfig::from_config(config)?;
    if !auth.is_enabled() {
        tracing::warn!("SECRET_KEY not set; generation routes are unauthenticated");
    }
    let app = router(AppState::new(orchestrator, auth));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        GenerationError::Configuration(format!("cannot bind {addr}: {e}"))
    })?;
    info!(%addr, model = %config.model, "recipe-relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GenerationError::Configuration(format!("server error: {e}")))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
