//! # deck-api
//!
//! HTTP front door over the task store. Owns authorization and request
//! validation, not persistence: every handler is stateless and shares only
//! the injected database handle.
//!
//! Cross-origin access is permitted from any origin on all endpoints — the
//! board client is served from wherever the team hosts it.

pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use deck_config::AuthConfig;
use deck_db::DeckDb;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DeckDb>,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Arc<DeckDb>, auth: AuthConfig) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
        }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks)
                .post(handlers::create_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/stats", get(handlers::stats))
        .layer(cors)
        .with_state(state)
}
