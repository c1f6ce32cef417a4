//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                 - Liveness check
//! GET  /health/ready                           - Readiness check (store ping)
//!
//! # Agents
//! GET    /api/agents                           - List agents (public)
//! POST   /api/agents                           - Create agent (admin)
//! GET    /api/agents/{name}                    - Get one agent (public)
//! PUT    /api/agents/{name}                    - Partial update (admin)
//! DELETE /api/agents/{name}                    - Delete agent (admin)
//! GET    /api/agents/{name}/widget-config      - Widget config with key fallback
//!
//! # Auth
//! POST /api/auth                               - {"action": "login"|"logout"}
//! ```
//!
//! Status codes are the contract: 200/201 success, 400 validation, 401
//! unauthenticated, 404 absent, 409 duplicate name, 500 store or
//! configuration failure.

pub mod agents;
pub mod auth;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the agent routes router.
pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(agents::list).post(agents::create))
        .route(
            "/{name}",
            get(agents::show).put(agents::update).delete(agents::remove),
        )
        .route("/{name}/widget-config", get(agents::widget_config))
}

/// Create all routes for the console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/agents", agent_routes())
        .route("/api/auth", post(auth::authenticate))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(axum::extract::State(state): axum::extract::State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
