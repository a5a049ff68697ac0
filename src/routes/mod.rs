use axum::{Router, routing::get};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

mod health;
mod reactions;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub review_command: jointravel_review::Command,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route(
            "/reviews/{id}/reactions",
            get(reactions::status).post(reactions::toggle),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
