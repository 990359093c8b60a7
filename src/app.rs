use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/refresh", post(handlers::refresh))
        .route("/api/summaries", get(handlers::get_summaries))
        .route("/api/status", get(handlers::get_status))
        .with_state(state)
}
