use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/widget", get(handlers::widget))
        .route("/api/contributions", get(handlers::get_contributions))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
