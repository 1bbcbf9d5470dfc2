use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/check-username", post(handlers::check_username))
        .route("/api/save-user", post(handlers::save_user))
        .route("/api/record", post(handlers::record))
        .route("/api/grid", get(handlers::grid))
        .route("/api/sweep", post(handlers::sweep))
        .with_state(state)
}
