use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::add_habit_form))
        .route("/habits/:id/toggle", post(handlers::toggle_habit_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/habits", post(handlers::add_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .with_state(state)
}
