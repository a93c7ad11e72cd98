use crate::errors::AppError;
use crate::models::{AppData, DEFAULT_POINTS, Habit, NewHabitForm, NewHabitRequest, ToggleResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

// Every request counts as a visit, so rollover runs first under the lock.
// A page left open overnight then acts on today's state, not yesterday's.

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    Html(render_index(tracker.data()))
}

pub async fn get_state(State(state): State<AppState>) -> Json<AppData> {
    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    Json(tracker.data().clone())
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    let points = match payload.points {
        None => DEFAULT_POINTS,
        Some(points) => u32::try_from(points)
            .map_err(|_| AppError::bad_request("points must be between 0 and 4294967295"))?,
    };

    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    let habit = tracker.add_habit(name, points)?;
    debug!(id = habit.id, "habit added");
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    let habit = tracker
        .toggle_habit(id)
        .ok_or_else(|| AppError::not_found(format!("no habit with id {id}")))?;

    Ok(Json(ToggleResponse {
        habit,
        stats: tracker.stats().clone(),
    }))
}

pub async fn add_habit_form(
    State(state): State<AppState>,
    Form(form): Form<NewHabitForm>,
) -> Result<Redirect, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    let name = form.name.trim();
    if !name.is_empty() {
        tracker.add_habit(name, DEFAULT_POINTS)?;
    }
    Ok(Redirect::to("/"))
}

pub async fn toggle_habit_form(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    let mut tracker = state.tracker.lock().await;
    tracker.rollover_if_new_day();
    tracker.toggle_habit(id);
    Redirect::to("/")
}
