use crate::errors::AppError;
use crate::models::{Coords, FormSubmission, GeolocationReport, MapClickRequest, TypeChangeRequest};
use crate::state::AppState;
use crate::tracker::{Tracker, TrackerSnapshot};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use std::sync::Arc;
use tokio::task;

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

pub async fn get_state(State(state): State<AppState>) -> Json<TrackerSnapshot> {
    let tracker = state.tracker.lock().await;
    Json(tracker.snapshot())
}

pub async fn report_location(
    State(state): State<AppState>,
    Json(report): Json<GeolocationReport>,
) -> Json<TrackerSnapshot> {
    let mut tracker = state.tracker.lock().await;
    tracker.locate(report);
    Json(tracker.snapshot())
}

pub async fn map_click(
    State(state): State<AppState>,
    Json(payload): Json<MapClickRequest>,
) -> Result<Json<TrackerSnapshot>, AppError> {
    let mut tracker = state.tracker.lock().await;
    tracker.click_map(Coords(payload.lat, payload.lng))?;
    Ok(Json(tracker.snapshot()))
}

pub async fn change_type(
    State(state): State<AppState>,
    Json(payload): Json<TypeChangeRequest>,
) -> Json<TrackerSnapshot> {
    let mut tracker = state.tracker.lock().await;
    tracker.change_type(payload.workout_type);
    Json(tracker.snapshot())
}

pub async fn submit_form(
    State(state): State<AppState>,
    Json(payload): Json<FormSubmission>,
) -> Result<Json<TrackerSnapshot>, AppError> {
    let snapshot = with_storage(&state, move |tracker| {
        tracker.submit(&payload)?;
        Ok(tracker.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

pub async fn activate_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<TrackerSnapshot> {
    let mut tracker = state.tracker.lock().await;
    tracker.activate(&id);
    Json(tracker.snapshot())
}

pub async fn reset_workouts(State(state): State<AppState>) -> Result<Json<TrackerSnapshot>, AppError> {
    let snapshot = with_storage(&state, |tracker| {
        tracker.reset();
        Ok(tracker.snapshot())
    })
    .await?;
    Ok(Json(snapshot))
}

/// Runs a tracker operation that touches the blob store on the blocking pool,
/// holding the tracker lock for its whole duration.
async fn with_storage<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&mut Tracker) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let mut tracker = Arc::clone(&state.tracker).lock_owned().await;
    task::spawn_blocking(move || op(&mut tracker))
        .await
        .map_err(AppError::internal)?
}
