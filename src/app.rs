use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/location", post(handlers::report_location))
        .route("/api/map/click", post(handlers::map_click))
        .route("/api/form/type", post(handlers::change_type))
        .route("/api/form/submit", post(handlers::submit_form))
        .route("/api/workouts", delete(handlers::reset_workouts))
        .route("/api/workouts/:id/activate", post(handlers::activate_workout))
        .with_state(state)
}
