use crate::errors::{INVALID_INPUT_NOTICE, LOCATION_UNAVAILABLE_NOTICE, TrackerError};
use crate::form::{FORM_RESET_DELAY, FormController, FormView};
use crate::map::{MAP_ZOOM_LEVEL, MapController, MapView};
use crate::models::{Coords, FormSubmission, GeolocationReport, Workout, WorkoutType};
use crate::storage::{BlobStore, WORKOUTS_KEY, load_blob, persist_blob};
use crate::store::WorkoutStore;
use crate::ui;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Where the page is in the add-a-workout flow. `Locating` and `Unavailable`
/// come before the map exists; nothing leaves `Unavailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Locating,
    Unavailable,
    Idle,
    FormOpen,
}

#[derive(Debug, Serialize)]
pub struct TrackerSnapshot {
    pub phase: Phase,
    pub notice: Option<String>,
    pub map: MapView,
    pub form: FormView,
    pub workouts: Vec<Workout>,
    pub list_html: String,
}

/// Ties the map, the form and the workout store together and keeps the
/// persisted copy in step with the store.
pub struct Tracker {
    phase: Phase,
    notice: Option<String>,
    map: MapController<Tracker>,
    form: FormController,
    store: WorkoutStore,
    storage: Arc<dyn BlobStore>,
}

impl Tracker {
    pub fn new(storage: Arc<dyn BlobStore>) -> Self {
        let store = WorkoutStore::restore(load_blob(storage.as_ref(), WORKOUTS_KEY).as_deref());
        info!(count = store.len(), "restored workouts");

        let mut map = MapController::new();
        map.on_location_click(Tracker::show_form);

        Self {
            phase: Phase::Locating,
            notice: None,
            map,
            form: FormController::new(),
            store,
            storage,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn map(&self) -> &MapController<Tracker> {
        &self.map
    }

    /// Handles the single geolocation result. Later reports are ignored.
    pub fn locate(&mut self, report: GeolocationReport) {
        if self.phase != Phase::Locating {
            debug!(phase = ?self.phase, "ignoring repeated geolocation report");
            return;
        }

        match report {
            GeolocationReport::Granted {
                latitude,
                longitude,
            } => self.load_map(Coords(latitude, longitude)),
            GeolocationReport::Denied => {
                warn!("geolocation unavailable");
                self.phase = Phase::Unavailable;
                self.notice = Some(LOCATION_UNAVAILABLE_NOTICE.to_string());
            }
        }
    }

    fn load_map(&mut self, coords: Coords) {
        self.map.center_on(coords, MAP_ZOOM_LEVEL);
        for workout in self.store.all() {
            self.map.place_marker(
                workout.coords,
                ui::popup_content(workout),
                ui::popup_class(workout.workout_type()),
            );
        }
        self.phase = Phase::Idle;
        info!(lat = coords.lat(), lng = coords.lng(), "map loaded");
    }

    pub fn click_map(&mut self, coords: Coords) -> Result<(), TrackerError> {
        if !self.map.is_loaded() {
            return Err(TrackerError::MapNotLoaded);
        }
        if let Some(handler) = self.map.click(coords) {
            handler(self, coords);
        }
        Ok(())
    }

    fn show_form(tracker: &mut Tracker, coords: Coords) {
        debug!(lat = coords.lat(), lng = coords.lng(), "map clicked");
        tracker.form.open();
        tracker.phase = Phase::FormOpen;
    }

    pub fn change_type(&mut self, workout_type: WorkoutType) {
        self.form.select_type(workout_type);
        self.form.toggle_fields_for_type();
    }

    pub fn submit(&mut self, submission: &FormSubmission) -> Result<Workout, TrackerError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        submission: &FormSubmission,
        now: DateTime<Utc>,
    ) -> Result<Workout, TrackerError> {
        if self.phase != Phase::FormOpen || !self.form.is_open() {
            return Err(TrackerError::FormClosed);
        }

        self.form.fill(submission);
        let input = match self.form.read_and_validate() {
            Ok(input) => input,
            Err(err) => {
                warn!("rejected workout input: {err}");
                self.notice = Some(INVALID_INPUT_NOTICE.to_string());
                return Err(err.into());
            }
        };
        let coords = self.map.take_pending().ok_or(TrackerError::NoPendingLocation)?;

        let workout = Workout::new(coords, input, now);
        self.map.place_marker(
            workout.coords,
            ui::popup_content(&workout),
            ui::popup_class(workout.workout_type()),
        );
        self.store.add(workout.clone());
        self.persist();

        self.form.close(FORM_RESET_DELAY);
        self.phase = Phase::Idle;
        self.notice = None;
        info!(id = %workout.id, kind = workout.workout_type().as_str(), "workout added");

        Ok(workout)
    }

    /// Pans to the workout behind a list entry. Unknown ids, and any entry
    /// clicked before the map has loaded, are ignored.
    pub fn activate(&mut self, id: &str) -> bool {
        if !matches!(self.phase, Phase::Idle | Phase::FormOpen) {
            debug!(phase = ?self.phase, %id, "ignoring list entry before map load");
            return false;
        }
        let Some(workout) = self.store.find_by_id_mut(id) else {
            debug!(%id, "no workout for list entry");
            return false;
        };
        workout.click();
        let coords = workout.coords;
        self.map.pan_to(coords, MAP_ZOOM_LEVEL);
        true
    }

    /// Drops every workout, its marker and the persisted copy.
    pub fn reset(&mut self) {
        self.store.clear();
        self.map.clear_markers();
        if let Err(err) = self.storage.remove(WORKOUTS_KEY) {
            error!("failed to remove persisted workouts: {err}");
        }
        info!("workouts cleared");
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            phase: self.phase,
            notice: self.notice.clone(),
            map: self.map.view(),
            form: self.form.view(),
            workouts: self.store.all().to_vec(),
            list_html: ui::render_workout_list(self.store.all()),
        }
    }

    fn persist(&self) {
        match self.store.serialize() {
            Ok(blob) => persist_blob(self.storage.as_ref(), WORKOUTS_KEY, &blob),
            Err(err) => error!("failed to serialize workouts: {err}"),
        }
    }
}
