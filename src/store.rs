use crate::models::Workout;
use tracing::warn;

/// Insertion-ordered workouts for the current session.
#[derive(Debug, Clone, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a persisted blob. Absent and malformed blobs
    /// both yield an empty store.
    pub fn restore(blob: Option<&str>) -> Self {
        let Some(blob) = blob else {
            return Self::default();
        };

        match serde_json::from_str::<Vec<Workout>>(blob) {
            Ok(workouts) => Self { workouts },
            Err(err) => {
                warn!("ignoring malformed workout data: {err}");
                Self::default()
            }
        }
    }

    /// Persistence is left to the caller.
    pub fn add(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|workout| workout.id == id)
    }

    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.workouts)
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
