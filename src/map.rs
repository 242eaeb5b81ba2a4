use crate::models::Coords;
use serde::Serialize;

/// Zoom used for the initial view and when panning to a workout.
pub const MAP_ZOOM_LEVEL: u8 = 13;

/// Callback run with the clicked coordinate and the state that owns the map.
pub type LocationClickHandler<T> = fn(&mut T, Coords);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coords: Coords,
    pub popup: String,
    pub style_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Option<Coords>,
    pub zoom: u8,
    pub animate: bool,
    pub markers: Vec<Marker>,
    pub pending: Option<Coords>,
}

/// View state of the interactive map. The page renders it; only this
/// controller changes it.
pub struct MapController<T> {
    loaded: bool,
    center: Option<Coords>,
    zoom: u8,
    animate: bool,
    markers: Vec<Marker>,
    pending: Option<Coords>,
    click_handler: Option<LocationClickHandler<T>>,
}

impl<T> Default for MapController<T> {
    fn default() -> Self {
        Self {
            loaded: false,
            center: None,
            zoom: MAP_ZOOM_LEVEL,
            animate: false,
            markers: Vec::new(),
            pending: None,
            click_handler: None,
        }
    }
}

impl<T> MapController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Initial centering once geolocation has resolved.
    pub fn center_on(&mut self, coords: Coords, zoom: u8) {
        self.loaded = true;
        self.center = Some(coords);
        self.zoom = zoom;
        self.animate = false;
    }

    pub fn place_marker(&mut self, coords: Coords, popup: impl Into<String>, style_class: impl Into<String>) {
        self.markers.push(Marker {
            coords,
            popup: popup.into(),
            style_class: style_class.into(),
        });
    }

    pub fn on_location_click(&mut self, handler: LocationClickHandler<T>) {
        self.click_handler = Some(handler);
    }

    /// Records `coords` as the pending location, replacing any earlier one,
    /// and hands back the registered handler for the caller to run.
    pub fn click(&mut self, coords: Coords) -> Option<LocationClickHandler<T>> {
        self.pending = Some(coords);
        self.click_handler
    }

    pub fn pending(&self) -> Option<Coords> {
        self.pending
    }

    pub fn take_pending(&mut self) -> Option<Coords> {
        self.pending.take()
    }

    pub fn pan_to(&mut self, coords: Coords, zoom: u8) {
        self.center = Some(coords);
        self.zoom = zoom;
        self.animate = true;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
    }

    pub fn view(&self) -> MapView {
        MapView {
            center: self.center,
            zoom: self.zoom,
            animate: self.animate,
            markers: self.markers.clone(),
            pending: self.pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Clicks {
        seen: Vec<Coords>,
    }

    fn record(state: &mut Clicks, coords: Coords) {
        state.seen.push(coords);
    }

    #[test]
    fn starts_unloaded() {
        let map = MapController::<Clicks>::new();
        assert!(!map.is_loaded());
        assert!(map.view().center.is_none());
    }

    #[test]
    fn pan_does_not_load_map() {
        let mut map = MapController::<Clicks>::new();
        map.pan_to(Coords(1.0, 1.0), MAP_ZOOM_LEVEL);
        assert!(!map.is_loaded());

        map.center_on(Coords(2.0, 2.0), MAP_ZOOM_LEVEL);
        assert!(map.is_loaded());
    }

    #[test]
    fn last_click_wins() {
        let mut map = MapController::<Clicks>::new();
        map.center_on(Coords(1.0, 1.0), MAP_ZOOM_LEVEL);

        map.click(Coords(2.0, 2.0));
        map.click(Coords(3.0, 3.0));

        assert_eq!(map.pending(), Some(Coords(3.0, 3.0)));
        assert_eq!(map.take_pending(), Some(Coords(3.0, 3.0)));
        assert_eq!(map.pending(), None);
    }

    #[test]
    fn click_returns_registered_handler() {
        let mut map = MapController::<Clicks>::new();
        let mut state = Clicks::default();
        assert!(map.click(Coords(0.5, 0.5)).is_none());

        map.on_location_click(record);
        let handler = map.click(Coords(4.0, 5.0)).unwrap();
        handler(&mut state, Coords(4.0, 5.0));

        assert_eq!(state.seen, vec![Coords(4.0, 5.0)]);
    }

    #[test]
    fn markers_accumulate_and_pan_animates() {
        let mut map = MapController::<Clicks>::new();
        map.center_on(Coords(10.0, 10.0), MAP_ZOOM_LEVEL);
        map.place_marker(Coords(10.1, 10.1), "a", "running-popup");
        map.place_marker(Coords(10.2, 10.2), "b", "cycling-popup");
        assert!(!map.view().animate);

        map.pan_to(Coords(10.2, 10.2), MAP_ZOOM_LEVEL);
        let view = map.view();

        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[1].style_class, "cycling-popup");
        assert_eq!(view.center, Some(Coords(10.2, 10.2)));
        assert!(view.animate);
    }
}
