pub mod app;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod map;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{FileBlobStore, resolve_data_dir};
pub use tracker::Tracker;
