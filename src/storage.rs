use std::{
    collections::HashMap,
    env, fs, io,
    path::PathBuf,
    sync::Mutex,
};
use tracing::error;

/// Key under which the workout list is persisted.
pub const WORKOUTS_KEY: &str = "workouts";

/// Synchronous key-value blob storage, the local-storage analogue.
///
/// Every method may fail; callers treat a failed load as absent data and a
/// failed save as best-effort.
pub trait BlobStore: Send + Sync {
    fn save(&self, key: &str, blob: &str) -> io::Result<()>;
    fn load(&self, key: &str) -> io::Result<Option<String>>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn save(&self, key: &str, blob: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), blob)
    }

    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, blob: &str) -> Self {
        let store = Self::default();
        store.insert(key, blob);
        store
    }

    fn insert(&self, key: &str, blob: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), blob.to_string());
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn save(&self, key: &str, blob: &str) -> io::Result<()> {
        self.insert(key, blob);
        Ok(())
    }

    fn load(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| io::Error::other("blob store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
        Ok(())
    }
}

/// Loads `key`, folding every failure into `None`.
pub fn load_blob(store: &dyn BlobStore, key: &str) -> Option<String> {
    match store.load(key) {
        Ok(blob) => blob,
        Err(err) => {
            error!("failed to read {key}: {err}");
            None
        }
    }
}

/// Saves `blob` under `key`; failures are logged and dropped.
pub fn persist_blob(store: &dyn BlobStore, key: &str, blob: &str) {
    if let Err(err) = store.save(key, blob) {
        error!("failed to persist {key}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("workout_map_storage_{}_{}", std::process::id(), nanos));
        path
    }

    #[test]
    fn file_store_missing_key_is_absent() {
        let store = FileBlobStore::new(unique_dir());
        assert_eq!(store.load(WORKOUTS_KEY).unwrap(), None);
        assert_eq!(load_blob(&store, WORKOUTS_KEY), None);
    }

    #[test]
    fn file_store_saves_loads_and_removes() {
        let dir = unique_dir();
        let store = FileBlobStore::new(&dir);

        store.save(WORKOUTS_KEY, "[]").unwrap();
        assert!(dir.join("workouts.json").exists());
        assert_eq!(store.load(WORKOUTS_KEY).unwrap().as_deref(), Some("[]"));

        store.remove(WORKOUTS_KEY).unwrap();
        assert_eq!(store.load(WORKOUTS_KEY).unwrap(), None);
        store.remove(WORKOUTS_KEY).unwrap();

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn unreadable_entry_loads_as_absent() {
        let dir = unique_dir();
        // A directory where the file should be makes the read fail.
        fs::create_dir_all(dir.join("workouts.json")).unwrap();
        let store = FileBlobStore::new(&dir);

        assert_eq!(load_blob(&store, WORKOUTS_KEY), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryBlobStore::with_entry(WORKOUTS_KEY, "[1]");
        assert_eq!(load_blob(&store, WORKOUTS_KEY).as_deref(), Some("[1]"));
        persist_blob(&store, WORKOUTS_KEY, "[2]");
        assert_eq!(load_blob(&store, WORKOUTS_KEY).as_deref(), Some("[2]"));
        store.remove(WORKOUTS_KEY).unwrap();
        assert_eq!(load_blob(&store, WORKOUTS_KEY), None);
    }
}
