//! JSON file storage.

use mathlock_rules::SaveState;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Persistence;
use crate::error::Result;

/// Keeps the save state in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Persistence for JsonFileStore {
    fn load(&self) -> SaveState {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No save at {}, starting fresh", self.path.display());
                return SaveState::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", self.path.display(), e);
                return SaveState::default();
            }
        };

        match SaveState::from_json_str(&contents) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Unreadable save at {}: {}; using defaults", self.path.display(), e);
                SaveState::default()
            }
        }
    }

    fn save(&mut self, state: &SaveState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so a crash never leaves half a file.
        let temp = self.temp_path();
        fs::write(&temp, state.to_json_pretty()?)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathlock_rules::FactKey;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("save.json"));
        assert_eq!(store.load(), SaveState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("save.json"));

        let mut state = SaveState::new();
        state.initialize_if_empty();
        state.promote();
        state.player_progress.add_xp(200);
        state
            .fact_pool
            .get_mut(&FactKey::new(3, 3))
            .unwrap()
            .record_correct(chrono::Utc::now());

        store.save(&state).unwrap();
        assert!(store.path().exists());
        assert_eq!(store.load(), state);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load(), SaveState::default());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("save.json"));

        let mut state = SaveState::new();
        store.save(&state).unwrap();

        state.unlocked_factor_ceiling = 5;
        store.save(&state).unwrap();

        assert_eq!(store.load().unlocked_factor_ceiling, 5);
        assert!(!store.temp_path().exists());
    }
}
