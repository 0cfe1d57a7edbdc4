use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::tracker::ProgressState;
use crate::store::error::{Result, StoreError};
use crate::store::schema::SaveData;

pub const DATA_FILE: &str = "sugoroku_data.json";

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?.join("sugoroku");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            path: base_dir.join(DATA_FILE),
        })
    }

    /// Use an explicit file; its parent directory is created on first save.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<ProgressState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let data: SaveData = serde_json::from_str(&content).map_err(StoreError::CorruptData)?;
        Ok(Some(data.into_state()))
    }

    pub fn save(&self, state: &ProgressState) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = to_json(&SaveData::from_state(state))?;
        let tmp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.path)?;
        log::debug!("saved progress to {}", self.path.display());
        Ok(())
    }
}

/// Pretty JSON with four-space indentation and literal non-ASCII text.
fn to_json<T: Serialize>(data: &T) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    data.serialize(&mut ser).map_err(StoreError::Serialize)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tracker::{Outcome, REWARD_DAYS};
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_loads_none() {
        let (_dir, store) = make_test_store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip() {
        let (_dir, store) = make_test_store();
        let mut state = ProgressState::with_theme("毎日10ページ本を読む！");
        state.set_reward_name(3, "好きなケーキを買う");
        for _ in 0..4 {
            state.record_success();
        }
        state.record_failure();
        state.toggle_reward(3);

        store.save(&state).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_file_layout_matches_format() {
        let (_dir, store) = make_test_store();
        let mut state = ProgressState::default();
        state.record_success();
        store.save(&state).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\n    \"current_day\": 2"));
        assert!(content.contains("\"1\": \"達成\""));

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["current_day", "history", "rewards", "consecutive_success", "theme"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["rewards"].as_object().unwrap().len(), REWARD_DAYS.len());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (_dir, store) = make_test_store();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(StoreError::CorruptData(_))));

        fs::write(store.path(), "").unwrap();
        assert!(matches!(store.load(), Err(StoreError::CorruptData(_))));
    }

    #[test]
    fn test_older_file_gains_new_reward_days() {
        let (_dir, store) = make_test_store();
        fs::write(
            store.path(),
            r#"{"current_day": 3, "history": {"1": "達成", "2": "達成"},
                "rewards": {"3": {"name": "cake", "checked": false}},
                "consecutive_success": 2, "theme": "walk"}"#,
        )
        .unwrap();

        let state = store.load().unwrap().unwrap();
        assert_eq!(state.history[&2], Outcome::Achieved);
        assert_eq!(state.rewards.get(3).unwrap().name, "cake");
        assert_eq!(state.rewards.iter().count(), REWARD_DAYS.len());
        assert_eq!(state.theme, "walk");
    }

    #[test]
    fn test_save_into_missing_directory_creates_it() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::at_path(dir.path().join("nested").join("progress.json"));
        store.save(&ProgressState::default()).unwrap();
        assert!(store.path().exists());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_unwritable_target_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let store = JsonStore::at_path(blocker.join("progress.json"));
        assert!(matches!(
            store.save(&ProgressState::default()),
            Err(StoreError::Io(_))
        ));
    }
}
