//! TOML-file settings store.
//!
//! Values are kept in memory and written back to disk on every change. The
//! file is a flat table; non-string values written by hand (e.g.
//! `exa_num_results = 8`) are read back as their TOML text.

use relay_application::ports::settings_store::{SettingsError, SettingsStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// [`SettingsStore`] persisted to a TOML file.
#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl TomlSettingsStore {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = if path.exists() {
            let raw =
                std::fs::read_to_string(&path).map_err(|e| SettingsError::Io(e.to_string()))?;
            parse_table(&raw)?
        } else {
            BTreeMap::new()
        };
        debug!("Opened settings store {} ({} values)", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }
        let raw = toml::to_string(values).map_err(|e| SettingsError::Malformed(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| SettingsError::Io(e.to_string()))
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SettingsError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = values.clone();
        apply(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

fn parse_table(raw: &str) -> Result<BTreeMap<String, String>, SettingsError> {
    let table: toml::Table =
        toml::from_str(raw).map_err(|e| SettingsError::Malformed(e.to_string()))?;
    Ok(table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlSettingsStore::open(dir.path().join("settings.toml")).unwrap();
        assert!(store.get("exa_api_key").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let store = TomlSettingsStore::open(&path).unwrap();
        store.set("exa_api_key", "secret").unwrap();
        store.set("exa_num_results", "8").unwrap();
        store.remove("exa_num_results").unwrap();

        let reopened = TomlSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.get("exa_api_key").as_deref(), Some("secret"));
        assert!(reopened.get("exa_num_results").is_none());
    }

    #[test]
    fn test_hand_written_values_are_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "exa_num_results = 8\ndebug = true\n").unwrap();

        let store = TomlSettingsStore::open(&path).unwrap();
        assert_eq!(store.get_count("exa_num_results", 5), 8);
        assert!(store.get_flag("debug", false));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(matches!(
            TomlSettingsStore::open(&path),
            Err(SettingsError::Malformed(_))
        ));
    }
}
