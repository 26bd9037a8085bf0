use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;
use crate::store::PreferenceStore;

const FILE_NAME: &str = "preferences.json";

/// Preferences kept as a flat JSON object on disk. Every write rewrites the
/// whole file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store under `dir`. A missing file reads as empty.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = dir.as_ref().join(FILE_NAME);
        let values: HashMap<String, String> = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => HashMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = values.len(), "opened preference store");
        Ok(Self { path, values })
    }

    /// Writes `values` to disk and only then adopts them, so the cached map
    /// never holds anything the file does not.
    fn commit(&mut self, values: HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, body)?;
        self.values = values;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.commit(values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.values.contains_key(key) {
            return Ok(());
        }
        let mut values = self.values.clone();
        values.remove(key);
        self.commit(values)
    }
}
