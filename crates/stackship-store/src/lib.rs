//! Persistent option store
//!
//! A flat JSON object on disk mapping option names to arbitrary values.
//! Carrier records live under a single option holding the whole list.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use stackship_types::{Result, StoreError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the option store inside the store directory
pub const OPTIONS_FILE: &str = "options.json";

/// Persistent key-value store for options
pub struct OptionStore {
    store_path: PathBuf,
    options: Map<String, Value>,
}

impl OptionStore {
    /// Create or load an option store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(OPTIONS_FILE);

        let options = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            match serde_json::from_reader::<_, Value>(reader)? {
                Value::Object(map) => map,
                other => {
                    return Err(StoreError::Corrupted {
                        path: store_path.display().to_string(),
                        message: format!("expected a JSON object, found {}", value_kind(&other)),
                    }
                    .into())
                }
            }
        } else {
            Map::new()
        };

        debug!(path = %store_path.display(), count = options.len(), "opened option store");
        Ok(Self {
            store_path,
            options,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Save store to disk
    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.options)?;
        Ok(())
    }

    /// Raw stored value
    pub fn get_raw(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Read and deserialize an option. `Ok(None)` when it was never set.
    pub fn get_option<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let Some(value) = self.options.get(name) else {
            return Ok(None);
        };
        match serde_json::from_value::<T>(value.clone()) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                warn!(option = name, error = %e, "stored option has unexpected shape");
                Err(StoreError::InvalidValue {
                    name: name.to_string(),
                    message: e.to_string(),
                }
                .into())
            }
        }
    }

    /// Write an option. Returns false when the stored value was already equal.
    pub fn update_option<T: Serialize>(&mut self, name: &str, value: &T) -> Result<bool> {
        let value = serde_json::to_value(value)?;
        if self.options.get(name) == Some(&value) {
            debug!(option = name, "option unchanged, skipping write");
            return Ok(false);
        }
        self.options.insert(name.to_string(), value);
        self.save()?;
        Ok(true)
    }

    /// Remove an option. Returns whether it existed.
    pub fn delete_option(&mut self, name: &str) -> Result<bool> {
        let removed = self.options.remove(name).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// All option names, sorted
    pub fn option_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.options.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_update_and_reload() {
        let dir = tempdir().unwrap();
        {
            let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
            assert!(store.update_option("greeting", &"hello").unwrap());
            assert!(store.update_option("numbers", &vec![1, 2, 3]).unwrap());
        }
        let store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        let greeting: Option<String> = store.get_option("greeting").unwrap();
        assert_eq!(greeting.as_deref(), Some("hello"));
        let numbers: Option<Vec<u32>> = store.get_option("numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
        assert_eq!(store.option_names(), vec!["greeting", "numbers"]);
    }

    #[test]
    fn test_unchanged_update_returns_false() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        assert!(store.update_option("k", &json!({"a": 1})).unwrap());
        assert!(!store.update_option("k", &json!({"a": 1})).unwrap());
        assert!(store.update_option("k", &json!({"a": 2})).unwrap());
    }

    #[test]
    fn test_floats_reload_exactly() {
        let dir = tempdir().unwrap();
        let values = vec![23105.646142857142_f64, 1.0 / 3.0, 0.1 + 0.2];
        {
            let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
            store.update_option("floats", &values).unwrap();
        }
        let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        let loaded: Vec<f64> = store.get_option("floats").unwrap().unwrap();
        for (a, b) in values.iter().zip(&loaded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert!(!store.update_option("floats", &values).unwrap());
    }

    #[test]
    fn test_missing_option_is_none() {
        let dir = tempdir().unwrap();
        let store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        let value: Option<String> = store.get_option("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_wrong_shape_is_error() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        store.update_option("k", &"text").unwrap();
        let result: Result<Option<Vec<u32>>> = store.get_option("k");
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_option() {
        let dir = tempdir().unwrap();
        let mut store = OptionStore::open(dir.path().to_path_buf()).unwrap();
        store.update_option("k", &1).unwrap();
        assert!(store.delete_option("k").unwrap());
        assert!(!store.delete_option("k").unwrap());
        assert!(store.get_raw("k").is_none());
    }

    #[test]
    fn test_non_object_file_is_corrupted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(OPTIONS_FILE), "[1, 2]").unwrap();
        assert!(OptionStore::open(dir.path().to_path_buf()).is_err());
    }
}
