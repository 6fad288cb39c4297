//! Best-score persistence behind a get/set integer contract
//!
//! The sim never touches storage directly; the game shell reads the best
//! score once at startup and writes only on improvement. Store failures are
//! logged and absorbed, never fatal.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "HighScore";

/// Integer key-value contract for the external store
pub trait ScoreStore {
    /// Returns 0 when the key is absent
    fn get_integer(&self, key: &str) -> u32;
    fn set_integer(&mut self, key: &str, value: u32);
}

/// Volatile in-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get_integer(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON file-backed store for native runs.
///
/// Loads tolerantly: a missing or corrupt file just means an empty store.
/// Writes happen on every `set_integer`; a failed write keeps the in-memory
/// value so the session still sees its best score.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, u32>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!("ignoring corrupt score file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize scores: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("failed to write {}: {err}", self.path.display());
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get_integer(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_integer(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }
}
