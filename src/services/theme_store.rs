use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ThemeError;
use crate::models::ThemeConfig;

/// Durable home of the single theme record
pub trait ThemeStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<ThemeConfig>, ThemeError>;
    fn save(&self, config: &ThemeConfig) -> Result<(), ThemeError>;
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTheme {
    #[serde(flatten)]
    config: ThemeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

fn decode(raw: &str) -> Result<ThemeConfig, ThemeError> {
    serde_json::from_str::<StoredTheme>(raw)
        .map(|stored| stored.config)
        .map_err(|e| ThemeError::Corrupt(e.to_string()))
}

fn encode(config: &ThemeConfig) -> Result<String, ThemeError> {
    let stored = StoredTheme {
        config: *config,
        updated_at: Some(Utc::now()),
    };
    serde_json::to_string_pretty(&stored)
        .map_err(|e| ThemeError::Storage(format!("Failed to serialize theme: {}", e)))
}

/// Keeps the record as a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileThemeStore {
    path: PathBuf,
}

impl JsonFileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for JsonFileThemeStore {
    fn load(&self) -> Result<Option<ThemeConfig>, ThemeError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ThemeError::Corrupt(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, config: &ThemeConfig) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so readers never see a half-written record
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, encode(config)?)?;
        fs::rename(&tmp_path, &self.path)?;
        log::debug!("Saved theme to {:?}", self.path);
        Ok(())
    }
}

/// In-process store, used by tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    raw: Mutex<Option<String>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an arbitrary serialized record, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeConfig>, ThemeError> {
        match self.raw() {
            Some(raw) => decode(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, config: &ThemeConfig) -> Result<(), ThemeError> {
        let encoded = encode(config)?;
        *self.raw.lock().unwrap_or_else(|e| e.into_inner()) = Some(encoded);
        Ok(())
    }
}
