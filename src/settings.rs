use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsResult;

/// Composer preferences that survive restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old settings
pub struct ComposerSettings {
    /// Commit key sends instead of inserting a newline
    pub send_on_enter: bool,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            send_on_enter: false,
        }
    }
}

/// Where `ComposerSettings` are persisted
pub trait SettingsStore {
    fn load(&self) -> SettingsResult<ComposerSettings>;

    fn save(&self, settings: &ComposerSettings) -> SettingsResult<()>;
}

/// Settings kept as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    /// A missing file means nothing was saved yet
    fn load(&self) -> SettingsResult<ComposerSettings> {
        if !self.path.exists() {
            return Ok(ComposerSettings::default());
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, settings: &ComposerSettings) -> SettingsResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-process settings, lost on exit
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<ComposerSettings>,
}

impl MemorySettingsStore {
    pub fn new(settings: ComposerSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> SettingsResult<ComposerSettings> {
        Ok(self.settings.lock().clone())
    }

    fn save(&self, settings: &ComposerSettings) -> SettingsResult<()> {
        *self.settings.lock() = settings.clone();
        Ok(())
    }
}
