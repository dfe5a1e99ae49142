use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstrumentationSettings {
    /// Activity ping cadence in seconds.
    pub ping_interval_secs: u64,
    /// Master switch for the activity-summary collector.
    pub activity_tracking_enabled: bool,
}

impl Default for InstrumentationSettings {
    fn default() -> Self {
        Self {
            ping_interval_secs: 5,
            activity_tracking_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct UserSettings {
    #[serde(default)]
    instrumentation: InstrumentationSettings,
}

/// JSON-file-backed settings. A missing or unreadable file yields the
/// defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn instrumentation(&self) -> InstrumentationSettings {
        self.data.read().unwrap().instrumentation.clone()
    }

    pub fn update_instrumentation(&self, settings: InstrumentationSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.instrumentation = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let data: UserSettings = serde_json::from_str(&contents)?;
        let mut guard = self.data.write().unwrap();
        *guard = data;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

/// Debug override for local inspection of the instrumentation.
pub fn debug_mode() -> bool {
    std::env::var("SHOPBEACON_DEBUG")
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
