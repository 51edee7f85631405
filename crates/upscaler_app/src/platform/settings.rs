use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upscaler_core::OrchestratorSettings;
use upscaler_engine::EngineSettings;

pub(crate) const SETTINGS_FILENAME: &str = "upscaler.ron";

/// Heartbeats faster than this only burn CPU on the reporter thread.
const MIN_POLL_INTERVAL_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub scale: u32,
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
    pub max_output_pixels: u64,
    pub log_to_file: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = EngineSettings::default();
        let orchestrator = OrchestratorSettings::default();
        Self {
            scale: engine.scale,
            poll_interval_ms: engine.poll_interval.as_millis() as u64,
            settle_delay_ms: orchestrator.settle_delay.as_millis() as u64,
            max_output_pixels: engine.max_output_pixels,
            log_to_file: false,
        }
    }
}

impl Settings {
    pub fn engine(&self) -> EngineSettings {
        EngineSettings {
            scale: self.scale,
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS)),
            max_output_pixels: self.max_output_pixels,
        }
    }

    pub fn orchestrator(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Reads `upscaler.ron` from `dir`. A missing file yields the defaults.
pub(crate) fn load_settings(dir: &Path) -> Result<Settings, SettingsError> {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => return Err(SettingsError::Read { path, source }),
    };
    ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path,
        message: err.to_string(),
    })
}
