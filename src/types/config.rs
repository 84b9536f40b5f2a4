use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::PlayerError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "CLIPVIEW_CONFIG";

const MIN_TICK_MS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    fn new(name: &str, extensions: &[&str]) -> Self {
        FileFilter {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_size: (f32, f32),
    pub tick_interval_ms: u64,
    pub initial_volume: u8,
    pub file_filters: Vec<FileFilter>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            window_title: "Video Player".to_string(),
            window_size: (800.0, 600.0),
            tick_interval_ms: 100,
            initial_volume: 100,
            file_filters: vec![
                FileFilter::new("Video files", &["mp4", "avi", "mkv"]),
                FileFilter::new("All files", &["*"]),
            ],
        }
    }
}

impl PlayerConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<PlayerConfig, PlayerError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        let config: PlayerConfig = serde_json::from_str(&json)?;
        Ok(config.sanitized())
    }

    /// Uses the file named by `CLIPVIEW_CONFIG` if set, falling back to defaults.
    pub fn from_env() -> PlayerConfig {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return PlayerConfig::default();
        };
        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("ignoring config {:?}: {}", path, e);
                PlayerConfig::default()
            }
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    fn sanitized(mut self) -> Self {
        self.initial_volume = self.initial_volume.min(100);
        self.tick_interval_ms = self.tick_interval_ms.max(MIN_TICK_MS);
        self
    }
}
