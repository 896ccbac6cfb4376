//! Player preferences
//!
//! Stored as JSON next to wherever the player points `--config`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Console preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Clear the terminal before drawing each turn
    pub clear_screen: bool,
    /// Wait for Enter after each shot so the result can be read
    pub pause_after_shot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause_after_shot: true,
        }
    }
}

impl Settings {
    /// Settings for non-interactive runs: no screen clearing, no pauses
    pub fn plain() -> Self {
        Self {
            clear_screen: false,
            pause_after_shot: false,
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
