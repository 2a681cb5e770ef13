// Panel settings: default declared sizes, the blur debounce and keybinding
// overrides, stored in the platform config dir
// (e.g. ~/.config/dockhand/settings.json on Linux).

use std::path::{Path, PathBuf};

use dockhand_input::KeybindingOverride;
use serde::{Deserialize, Serialize};

use crate::resolve::Declared;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    #[serde(default)]
    pub defaults: Declared,
    #[serde(default = "default_blur_debounce_ms")]
    pub blur_debounce_ms: u64,
    #[serde(default)]
    pub keybindings: Vec<KeybindingOverride>,
}

fn default_blur_debounce_ms() -> u64 {
    1
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            defaults: Declared::default(),
            blur_debounce_ms: default_blur_debounce_ms(),
            keybindings: Vec::new(),
        }
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("dockhand").join("settings.json"))
}

/// Load settings from the default location, falling back to defaults.
pub fn load_settings() -> PanelSettings {
    settings_path()
        .and_then(|path| load_settings_from(&path))
        .unwrap_or_default()
}

pub fn load_settings_from(path: &Path) -> Option<PanelSettings> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
            None
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &PanelSettings) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create settings directory: {}", e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
