//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// `KeyboardEvent.key` names bound to each logical action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub restart: Vec<String>,
    /// Handled by the host, never reaches the simulation
    pub toggle_fps: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(names: &[&str]) -> Vec<String> {
            names.iter().map(|k| k.to_string()).collect()
        }
        Self {
            jump: keys(&["w", " "]),
            left: keys(&["a"]),
            right: keys(&["d"]),
            restart: keys(&["r"]),
            toggle_fps: keys(&["f"]),
        }
    }
}

impl KeyBindings {
    /// True if the key drives any action (host suppresses page scrolling for these)
    pub fn is_bound(&self, key: &str) -> bool {
        [
            &self.jump,
            &self.left,
            &self.right,
            &self.restart,
            &self.toggle_fps,
        ]
        .iter()
        .any(|keys| keys.iter().any(|k| k == key))
    }

    pub fn toggles_fps(&self, key: &str) -> bool {
        self.toggle_fps.iter().any(|k| k == key)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "parallax_runner_settings";

    /// Flip the FPS readout and persist the choice
    pub fn toggle_fps(&mut self) {
        self.show_fps = !self.show_fps;
        self.save();
    }

    pub fn load() -> Self {
        if let Some(json) = crate::platform::storage::get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Stored settings unreadable ({}), using defaults", e),
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                crate::platform::storage::set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
