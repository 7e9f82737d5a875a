//! Game settings and preferences
//!
//! Play-field geometry and audio preferences, persisted as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Edge length of a falling object's square sprite
    pub object_size: f32,

    // === Basket ===
    /// Basket width in its normal size state
    pub basket_width: f32,
    /// Basket height in its normal size state
    pub basket_height: f32,
    /// Gap between the basket's bottom edge and the screen bottom
    pub basket_bottom_margin: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when the game loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Portrait phone
            screen_width: 1080.0,
            screen_height: 1920.0,
            object_size: 100.0,

            basket_width: 240.0,
            basket_height: 140.0,
            basket_bottom_margin: 60.0,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    ///
    /// Missing fields take their default values. An unreadable or malformed
    /// file is logged and ignored.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Replace non-positive geometry with defaults and clamp volumes
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        self.screen_width = positive(self.screen_width, defaults.screen_width);
        self.screen_height = positive(self.screen_height, defaults.screen_height);
        self.object_size = positive(self.object_size, defaults.object_size);
        self.basket_width = positive(self.basket_width, defaults.basket_width);
        self.basket_height = positive(self.basket_height, defaults.basket_height);
        if !(self.basket_bottom_margin.is_finite() && self.basket_bottom_margin >= 0.0) {
            self.basket_bottom_margin = defaults.basket_bottom_margin;
        }
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }
}
