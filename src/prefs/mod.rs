// User preferences: typed accessors over a best-effort key-value store

pub mod store;
pub mod themes;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::launcher::GameKind;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use themes::{Theme, ThemeConfig, THEMES};

pub const SOUND_ENABLED: &str = "soundEnabled";
pub const THEME_CONFIG: &str = "themeConfig";
pub const OS_THEME: &str = "osTheme";
pub const PARTICLES_ENABLED: &str = "particlesEnabled";

/// Absent keys read as their default. Values that fail to parse read as the
/// default too. Write failures are logged and otherwise ignored.
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(event = "desk.prefs.value_invalid", key = key, error = %e);
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(event = "desk.prefs.encode_failed", key = key, error = %e);
                return;
            }
        };
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(event = "desk.prefs.write_failed", key = key, error = %e);
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.read(SOUND_ENABLED).unwrap_or(false)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.write(SOUND_ENABLED, &enabled);
    }

    /// Flip the sound toggle, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.sound_enabled();
        self.set_sound_enabled(enabled);
        enabled
    }

    pub fn theme_config(&self) -> ThemeConfig {
        self.read(THEME_CONFIG).unwrap_or_default()
    }

    pub fn set_theme_config(&mut self, config: &ThemeConfig) {
        self.write(THEME_CONFIG, config);
    }

    pub fn reset_theme_config(&mut self) {
        self.set_theme_config(&ThemeConfig::default());
    }

    /// Name of the OS colour theme. Unknown names still round-trip; use
    /// [`themes::theme`] to resolve the palette.
    pub fn os_theme(&self) -> String {
        self.read(OS_THEME).unwrap_or_else(|| "default".to_string())
    }

    pub fn set_os_theme(&mut self, name: &str) {
        self.write(OS_THEME, &name);
    }

    pub fn palette(&self) -> &'static Theme {
        themes::theme(&self.os_theme())
    }

    pub fn particles_enabled(&self) -> bool {
        self.read(PARTICLES_ENABLED).unwrap_or(true)
    }

    pub fn toggle_particles(&mut self) -> bool {
        let enabled = !self.particles_enabled();
        self.write(PARTICLES_ENABLED, &enabled);
        enabled
    }

    pub fn high_score(&self, game: GameKind) -> u64 {
        self.read(game.score_key()).unwrap_or(0)
    }

    /// Store `score` if it beats the saved best. Returns true on a new record.
    pub fn record_score(&mut self, game: GameKind, score: u64) -> bool {
        if score <= self.high_score(game) {
            return false;
        }
        self.write(game.score_key(), &score);
        tracing::info!(event = "desk.prefs.high_score", game = game.score_key(), score = score);
        true
    }
}
