//! Player preferences
//!
//! The chosen difficulty and an optional fixed seed, persisted in
//! LocalStorage so a reload resumes the same kind of run.

use serde::{Deserialize, Serialize};

use crate::tuning::Difficulty;

/// Player settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Selected difficulty
    pub difficulty: Difficulty,
    /// Fixed run seed (None = fresh seed every run)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Settings {
    /// Settings from a difficulty name as typed by the player; unknown names fall back to Normal
    pub fn from_choice(difficulty: &str, seed: Option<u64>) -> Self {
        let difficulty = Difficulty::from_str(difficulty).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using Normal", difficulty);
            Difficulty::default()
        });
        Self { difficulty, seed }
    }

    /// Seed for the next run
    pub fn run_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "flappy_director_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Saved settings, or defaults when nothing valid is stored
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let Some(json) = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
        else {
            return Self::default();
        };

        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => {
                log::info!("Resuming {} from saved settings", settings.difficulty.as_str());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring saved settings: {}", e);
                Self::default()
            }
        }
    }

    /// Persist the player's choice for the next session
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("LocalStorage rejected settings");
                }
            }
            Err(e) => log::warn!("Could not encode settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice() {
        assert_eq!(Settings::from_choice("hard", None).difficulty, Difficulty::Hard);
        assert_eq!(Settings::from_choice("dark", Some(3)).seed, Some(3));
        assert_eq!(Settings::from_choice("???", None), Settings::default());
    }

    #[test]
    fn test_fixed_seed_is_reused() {
        let settings = Settings::from_choice("souls", Some(42));
        assert_eq!(settings.run_seed(), 42);
        assert_eq!(settings.run_seed(), 42);
    }

    #[test]
    fn test_saved_json_without_seed() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty":"Souls"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Souls);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_saved_json_with_stale_fields() {
        let json = r#"{"difficulty":"Easy","seed":7,"show_debug_overlay":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings, Settings::from_choice("easy", Some(7)));
    }
}
