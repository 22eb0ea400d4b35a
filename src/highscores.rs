//! High score persistence
//!
//! A single best score, stored in LocalStorage on wasm and in a JSON file
//! next to the binary on native.

use serde::{Deserialize, Serialize};

/// Persisted best score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScore {
    pub score: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "space-invaded-highscore";

    /// File name for native persistence
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_NAME: &'static str = "space-invaded-highscore.json";

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a score; returns true if it is a new best
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.score {
            self.score = score;
            return true;
        }
        false
    }

    /// Load the saved best score (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(hs) = serde_json::from_str::<HighScore>(&json) {
                    log::info!("Loaded high score: {}", hs.score);
                    return hs;
                }
                // Plain integer from older saves
                if let Ok(score) = json.trim().parse::<u32>() {
                    return Self { score };
                }
            }
        }

        log::info!("No saved high score, starting fresh");
        Self::new()
    }

    /// Save the best score (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High score saved: {}", self.score);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(hs) => {
                    log::info!("Loaded high score: {}", hs.score);
                    hs
                }
                Err(e) => {
                    log::warn!("High score file unreadable ({e}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No saved high score, starting fresh");
                Self::new()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(Self::FILE_NAME, json) {
                    log::warn!("Failed to save high score: {e}");
                } else {
                    log::info!("High score saved: {}", self.score);
                }
            }
            Err(e) => log::warn!("Failed to serialize high score: {e}"),
        }
    }
}
