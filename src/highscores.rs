//! Persistent best-score storage
//!
//! The simulation never talks to storage directly: it emits a
//! `GameEvent::HighScore` on each upward crossing, and the driver writes
//! through a `ScoreStore`. On the web that is LocalStorage under a fixed
//! key; tests and the native demo use the in-memory store.

use serde::{Deserialize, Serialize};

/// Storage key for the persisted maximum
pub const STORAGE_KEY: &str = "maximum-score";

/// JSON envelope for the stored value
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SavedScore {
    best: u32,
}

/// Encode a best score for storage
pub fn encode(best: u32) -> String {
    // Serializing a plain integer struct cannot fail
    serde_json::to_string(&SavedScore { best }).unwrap_or_default()
}

/// Decode a stored best score; malformed data reads as absent
pub fn decode(json: &str) -> Option<u32> {
    serde_json::from_str::<SavedScore>(json).ok().map(|s| s.best)
}

/// A single-integer score store: read once at session start, written on
/// every high-score crossing.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, best: u32);
}

/// In-memory store for tests and the native demo
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, best: u32) {
        self.best = best;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageScoreStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageScoreStore {
    fn load(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, best score defaults to 0");
            return 0;
        };
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => {
                let best = decode(&json).unwrap_or(0);
                log::info!("loaded best score {}", best);
                best
            }
            _ => 0,
        }
    }

    fn save(&mut self, best: u32) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(STORAGE_KEY, &encode(best));
            log::info!("saved best score {}", best);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_round_trip() {
        assert_eq!(decode(&encode(42)), Some(42));
        assert_eq!(decode(&encode(0)), Some(0));
    }

    #[test]
    fn test_malformed_data_reads_as_absent() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("{\"wrong\":1}"), None);
        assert_eq!(decode("not json"), None);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.load(), 0);
        store.save(9);
        assert_eq!(store.load(), 9);
    }
}
