//! Persisted best score
//!
//! Stored as a plain integer string so existing browser saves keep working.

use crate::platform::storage::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "aiArcadeHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Load from the store; anything missing or unreadable counts as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                return Self::default();
            }
        };

        match raw.trim().parse::<u64>() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(_) => {
                log::warn!("Ignoring malformed high score {:?}", raw);
                Self::default()
            }
        }
    }

    /// Record a final score; returns true when it beats the previous best
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Persist the current best; failures are logged, never fatal
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::{MemoryStore, StorageError};

    #[test]
    fn test_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best(), 0);
    }

    #[test]
    fn test_malformed_is_zero() {
        for raw in ["", "abc", "-5", "12.5", "null"] {
            let mut store = MemoryStore::new();
            store.set(HighScore::STORAGE_KEY, raw).unwrap();
            assert_eq!(HighScore::load(&store).best(), 0, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_submit_and_persist() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, " 300 ").unwrap();
        let mut high = HighScore::load(&store);
        assert_eq!(high.best(), 300);

        assert!(!high.submit(300));
        assert!(!high.submit(120));
        assert!(high.submit(301));
        high.save(&mut store);

        assert_eq!(HighScore::load(&store).best(), 301);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("offline".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_store_errors_are_not_fatal() {
        let mut store = BrokenStore;
        let mut high = HighScore::load(&store);
        assert_eq!(high.best(), 0);
        assert!(high.submit(50));
        high.save(&mut store);
        assert_eq!(high.best(), 50);
    }
}
