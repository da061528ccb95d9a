//! Best score persistence
//!
//! The game only needs a single integer. On the web it lives in
//! LocalStorage as a plain decimal string.

/// Get/set access to the stored best score
pub trait BestScoreStore {
    /// Stored best, 0 when missing or unreadable
    fn get(&self) -> u64;
    fn set(&mut self, best: u64);
}

/// In-memory store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    /// Number of writes, for asserting persistence traffic
    pub writes: usize,
}

impl MemoryStore {
    pub fn new(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, best: u64) {
        self.best = best;
        self.writes += 1;
    }
}

/// Parse a stored value, treating garbage as no score
pub fn parse_best(raw: &str) -> u64 {
    raw.trim().parse::<u64>().unwrap_or(0)
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "saveMars_bestScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn get(&self) -> u64 {
        let best = Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .map(|raw| parse_best(&raw))
            .unwrap_or(0);
        log::info!("Loaded best score {}", best);
        best
    }

    fn set(&mut self, best: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, &best.to_string())
                    .is_err()
                {
                    log::warn!("Could not persist best score");
                }
            }
            None => log::warn!("LocalStorage unavailable, best score not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best() {
        assert_eq!(parse_best("42"), 42);
        assert_eq!(parse_best(" 7\n"), 7);
        assert_eq!(parse_best(""), 0);
        assert_eq!(parse_best("NaN"), 0);
        assert_eq!(parse_best("-3"), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get(), 0);
        store.set(15);
        assert_eq!(store.get(), 15);
        assert_eq!(store.writes, 1);
    }
}
