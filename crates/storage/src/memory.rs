//! In-memory storage, for tests and dry runs.

use gunathon_core::{Preferences, TrackerState};

use super::{Result, Storage};

/// Storage backend that keeps everything in process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Option<TrackerState>,
    preferences: Option<Preferences>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `state`.
    pub fn with_state(state: TrackerState) -> Self {
        Self {
            state: Some(state),
            preferences: None,
        }
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn load_state(&self) -> Result<Option<TrackerState>> {
        Ok(self.state.clone())
    }

    async fn save_state(&mut self, state: &TrackerState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    async fn load_preferences(&self) -> Result<Preferences> {
        Ok(self.preferences.clone().unwrap_or_default())
    }

    async fn save_preferences(&mut self, prefs: &Preferences) -> Result<()> {
        self.preferences = Some(prefs.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gunathon_core::Milestone;

    #[tokio::test]
    async fn test_load_or_create_keeps_existing_state() {
        let state = TrackerState::new(vec![Milestone::new("Custom", 0, 3)]);
        let mut storage = MemoryStorage::with_state(state.clone());
        assert_eq!(storage.load_or_create().await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_load_or_create_seeds_empty_storage() {
        let mut storage = MemoryStorage::new();
        let state = storage.load_or_create().await.unwrap();
        assert_eq!(state.items.len(), 24);
        assert_eq!(storage.load_state().await.unwrap(), Some(state));
    }
}
