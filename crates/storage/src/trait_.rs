//! Storage trait abstraction.

use async_trait::async_trait;
use gunathon_core::{default_milestones, Preferences, TrackerState};
use tracing::warn;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Preferences file could not be parsed
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Preferences could not be written
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Tracker file is readable but its contents are not
    #[error("malformed tracker file at line {line}: {reason}")]
    Malformed {
        /// 1-based line number
        line: u64,
        /// What was wrong
        reason: String,
    },
}

/// Storage abstraction for tracker state and preferences.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Tracker state ===

    /// Load the tracker state, `None` if nothing has been saved yet.
    async fn load_state(&self) -> Result<Option<TrackerState>>;

    /// Save the tracker state, replacing what was stored.
    async fn save_state(&mut self, state: &TrackerState) -> Result<()>;

    // === Preferences ===

    /// Load preferences; defaults when nothing has been saved yet.
    async fn load_preferences(&self) -> Result<Preferences>;

    /// Save preferences.
    async fn save_preferences(&mut self, prefs: &Preferences) -> Result<()>;

    /// Load the tracker state, regenerating the default sequence when it is
    /// missing or cannot be read.
    async fn load_or_create(&mut self) -> Result<TrackerState> {
        match self.load_state().await {
            Ok(Some(state)) => return Ok(state),
            Ok(None) => warn!("no tracker state found, creating default sequence"),
            Err(e) => warn!(error = %e, "failed to load tracker state, creating default sequence"),
        }

        let state = default_milestones();
        self.save_state(&state).await?;
        Ok(state)
    }
}
