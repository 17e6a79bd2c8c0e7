//! File storage implementation.
//!
//! Keeps the tracker state in `items.csv` and the preferences in
//! `preferences.toml`, both directly under the data directory.

use std::path::{Path, PathBuf};

use gunathon_core::{Preferences, TrackerState};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::tabular::{read_state, write_state};
use super::{Result, Storage};

/// On-disk shape of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    preferences: Preferences,
}

/// File-based storage backend.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Tracker file name.
    pub const TRACKER_FILE: &'static str = "items.csv";

    /// Preferences file name.
    pub const PREFERENCES_FILE: &'static str = "preferences.toml";

    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the tracker file.
    pub fn tracker_path(&self) -> PathBuf {
        self.root.join(Self::TRACKER_FILE)
    }

    /// Path of the preferences file.
    pub fn preferences_path(&self) -> PathBuf {
        self.root.join(Self::PREFERENCES_FILE)
    }

    /// Write `state` to an arbitrary file in the tracker format.
    pub async fn export_state(&self, state: &TrackerState, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_state(path, state).await?;
        debug!(path = %path.display(), milestones = state.items.len(), "exported tracker state");
        Ok(())
    }

    /// Read state from an arbitrary file in the tracker format.
    ///
    /// Unlike [`Storage::load_or_create`] this never falls back to defaults.
    pub async fn import_state(&self, path: impl AsRef<Path>) -> Result<TrackerState> {
        let path = path.as_ref();
        let state = read_state(path).await?;
        debug!(path = %path.display(), milestones = state.items.len(), "imported tracker state");
        Ok(state)
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn load_state(&self) -> Result<Option<TrackerState>> {
        match read_state(&self.tracker_path()).await {
            Ok(state) => Ok(Some(state)),
            Err(super::StorageError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save_state(&mut self, state: &TrackerState) -> Result<()> {
        write_state(&self.tracker_path(), state).await?;
        debug!(counter = state.counter, "saved tracker state");
        Ok(())
    }

    async fn load_preferences(&self) -> Result<Preferences> {
        match fs::read_to_string(self.preferences_path()).await {
            Ok(text) => {
                let file: PreferencesFile = toml::from_str(&text)?;
                Ok(file.preferences)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_preferences(&mut self, prefs: &Preferences) -> Result<()> {
        let file = PreferencesFile {
            preferences: prefs.clone(),
        };
        let text = toml::to_string(&file)?;
        fs::write(self.preferences_path(), text.as_bytes()).await?;
        debug!("saved preferences");
        Ok(())
    }
}
