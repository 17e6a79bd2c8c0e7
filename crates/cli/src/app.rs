//! Application state shared by one-shot commands and the interactive session.

use anyhow::{Context, Result};
use gunathon_core::{Keybinds, Preferences, TrackerState};
use gunathon_overlay::{status_lines, HotkeyAction, HotkeyMap, KeyChord, OverlayVisibility};
use gunathon_progress::ProgressTracker;
use gunathon_storage::Storage;
use tracing::{info, warn};

/// Tracker, preferences and hotkeys backed by a storage adapter.
pub struct App<S: Storage> {
    storage: S,
    tracker: ProgressTracker,
    prefs: Preferences,
    hotkeys: HotkeyMap,
}

/// What a session line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionReply {
    /// Lines to print
    Output(Vec<String>),
    /// Leave the session
    Quit,
}

impl<S: Storage> App<S> {
    /// Load state and preferences from `storage`.
    pub async fn open(mut storage: S) -> Result<Self> {
        let state = storage
            .load_or_create()
            .await
            .context("Failed to load tracker state")?;

        let prefs = storage.load_preferences().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load preferences, using defaults");
            Preferences::default()
        });

        let hotkeys = match HotkeyMap::from_keybinds(&prefs.keybinds) {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "invalid saved keybinds, using defaults");
                HotkeyMap::from_keybinds(&Keybinds::default())?
            }
        };

        Ok(Self {
            storage,
            tracker: ProgressTracker::from_state(state),
            prefs,
            hotkeys,
        })
    }

    /// Write tracker state and preferences back to storage.
    pub async fn save(&mut self) -> Result<()> {
        self.storage
            .save_state(&self.tracker.state())
            .await
            .context("Failed to save tracker state")?;
        self.storage
            .save_preferences(&self.prefs)
            .await
            .context("Failed to save preferences")?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn hotkeys(&self) -> &HotkeyMap {
        &self.hotkeys
    }

    /// Overlay visibility, as saved in the preferences.
    pub fn overlay(&self) -> OverlayVisibility {
        OverlayVisibility::new(self.prefs.overlay_visible)
    }

    /// Replace the tracker with imported state.
    pub fn replace_state(&mut self, state: TrackerState) {
        info!(milestones = state.items.len(), counter = state.counter, "tracker state replaced");
        self.tracker = ProgressTracker::from_state(state);
    }

    /// Main display lines, honoring compact mode.
    pub fn status(&self) -> Vec<String> {
        status_lines(&self.tracker, self.prefs.compact_mode)
    }

    /// Flip compact mode, returning the new value.
    pub fn toggle_compact(&mut self) -> bool {
        self.prefs.compact_mode = !self.prefs.compact_mode;
        self.prefs.compact_mode
    }

    /// Update one preference. Keybind keys are checked as chords and
    /// rebound immediately.
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        match HotkeyAction::ALL.into_iter().find(|a| a.pref_key() == key) {
            Some(action) => self.set_keybind(action, value),
            None => {
                self.prefs.set(key, value)?;
                Ok(())
            }
        }
    }

    /// Bind `chord` to `action` and record it in the preferences.
    pub fn set_keybind(&mut self, action: HotkeyAction, chord: &str) -> Result<()> {
        let parsed = KeyChord::parse(chord)?;
        self.prefs.set(action.pref_key(), chord.trim())?;
        self.hotkeys.bind(parsed, action);
        Ok(())
    }

    /// Run the action bound to `chord`, if any.
    pub fn press(&mut self, chord: &KeyChord) -> Option<HotkeyAction> {
        let action = self.hotkeys.dispatch(chord)?;
        match action.delta() {
            Some(delta) => self.tracker.adjust(delta),
            None => {
                let mut overlay = self.overlay();
                let visible = overlay.toggle();
                self.prefs.overlay_visible = visible;
                info!(visible, "overlay toggled");
            }
        }
        Some(action)
    }

    /// Handle one line of interactive input.
    ///
    /// Accepts `+N`/`-N`, `reset`, `status`, `overlay`, `list`, `quit`, or a
    /// key chord. Bad input is reported in the output, never as an error.
    pub fn handle_line(&mut self, line: &str) -> SessionReply {
        let line = line.trim();
        let output = match line.to_lowercase().as_str() {
            "" => Vec::new(),
            "quit" | "exit" | "q" => return SessionReply::Quit,
            "status" => self.status(),
            "reset" => {
                self.tracker.reset();
                self.status()
            }
            "list" => milestone_lines(&self.tracker),
            "overlay" => self.overlay_lines(),
            _ if line.starts_with(['+', '-']) => match line.parse::<i64>() {
                Ok(delta) => {
                    self.tracker.adjust(delta);
                    self.status()
                }
                Err(_) => vec![format!("Invalid adjustment: {line}")],
            },
            _ => match KeyChord::parse(line) {
                Ok(chord) => match self.press(&chord) {
                    Some(HotkeyAction::ToggleOverlay) => self.overlay_lines(),
                    Some(_) => self.status(),
                    None => vec![format!("No action bound to {chord}")],
                },
                Err(e) => vec![format!("Invalid input: {e}")],
            },
        };
        SessionReply::Output(output)
    }

    /// Rendered overlay lines, or a notice when it is hidden.
    pub fn overlay_lines(&self) -> Vec<String> {
        match self.overlay().render(&self.tracker, &self.prefs) {
            Some(frame) => frame.to_string().lines().map(str::to_string).collect(),
            None => vec!["Overlay hidden".to_string()],
        }
    }
}

/// `name (Range: start-end) - Status` for every milestone.
pub fn milestone_lines(tracker: &ProgressTracker) -> Vec<String> {
    tracker
        .milestones()
        .iter()
        .map(|m| format!("{} (Range: {}-{}) - {}", m.name, m.range_start, m.range_end, m.status))
        .collect()
}
