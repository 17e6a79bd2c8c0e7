//! Display and keybind preferences.
//!
//! The tracker never reads these; they drive the overlay and the hotkey map.
//! Keys are flat so the persisted file stays a plain key-value table.

use serde::{Deserialize, Serialize};

/// Error raised when updating a preference by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    /// No preference has this name
    #[error("unknown preference key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed for this key
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Preference key
        key: String,
        /// Rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Overlay text color
    pub overlay_color: String,

    /// Overlay background highlight; empty means none
    pub highlight_color: String,

    /// Overlay font family
    pub font_family: String,

    /// Overlay font size in points
    pub font_size: u32,

    /// Bold overlay text
    pub bold: bool,

    /// Italic overlay text
    pub italic: bool,

    /// Underlined overlay text
    pub underline: bool,

    /// Hotkey bindings
    #[serde(flatten)]
    pub keybinds: Keybinds,

    /// Single-line main display
    pub compact_mode: bool,

    /// Whether the overlay is shown
    pub overlay_visible: bool,

    /// Overlay line templates
    #[serde(flatten)]
    pub text: OverlayText,
}

/// Key chords bound to tracker actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybinds {
    /// Chord for `adjust(+1)`
    pub increase_1: String,
    /// Chord for `adjust(-1)`
    pub decrease_1: String,
    /// Chord that shows or hides the overlay
    pub toggle_overlay: String,
}

/// Overlay line templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayText {
    /// Kills line; `{kills}` is replaced by the counter
    pub kills_text: String,
    /// Weapon line; `{weapon}` is replaced by the current milestone name
    pub weapon_text: String,
    /// Free-form line
    pub custom_text: String,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            increase_1: "<Up>".to_string(),
            decrease_1: "<Down>".to_string(),
            toggle_overlay: "ctrl+o".to_string(),
        }
    }
}

impl Default for OverlayText {
    fn default() -> Self {
        Self {
            kills_text: "Kills: {kills}".to_string(),
            weapon_text: "Active Weapon: {weapon}".to_string(),
            custom_text: String::new(),
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            overlay_color: "purple".to_string(),
            highlight_color: String::new(),
            font_family: "Unfair Style 2 Rough".to_string(),
            font_size: 16,
            bold: false,
            italic: false,
            underline: false,
            keybinds: Keybinds::default(),
            compact_mode: false,
            overlay_visible: true,
            text: OverlayText::default(),
        }
    }
}

impl Preferences {
    /// All preference keys, in file order.
    pub const KEYS: &'static [&'static str] = &[
        "overlay_color",
        "highlight_color",
        "font_family",
        "font_size",
        "bold",
        "italic",
        "underline",
        "increase_1",
        "decrease_1",
        "toggle_overlay",
        "compact_mode",
        "overlay_visible",
        "kills_text",
        "weapon_text",
        "custom_text",
    ];

    /// Highlight color, if one is set.
    pub fn highlight(&self) -> Option<&str> {
        let color = self.highlight_color.trim();
        (!color.is_empty()).then_some(color)
    }

    /// Read a preference by key, formatted as it would be written.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "overlay_color" => self.overlay_color.clone(),
            "highlight_color" => self.highlight_color.clone(),
            "font_family" => self.font_family.clone(),
            "font_size" => self.font_size.to_string(),
            "bold" => self.bold.to_string(),
            "italic" => self.italic.to_string(),
            "underline" => self.underline.to_string(),
            "increase_1" => self.keybinds.increase_1.clone(),
            "decrease_1" => self.keybinds.decrease_1.clone(),
            "toggle_overlay" => self.keybinds.toggle_overlay.clone(),
            "compact_mode" => self.compact_mode.to_string(),
            "overlay_visible" => self.overlay_visible.to_string(),
            "kills_text" => self.text.kills_text.clone(),
            "weapon_text" => self.text.weapon_text.clone(),
            "custom_text" => self.text.custom_text.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Update a preference by key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match key {
            "overlay_color" => self.overlay_color = value.to_string(),
            "highlight_color" => self.highlight_color = value.to_string(),
            "font_family" => self.font_family = value.to_string(),
            "font_size" => self.font_size = parse_font_size(value)?,
            "bold" => self.bold = parse_bool(key, value)?,
            "italic" => self.italic = parse_bool(key, value)?,
            "underline" => self.underline = parse_bool(key, value)?,
            "increase_1" => self.keybinds.increase_1 = value.to_string(),
            "decrease_1" => self.keybinds.decrease_1 = value.to_string(),
            "toggle_overlay" => self.keybinds.toggle_overlay = value.to_string(),
            "compact_mode" => self.compact_mode = parse_bool(key, value)?,
            "overlay_visible" => self.overlay_visible = parse_bool(key, value)?,
            "kills_text" => self.text.kills_text = value.to_string(),
            "weapon_text" => self.text.weapon_text = value.to_string(),
            "custom_text" => self.text.custom_text = value.to_string(),
            _ => return Err(PreferenceError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Every key with its current value.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, PreferenceError> {
    // Accept the spellings an ini file would.
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PreferenceError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_font_size(value: &str) -> Result<u32, PreferenceError> {
    let invalid = |reason: &str| PreferenceError::InvalidValue {
        key: "font_size".to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let size: u32 = value.trim().parse().map_err(|_| invalid("expected a whole number"))?;
    if size == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(size)
}
