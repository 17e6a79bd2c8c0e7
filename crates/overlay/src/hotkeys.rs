//! Hotkey bindings and dispatch
//!
//! Chords are written the way the preferences file stores them: either the
//! bracketed form (`<Up>`, `<Control-o>`) or `+`-joined combinations
//! (`ctrl+o`, `ctrl+shift+F5`). Both parse to the same [`KeyChord`].

use std::fmt;
use std::str::FromStr;

use gunathon_core::Keybinds;
use tracing::debug;

/// Modifier keys for hotkey combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyModifier {
    /// Alt / Option
    Alt = 1,
    /// Control
    Control = 2,
    /// Shift
    Shift = 4,
    /// Super / Windows / Command
    Super = 8,
}

impl HotkeyModifier {
    /// Display order.
    const ALL: [HotkeyModifier; 4] = [
        HotkeyModifier::Control,
        HotkeyModifier::Alt,
        HotkeyModifier::Shift,
        HotkeyModifier::Super,
    ];

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ctrl" | "control" => Some(HotkeyModifier::Control),
            "alt" | "option" => Some(HotkeyModifier::Alt),
            "shift" => Some(HotkeyModifier::Shift),
            "super" | "win" | "windows" | "cmd" => Some(HotkeyModifier::Super),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            HotkeyModifier::Alt => "alt",
            HotkeyModifier::Control => "ctrl",
            HotkeyModifier::Shift => "shift",
            HotkeyModifier::Super => "super",
        }
    }

    fn bit(self) -> u8 {
        self as u8
    }
}

/// Hotkey parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    /// Chord text was blank
    #[error("empty key chord")]
    Empty,

    /// A part before the key is not a modifier
    #[error("unknown modifier {modifier:?} in {chord:?}")]
    UnknownModifier {
        /// Chord as written
        chord: String,
        /// Unrecognised part
        modifier: String,
    },

    /// Chord ends without a key
    #[error("key chord {0:?} has no key")]
    MissingKey(String),

    /// Action name not recognised
    #[error("unknown hotkey action: {0}")]
    UnknownAction(String),
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    modifiers: u8,
    key: String,
}

impl KeyChord {
    /// Parse a chord from its preferences-file spelling.
    pub fn parse(s: &str) -> Result<Self, HotkeyError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(HotkeyError::Empty);
        }

        // `<Control-o>` uses '-' between parts, `ctrl+o` uses '+'.
        let (body, separator) = match trimmed.strip_prefix('<').and_then(|t| t.strip_suffix('>')) {
            Some(inner) => (inner, '-'),
            None => (trimmed, '+'),
        };

        let mut parts: Vec<&str> = body.split(separator).map(str::trim).collect();
        let key = parts.pop().unwrap_or_default();
        if key.is_empty() {
            return Err(HotkeyError::MissingKey(s.to_string()));
        }

        let mut modifiers = 0;
        for part in parts {
            let modifier = HotkeyModifier::parse(part).ok_or_else(|| HotkeyError::UnknownModifier {
                chord: s.to_string(),
                modifier: part.to_string(),
            })?;
            modifiers |= modifier.bit();
        }

        Ok(Self {
            modifiers,
            key: key.to_lowercase(),
        })
    }

    /// Whether `modifier` is part of this chord.
    pub fn has(&self, modifier: HotkeyModifier) -> bool {
        self.modifiers & modifier.bit() != 0
    }

    /// The non-modifier key, lowercased.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for KeyChord {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in HotkeyModifier::ALL {
            if self.has(modifier) {
                write!(f, "{}+", modifier.as_str())?;
            }
        }
        f.write_str(&self.key)
    }
}

/// What a hotkey does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotkeyAction {
    /// Add one kill
    Increase,
    /// Remove one kill
    Decrease,
    /// Show or hide the overlay
    ToggleOverlay,
}

impl HotkeyAction {
    /// Every action, in preferences order.
    pub const ALL: [HotkeyAction; 3] = [
        HotkeyAction::Increase,
        HotkeyAction::Decrease,
        HotkeyAction::ToggleOverlay,
    ];

    /// Preference key that stores this action's chord.
    pub fn pref_key(&self) -> &'static str {
        match self {
            HotkeyAction::Increase => "increase_1",
            HotkeyAction::Decrease => "decrease_1",
            HotkeyAction::ToggleOverlay => "toggle_overlay",
        }
    }

    /// Counter change this action applies, if any.
    pub fn delta(&self) -> Option<i64> {
        match self {
            HotkeyAction::Increase => Some(1),
            HotkeyAction::Decrease => Some(-1),
            HotkeyAction::ToggleOverlay => None,
        }
    }

    fn chord_in<'a>(&self, keybinds: &'a Keybinds) -> &'a str {
        match self {
            HotkeyAction::Increase => &keybinds.increase_1,
            HotkeyAction::Decrease => &keybinds.decrease_1,
            HotkeyAction::ToggleOverlay => &keybinds.toggle_overlay,
        }
    }
}

impl FromStr for HotkeyAction {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "increase" | "increase_1" | "inc" => Ok(HotkeyAction::Increase),
            "decrease" | "decrease_1" | "dec" => Ok(HotkeyAction::Decrease),
            "toggle_overlay" | "toggle" => Ok(HotkeyAction::ToggleOverlay),
            _ => Err(HotkeyError::UnknownAction(s.to_string())),
        }
    }
}

/// Chord-to-action table.
#[derive(Debug, Clone, Default)]
pub struct HotkeyMap {
    bindings: Vec<(KeyChord, HotkeyAction)>,
}

impl HotkeyMap {
    /// Build the table from saved keybinds.
    pub fn from_keybinds(keybinds: &Keybinds) -> Result<Self, HotkeyError> {
        let mut map = Self::default();
        for action in HotkeyAction::ALL {
            map.bind(KeyChord::parse(action.chord_in(keybinds))?, action);
        }
        Ok(map)
    }

    /// Bind `chord` to `action`, replacing the action's previous chord and
    /// whatever the chord was bound to before.
    pub fn bind(&mut self, chord: KeyChord, action: HotkeyAction) {
        self.bindings.retain(|(c, a)| *a != action && *c != chord);
        debug!(%chord, ?action, "hotkey bound");
        self.bindings.push((chord, action));
    }

    /// Action bound to `chord`.
    pub fn dispatch(&self, chord: &KeyChord) -> Option<HotkeyAction> {
        self.bindings
            .iter()
            .find(|(c, _)| c == chord)
            .map(|(_, action)| *action)
    }

    /// Chord bound to `action`.
    pub fn chord_for(&self, action: HotkeyAction) -> Option<&KeyChord> {
        self.bindings
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(chord, _)| chord)
    }

    /// All bindings, in binding order.
    pub fn bindings(&self) -> &[(KeyChord, HotkeyAction)] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_and_plain_forms_match() {
        assert_eq!(KeyChord::parse("<Up>").unwrap(), KeyChord::parse("up").unwrap());
        assert_eq!(
            KeyChord::parse("<Control-o>").unwrap(),
            KeyChord::parse("ctrl+O").unwrap()
        );
    }

    #[test]
    fn test_parse_modifiers() {
        let chord = KeyChord::parse("Shift+Ctrl+F5").unwrap();
        assert!(chord.has(HotkeyModifier::Control));
        assert!(chord.has(HotkeyModifier::Shift));
        assert!(!chord.has(HotkeyModifier::Alt));
        assert_eq!(chord.key(), "f5");
        assert_eq!(chord.to_string(), "ctrl+shift+f5");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(KeyChord::parse("  "), Err(HotkeyError::Empty));
        assert_eq!(
            KeyChord::parse("ctrl+"),
            Err(HotkeyError::MissingKey("ctrl+".to_string()))
        );
        assert!(matches!(
            KeyChord::parse("hyper+x"),
            Err(HotkeyError::UnknownModifier { modifier, .. }) if modifier == "hyper"
        ));
    }

    #[test]
    fn test_default_keybinds_dispatch() {
        let map = HotkeyMap::from_keybinds(&Keybinds::default()).unwrap();
        assert_eq!(map.dispatch(&"up".parse().unwrap()), Some(HotkeyAction::Increase));
        assert_eq!(map.dispatch(&"<Down>".parse().unwrap()), Some(HotkeyAction::Decrease));
        assert_eq!(
            map.dispatch(&"ctrl+o".parse().unwrap()),
            Some(HotkeyAction::ToggleOverlay)
        );
        assert_eq!(map.dispatch(&"o".parse().unwrap()), None);
    }

    #[test]
    fn test_rebind_replaces_previous_chord() {
        let mut map = HotkeyMap::from_keybinds(&Keybinds::default()).unwrap();
        map.bind("f9".parse().unwrap(), HotkeyAction::Increase);

        assert_eq!(map.dispatch(&"up".parse().unwrap()), None);
        assert_eq!(map.dispatch(&"F9".parse().unwrap()), Some(HotkeyAction::Increase));
        assert_eq!(map.bindings().len(), 3);

        // Stealing a chord unbinds its old action.
        map.bind("f9".parse().unwrap(), HotkeyAction::Decrease);
        assert_eq!(map.dispatch(&"f9".parse().unwrap()), Some(HotkeyAction::Decrease));
        assert!(map.chord_for(HotkeyAction::Increase).is_none());
    }

    #[test]
    fn test_action_names() {
        assert_eq!("increase_1".parse::<HotkeyAction>().unwrap(), HotkeyAction::Increase);
        assert_eq!("toggle-overlay".parse::<HotkeyAction>().unwrap(), HotkeyAction::ToggleOverlay);
        assert!("jump".parse::<HotkeyAction>().is_err());
        assert_eq!(HotkeyAction::Decrease.delta(), Some(-1));
        assert_eq!(HotkeyAction::ToggleOverlay.pref_key(), "toggle_overlay");
    }

    #[test]
    fn test_invalid_saved_keybind() {
        let keybinds = Keybinds {
            toggle_overlay: "meta+o".to_string(),
            ..Keybinds::default()
        };
        assert!(HotkeyMap::from_keybinds(&keybinds).is_err());
    }
}
