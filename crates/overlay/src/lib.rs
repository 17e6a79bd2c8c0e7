//! Presentation for the Gunathon tracker: overlay text, main display and
//! hotkey bindings.

#![warn(missing_docs)]

pub mod hotkeys;
pub mod render;
pub mod template;

pub use hotkeys::{HotkeyAction, HotkeyError, HotkeyMap, HotkeyModifier, KeyChord};
pub use render::{status_lines, FontSpec, Geometry, OverlayFrame, OverlayStyle, OverlayVisibility};
pub use template::{letter_spacing, render_template};
