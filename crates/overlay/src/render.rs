//! Overlay and main display rendering.
//!
//! The overlay is three templated, letter-spaced lines plus the style it
//! should be drawn with. The main display is the plain counter readout.

use std::fmt;

use gunathon_core::Preferences;
use gunathon_progress::ProgressTracker;
use serde::Serialize;

use crate::template::{letter_spacing, render_template, NO_WEAPON};

/// Background used when no highlight color is set.
pub const DEFAULT_BACKGROUND: &str = "black";

/// Overlay size per point of font size.
const WIDTH_PER_POINT: u32 = 20;
const HEIGHT_PER_POINT: u32 = 10;

/// Colors the overlay text is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayStyle {
    /// Text color
    pub foreground: String,
    /// Background/highlight color
    pub background: String,
}

/// Overlay font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: u32,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
    /// Underlined
    pub underline: bool,
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.size)?;
        for (on, name) in [(self.bold, "bold"), (self.italic, "italic"), (self.underline, "underline")] {
            if on {
                write!(f, " {name}")?;
            }
        }
        Ok(())
    }
}

/// Overlay window size, derived from the font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Geometry {
    /// Size for a given font size.
    pub fn for_font_size(size: u32) -> Self {
        Self {
            width: size.saturating_mul(WIDTH_PER_POINT),
            height: size.saturating_mul(HEIGHT_PER_POINT),
        }
    }
}

/// One rendered overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayFrame {
    /// Kills line
    pub kills: String,
    /// Current weapon line
    pub weapon: String,
    /// Free-form line
    pub custom: String,
    /// Colors
    pub style: OverlayStyle,
    /// Font
    pub font: FontSpec,
    /// Window size
    pub geometry: Geometry,
}

impl OverlayFrame {
    /// Render the overlay for the tracker's current state.
    pub fn render(tracker: &ProgressTracker, prefs: &Preferences) -> Self {
        let weapon = tracker.current_milestone().map(|m| m.name.as_str());
        let counter = tracker.counter();

        Self {
            kills: letter_spacing(&render_template(&prefs.text.kills_text, counter, weapon)),
            weapon: letter_spacing(&render_template(&prefs.text.weapon_text, counter, weapon)),
            custom: letter_spacing(&prefs.text.custom_text),
            style: OverlayStyle {
                foreground: prefs.overlay_color.clone(),
                background: prefs.highlight().unwrap_or(DEFAULT_BACKGROUND).to_string(),
            },
            font: FontSpec {
                family: prefs.font_family.clone(),
                size: prefs.font_size,
                bold: prefs.bold,
                italic: prefs.italic,
                underline: prefs.underline,
            },
            geometry: Geometry::for_font_size(prefs.font_size),
        }
    }

    /// Text lines in display order. An empty custom line is skipped.
    pub fn lines(&self) -> Vec<&str> {
        [self.kills.as_str(), self.weapon.as_str(), self.custom.as_str()]
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl fmt::Display for OverlayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        write!(
            f,
            "[{} on {}, {}, {}x{}]",
            self.style.foreground,
            self.style.background,
            self.font,
            self.geometry.width,
            self.geometry.height
        )
    }
}

/// Whether the overlay is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayVisibility(bool);

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self(true)
    }
}

impl OverlayVisibility {
    /// Visibility with the given initial value.
    pub fn new(visible: bool) -> Self {
        Self(visible)
    }

    /// Flip visibility and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.0
    }

    /// Render the overlay if it is shown.
    pub fn render(&self, tracker: &ProgressTracker, prefs: &Preferences) -> Option<OverlayFrame> {
        self.0.then(|| OverlayFrame::render(tracker, prefs))
    }
}

/// Main display readout: the counter and the current weapon.
///
/// Compact mode puts both on one line.
pub fn status_lines(tracker: &ProgressTracker, compact: bool) -> Vec<String> {
    let kills = format!("Kills: {}", tracker.counter());
    let weapon = format!(
        "Active Weapon: {}",
        tracker
            .current_milestone()
            .map_or(NO_WEAPON, |m| m.name.as_str())
    );

    if compact {
        vec![format!("{kills} | {weapon}")]
    } else {
        vec![kills, weapon]
    }
}
