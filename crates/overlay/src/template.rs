//! Overlay text templates.

/// Placeholder replaced by the kill counter.
pub const KILLS_PLACEHOLDER: &str = "{kills}";

/// Placeholder replaced by the current milestone name.
pub const WEAPON_PLACEHOLDER: &str = "{weapon}";

/// Shown in place of the milestone name when nothing is active.
pub const NO_WEAPON: &str = "None";

/// Fill `{kills}` and `{weapon}` in `template`. Any other text, braces
/// included, is kept as written.
pub fn render_template(template: &str, kills: i64, weapon: Option<&str>) -> String {
    template
        .replace(KILLS_PLACEHOLDER, &kills.to_string())
        .replace(WEAPON_PLACEHOLDER, weapon.unwrap_or(NO_WEAPON))
}

/// Spread `text` out with one space between characters.
pub fn letter_spacing(text: &str) -> String {
    let mut spaced = String::with_capacity(text.len() * 2);
    for (i, c) in text.chars().enumerate() {
        if i > 0 {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced
}
