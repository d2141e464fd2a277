//! Color themes.
//!
//! Two presets ship built in: `ink` (dark, the default) and `paper`
//! (light). The accent can be overridden from config with a hex color.

use ratatui::style::Color;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    /// Background of the selected card and category row
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Borders of the focused pane, active page, current category
    pub accent: Color,
    /// Revealed answers
    pub muted: Color,
    /// Category/difficulty line, hints, unfocused borders
    pub faint: Color,
    /// Search box and focused form field while typing
    pub input: Color,
    /// Status bar notice after a question is added or deleted
    pub notice: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::ink()
    }
}

impl Theme {
    pub fn ink() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),
            foreground: Color::Rgb(229, 234, 241),
            selection_bg: Color::Rgb(20, 28, 42),
            selection_fg: Color::Rgb(229, 234, 241),
            accent: Color::Rgb(56, 189, 248),
            muted: Color::Rgb(156, 163, 175),
            faint: Color::Rgb(107, 114, 128),
            input: Color::Rgb(250, 204, 21),
            notice: Color::Rgb(34, 197, 94),
            error: Color::Rgb(239, 68, 68),
        }
    }

    /// Light preset for bright terminals
    pub fn paper() -> Self {
        Self {
            background: Color::Rgb(250, 247, 240),
            foreground: Color::Rgb(40, 42, 54),
            selection_bg: Color::Rgb(232, 226, 212),
            selection_fg: Color::Rgb(20, 22, 30),
            accent: Color::Rgb(37, 99, 235),
            muted: Color::Rgb(82, 86, 102),
            faint: Color::Rgb(140, 136, 128),
            input: Color::Rgb(180, 83, 9),
            notice: Color::Rgb(21, 128, 61),
            error: Color::Rgb(185, 28, 28),
        }
    }

    /// Look up a preset by name, case-insensitive
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ink" | "dark" | "default" => Some(Self::ink()),
            "paper" | "light" => Some(Self::paper()),
            _ => None,
        }
    }
}

/// Parse `#rrggbb` or `#rgb` (the `#` is optional)
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 3 && digits.len() != 6 {
        return Err(ColorError::InvalidLength);
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex);
    }
    let value = u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex)?;

    let color = if digits.len() == 3 {
        let nibble = |shift: u32| ((value >> shift) & 0xf) as u8 * 0x11;
        Color::Rgb(nibble(8), nibble(4), nibble(0))
    } else {
        let byte = |shift: u32| ((value >> shift) & 0xff) as u8;
        Color::Rgb(byte(16), byte(8), byte(0))
    };
    Ok(color)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Serde helpers for hex colors in config files
pub mod serde_color {
    use super::*;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| parse_hex_color(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#0d1116"), Ok(Color::Rgb(13, 17, 22)));
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#1a2"), Ok(Color::Rgb(0x11, 0xaa, 0x22)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(parse_hex_color("invalid"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("#gg0000"), Err(ColorError::InvalidHex));
        assert_eq!(parse_hex_color("#ff00"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("#zz"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("+ff"), Err(ColorError::InvalidHex));
    }

    #[test]
    fn test_presets() {
        assert!(Theme::from_preset("ink").is_some());
        assert!(Theme::from_preset("Default").is_some());
        assert_eq!(
            Theme::from_preset("light").map(|t| t.background),
            Some(Theme::paper().background)
        );
        assert!(Theme::from_preset("nord").is_none());
    }

    #[test]
    fn test_presets_differ() {
        assert_ne!(Theme::ink().background, Theme::paper().background);
        assert_ne!(Theme::paper().notice, Theme::paper().error);
    }
}
