//! Window colors.
//!
//! [`ThemeConfig`] deserializes from the `[theme]` section in
//! `config.toml`. Every color is a `#rrggbb` hex string; invalid values
//! are replaced with the default during validation.

use serde::{Deserialize, Serialize};

/// RGB color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parses a hex color string like "#89b4fa" or "89b4fa".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Packs the color as a Win32 `COLORREF` (`0x00BBGGRR`).
    pub fn to_colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

/// User-facing color configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window body.
    pub background: String,
    /// Header strip.
    pub header: String,
    /// Primary text.
    pub text: String,
    /// Secondary text (path label, placeholders).
    pub muted: String,
    /// Focus ring and selected-row accent.
    pub accent: String,
    /// Rounded border while unfocused.
    pub border: String,
    /// Selected list row and hovered buttons.
    pub selection: String,
    /// Hovered close button.
    pub close_hover: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".into(),
            header: "#181825".into(),
            text: "#cdd6f4".into(),
            muted: "#a6adc8".into(),
            accent: "#89b4fa".into(),
            border: "#45475a".into(),
            selection: "#313244".into(),
            close_hover: "#f38ba8".into(),
        }
    }
}

impl ThemeConfig {
    /// Replaces every unparsable color with its default.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        let pairs = [
            (&mut self.background, defaults.background),
            (&mut self.header, defaults.header),
            (&mut self.text, defaults.text),
            (&mut self.muted, defaults.muted),
            (&mut self.accent, defaults.accent),
            (&mut self.border, defaults.border),
            (&mut self.selection, defaults.selection),
            (&mut self.close_hover, defaults.close_hover),
        ];
        for (value, default) in pairs {
            if Color::from_hex(value).is_none() {
                *value = default;
            }
        }
    }
}
