/// Section types for Elevator configuration.
///
/// Window geometry and chrome sizing shared by the configuration
/// subsystem and the platform window.
use serde::{Deserialize, Serialize};

use crate::layout::ChromeLayout;

/// Initial window settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial client width in pixels.
    pub width: i32,
    /// Initial client height in pixels.
    pub height: i32,
    /// Title drawn in the header and shown on the taskbar.
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 560,
            height: 420,
            title: "Admin Elevator".into(),
        }
    }
}

/// Custom chrome sizing and behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Thickness of the resize strips around the window.
    pub resize_border: i32,
    /// Length of the diagonal resize zones along each edge.
    pub corner: i32,
    /// Height of the draggable header.
    pub header_height: i32,
    /// Width of each caption button.
    pub button_width: i32,
    /// Height of a list row.
    pub row_height: i32,
    /// Ask before closing the window.
    pub confirm_quit: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        let layout = ChromeLayout::default();
        Self {
            resize_border: layout.resize_border,
            corner: layout.corner,
            header_height: layout.header_height,
            button_width: layout.button_width,
            row_height: layout.row_height,
            confirm_quit: true,
        }
    }
}

impl ChromeConfig {
    pub fn layout(&self) -> ChromeLayout {
        ChromeLayout {
            resize_border: self.resize_border,
            corner: self.corner,
            header_height: self.header_height,
            button_width: self.button_width,
            row_height: self.row_height,
        }
    }
}
