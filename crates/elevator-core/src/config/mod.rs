mod loader;
pub mod template;
pub mod theme;
pub mod types;

use serde::{Deserialize, Serialize};

pub use loader::{config_dir, config_path, load, parse, try_load};
pub use theme::{Color, ThemeConfig};
pub use types::{ChromeConfig, WindowConfig};

use crate::log::LogConfig;

/// Top-level configuration for Elevator.
///
/// Loaded from `~/.config/elevator/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial window geometry and title.
    pub window: WindowConfig,
    /// Custom chrome sizing.
    pub chrome: ChromeConfig,
    /// Colors.
    pub theme: ThemeConfig,
    /// File logging.
    pub logging: LogConfig,
}

impl Config {
    /// Clamps sizes to ranges the chrome can lay out.
    ///
    /// The header must fit the caption buttons and the resize strips
    /// must stay thinner than the header, or the header would become
    /// unreachable.
    pub fn validate(&mut self) {
        self.window.width = self.window.width.clamp(360, 4096);
        self.window.height = self.window.height.clamp(240, 4096);
        if self.window.title.trim().is_empty() {
            self.window.title = WindowConfig::default().title;
        }

        let chrome = &mut self.chrome;
        chrome.header_height = chrome.header_height.clamp(20, 64);
        chrome.resize_border = chrome.resize_border.clamp(1, chrome.header_height / 2);
        chrome.corner = chrome.corner.clamp(chrome.resize_border, 48);
        chrome.button_width = chrome.button_width.clamp(24, 96);
        chrome.row_height = chrome.row_height.clamp(16, 48);

        self.theme.validate();
    }
}
