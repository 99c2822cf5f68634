/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `elevator init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Elevator configuration
# Location: ~/.config/elevator/config.toml

[window]
# Initial size of the window in pixels.
width = 560
height = 420
# Title shown in the header and on the taskbar.
title = "Admin Elevator"

[chrome]
# Thickness in pixels of the invisible resize strips around the window.
resize_border = 6
# Length in pixels of the diagonal resize zones at each corner.
corner = 16
# Height in pixels of the draggable header. Double-click it to maximize.
header_height = 32
# Width in pixels of the minimize, maximize and close buttons.
button_width = 46
# Height in pixels of a row in the program list.
row_height = 22
# Ask for confirmation before closing the window.
confirm_quit = true

[theme]
# Colors as "#rrggbb". Invalid values fall back to these defaults.
background = "#1e1e2e"
header = "#181825"
text = "#cdd6f4"
muted = "#a6adc8"
accent = "#89b4fa"
border = "#45475a"
selection = "#313244"
close_hover = "#f38ba8"

[logging]
# Enable file logging to ~/.config/elevator/logs/elevator.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
