use std::path::PathBuf;

use super::Config;

/// Returns the config directory: `~/.config/elevator/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("elevator"))
}

/// Returns the config file path: `~/.config/elevator/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns `Ok(Config)` on success, or an error string describing
/// what went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Parses and validates config file contents.
pub fn parse(content: &str) -> Result<Config, String> {
    let mut config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// Non-existent files silently return defaults; other errors are reported.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Loads a config value from disk, falling back to defaults.
fn load_or_default<T>(try_load: impl FnOnce() -> Result<T, String>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if is_file_not_found(&e) => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}

/// Returns true if the error message indicates a missing file.
fn is_file_not_found(e: &str) -> bool {
    e.contains("cannot find the path")
        || e.contains("The system cannot find")
        || e.contains("No such file or directory")
}
