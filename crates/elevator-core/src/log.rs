//! Diagnostic log for the elevator window.
//!
//! Lines go to `~/.config/elevator/logs/elevator.log`. Once the chrome is
//! attached every line carries the window handle, so a trace can be lined
//! up with a message spy. A file past `max_file_mb` moves to
//! `elevator.log.1`, replacing the previous backup. Until [`init`]
//! succeeds every call is a no-op, so library code logs unconditionally.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::window::NativeHandle;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Raw handle of the attached window, 0 before attachment.
static WINDOW: AtomicUsize = AtomicUsize::new(0);

const LOG_FILE_NAME: &str = "elevator.log";
const BACKUP_SUFFIX: &str = ".1";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        })
    }
}

/// Initialises the global logger. Call once before the window opens.
///
/// Does nothing if `config.enabled` is `false`.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    init_in(&dir.join("logs"), config);
}

/// Initialises the global logger writing into `log_dir`.
pub fn init_in(log_dir: &Path, config: &LogConfig) {
    let _ = fs::create_dir_all(log_dir);
    let logger = Logger::open(
        log_dir.join(LOG_FILE_NAME),
        Level::parse(&config.level),
        config.max_file_mb * 1024 * 1024,
    );
    if let Ok(logger) = logger {
        let _ = LOGGER.set(Mutex::new(logger));
    }
}

/// Tags every following line with `handle`.
pub fn tag_window(handle: NativeHandle) {
    WINDOW.store(handle.raw(), Ordering::Relaxed);
}

/// Writes a log line if the level is at or above the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let line = format_line(&clock(), level, WINDOW.load(Ordering::Relaxed), args);
    logger.append(&line);
}

fn format_line(time: &str, level: Level, window: usize, args: fmt::Arguments<'_>) -> String {
    match window {
        0 => format!("{time} {level:<5} {args}\n"),
        hwnd => format!("{time} {level:<5} [0x{hwnd:X}] {args}\n"),
    }
}

/// An open log file and its rotation budget.
struct Logger {
    file: File,
    path: PathBuf,
    min_level: Level,
    /// 0 disables rotation.
    max_bytes: u64,
    written: u64,
}

impl Logger {
    fn open(path: PathBuf, min_level: Level, max_bytes: u64) -> io::Result<Self> {
        let file = append_to(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            min_level,
            max_bytes,
            written,
        })
    }

    fn append(&mut self, line: &str) {
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.written += line.len() as u64;
        }
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate();
        }
    }

    /// Keeps writing to the old file if a fresh one cannot be created.
    fn rotate(&mut self) {
        if fs::rename(&self.path, backup_path(&self.path)).is_err() {
            return;
        }
        if let Ok(file) = append_to(&self.path) {
            self.file = file;
            self.written = 0;
        }
    }
}

fn append_to(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// `elevator.log` -> `elevator.log.1`.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// UTC wall-clock time of day with milliseconds.
fn clock() -> String {
    let since_epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600 % 24,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("elevator-log-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn level_parse_is_case_insensitive_and_defaults_to_info() {
        // Assert
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse("warn"), Level::Warn);
        assert_eq!(Level::parse("Error"), Level::Error);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn lines_carry_the_window_once_attached() {
        // Act
        let before = format_line("10:00:00.000", Level::Info, 0, format_args!("starting"));
        let after = format_line("10:00:00.010", Level::Warn, 0x1A2B, format_args!("no shadow"));

        // Assert
        assert_eq!(before, "10:00:00.000 INFO  starting\n");
        assert_eq!(after, "10:00:00.010 WARN  [0x1A2B] no shadow\n");
    }

    #[test]
    fn backup_keeps_full_file_name() {
        // Act
        let backup = backup_path(Path::new("logs").join(LOG_FILE_NAME).as_path());

        // Assert
        assert_eq!(backup, Path::new("logs").join("elevator.log.1"));
    }

    #[test]
    fn full_file_moves_to_backup() {
        // Arrange
        let dir = scratch("rotate");
        let path = dir.join(LOG_FILE_NAME);
        let mut logger = Logger::open(path.clone(), Level::Debug, 40).unwrap();

        // Act
        logger.append("first line of thirty bytes..\n");
        logger.append("second line of thirty bytes.\n");
        logger.append("third\n");

        // Assert
        let backup = fs::read_to_string(backup_path(&path)).unwrap();
        assert!(backup.starts_with("first") && backup.contains("second"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "third\n");
        assert_eq!(logger.written, 6);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn reopening_counts_existing_bytes() {
        // Arrange
        let dir = scratch("reopen");
        let path = dir.join(LOG_FILE_NAME);
        fs::write(&path, "0123456789").unwrap();

        // Act
        let logger = Logger::open(path, Level::Info, 0).unwrap();

        // Assert
        assert_eq!(logger.written, 10);
        let _ = fs::remove_dir_all(&dir);
    }
}
