pub mod add;
pub mod banner;
pub mod doctor;
pub mod init;
pub mod list;
pub mod open;
pub mod remove;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use elevator_core::{ElevationStore, Prompt, PromptKind};

/// Opens the per-user elevation list in the registry.
#[cfg(windows)]
pub fn open_store() -> Result<impl ElevationStore, String> {
    let store = elevator_windows::RegistryStore::new();
    store.check_access()?;
    Ok(store)
}

#[cfg(not(windows))]
pub fn open_store() -> Result<impl ElevationStore, String> {
    Err::<elevator_core::elevation::MemoryStore, _>(
        "the elevation list lives in the Windows registry; run this on Windows".into(),
    )
}

/// Prints the error and exits with status 1.
pub fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Turns a command-line path into the absolute form used as the
/// registry value name.
pub fn absolute(path: &Path) -> Result<PathBuf, String> {
    std::path::absolute(path).map_err(|e| format!("{}: {e}", path.display()))
}

/// Asks on the terminal. Anything but `y`/`yes` is a no.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str, kind: PromptKind) -> bool {
        match kind {
            PromptKind::OkWarning | PromptKind::OkError => {
                eprintln!("{message}");
                true
            }
            _ => {
                print!("{message} [y/N] ");
                let _ = std::io::stdout().flush();
                let mut answer = String::new();
                if std::io::stdin().lock().read_line(&mut answer).is_err() {
                    return false;
                }
                is_yes(&answer)
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
