//! Window-only entry point.
//!
//! Built for the GUI subsystem so that launching it from Explorer or a
//! shortcut does not open a console next to the window. Errors go to a
//! message box because there is no console to print to.
#![cfg_attr(windows, windows_subsystem = "windows")]

#[cfg(windows)]
fn main() {
    use elevator_core::{Prompt, PromptKind, log_error};
    use elevator_windows::MessageBoxPrompt;

    if let Err(e) = elevator_windows::launch() {
        log_error!("window failed: {e}");
        MessageBoxPrompt::new(None, "Elevator").confirm(&e.to_string(), PromptKind::OkError);
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    eprintln!("Error: the elevator window is only available on Windows");
    std::process::exit(1);
}
