use std::path::PathBuf;

use elevator_core::elevation::find_entry;
use elevator_core::prompt::REMOVE_MESSAGE;
use elevator_core::{ElevationStore, Prompt, PromptKind};

use super::{TerminalPrompt, absolute, fail, open_store};

/// Removes the mark from the given programs, asking first unless `yes`.
pub fn execute(paths: &[PathBuf], yes: bool) {
    let mut store = open_store().unwrap_or_else(|e| fail(&e));
    let current = store.list_current().unwrap_or_else(|e| fail(&e));

    let mut targets = Vec::new();
    for path in paths {
        let full = absolute(path).unwrap_or_else(|e| fail(&e));
        if let Some(entry) = find_entry(&current, &full) {
            targets.push(entry.full_path.clone());
        } else {
            println!("Not on the list: {}", full.display());
        }
    }

    if targets.is_empty() {
        return;
    }
    if !yes && !TerminalPrompt.confirm(REMOVE_MESSAGE, PromptKind::YesNoWarning) {
        println!("Nothing removed.");
        return;
    }

    if let Err(e) = store.remove_paths(&targets) {
        fail(&e);
    }
    for path in &targets {
        println!("Removed {}", path.display());
    }
}
