use std::path::PathBuf;

use elevator_core::ElevationStore;

use super::{absolute, fail, open_store};

/// Marks the given programs to always run as administrator.
pub fn execute(paths: &[PathBuf]) {
    let mut resolved = Vec::with_capacity(paths.len());
    for path in paths {
        let full = absolute(path).unwrap_or_else(|e| fail(&e));
        if !full.is_file() {
            fail(&format!("{} is not a file", full.display()));
        }
        resolved.push(full);
    }

    let mut store = open_store().unwrap_or_else(|e| fail(&e));
    if let Err(e) = store.add_paths(&resolved) {
        fail(&e);
    }

    for path in &resolved {
        println!("Added {}", path.display());
    }
}
