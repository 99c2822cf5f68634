use elevator_core::config;

use super::banner;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const FIXED: &str = "\x1b[36m[fixed]\x1b[0m";

pub fn execute() {
    banner::print_logo();
    println!();
    check_config_dir();
    check_config_file();
    check_logging();
    check_registry();
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("  {FIXED} Created config directory ({})", dir.display());
            }
            Err(e) => {
                println!("  {FAIL} Config directory missing and could not create it: {e}");
            }
        },
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_config_file() {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} config.toml not found (using defaults, run 'elevator init')");
        return;
    }
    match config::try_load() {
        Ok(_) => println!("  {OK} config.toml is valid"),
        Err(e) => println!("  {FAIL} config.toml: {e}"),
    }
}

fn check_logging() {
    let config = config::load();
    if config.logging.enabled {
        println!("  {OK} File logging enabled (level: {})", config.logging.level);
    } else {
        println!("  {WARN} File logging disabled (set [logging] enabled = true to debug)");
    }
}

#[cfg(windows)]
fn check_registry() {
    use elevator_core::ElevationStore;

    let store = elevator_windows::RegistryStore::new();
    if let Err(e) = store.check_access() {
        println!("  {FAIL} Compatibility layers key is not writable: {e}");
        return;
    }
    match store.list_current() {
        Ok(entries) => println!(
            "  {OK} Compatibility layers key is writable ({} program(s) elevated)",
            entries.len()
        ),
        Err(e) => println!("  {FAIL} Could not read compatibility layers: {e}"),
    }
}

#[cfg(not(windows))]
fn check_registry() {
    println!("  {WARN} Registry checks only run on Windows");
}
