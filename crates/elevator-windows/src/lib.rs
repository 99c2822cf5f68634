//! Win32 implementation of the elevator window. Empty on other targets.
#![cfg(windows)]

/// The chrome window, its window procedure and message loop.
pub mod app;

/// Frame subclass and the Win32 message sink.
pub mod native;

/// GDI painting.
pub mod paint;

/// MessageBox-backed prompts.
pub mod prompt;

/// Registry-backed elevation store.
pub mod registry;

/// File dialog, drag-and-drop and shell launch.
pub mod shell;

pub use app::{launch, run};
pub use native::Win32Sink;
pub use prompt::MessageBoxPrompt;
pub use registry::RegistryStore;

/// NUL-terminated UTF-16 copy of `s`.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
