/// A boxed error type for window operations.
///
/// Platform calls surface their own error types (`windows::core::Error`
/// on Windows); boxing lets the core stay independent of them.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// An opaque native window handle.
///
/// Stored as a pointer-sized integer so the core does not depend on a
/// platform crate. The platform crate converts it back to its own
/// handle type (`HWND` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    /// Wraps a raw handle value. Returns `None` for the null handle.
    pub fn from_raw(raw: usize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn raw(self) -> usize {
        self.0
    }
}
