pub mod actions;
pub mod chrome;
pub mod config;
pub mod direction;
pub mod dispatch;
pub mod elevation;
pub mod layout;
pub mod log;
pub mod prompt;
pub mod rect;
pub mod region;
pub mod state;
pub mod window;

pub use chrome::Chrome;
pub use config::Config;
pub use direction::ResizeDirection;
pub use dispatch::{Dispatcher, MessageSink};
pub use elevation::{ElevationEntry, ElevationList, ElevationStore};
pub use layout::{ChromeLayout, ChromeRegion, Control};
pub use prompt::{Prompt, PromptKind};
pub use rect::{Point, Rect};
pub use region::{CursorShape, HitRegion};
pub use state::{ChromeVisuals, WindowState};
pub use window::{NativeHandle, WindowResult};
