//! Bridge between the chrome controller and the native message pipeline.
//!
//! The [`Dispatcher`] owns the captured window handle and encodes the
//! system-command protocol. The platform side only has to implement
//! [`MessageSink`], which performs the raw calls.

use crate::direction::{ResizeDirection, SC_DRAG_MOVE};
use crate::state::WindowState;
use crate::window::{NativeHandle, WindowResult};
use crate::{log_debug, log_info, log_warn};

/// `WM_SYSCOMMAND`.
pub const WM_SYSCOMMAND: u32 = 0x112;

/// `DWMWA_NCRENDERING_POLICY` attribute id.
pub const DWMWA_NCRENDERING_POLICY: u32 = 2;

/// Policy value written for [`DWMWA_NCRENDERING_POLICY`].
pub const NCRENDERING_POLICY_VALUE: u32 = 2;

/// Byte size of the attribute payload.
pub const NCRENDERING_POLICY_SIZE: u32 = 4;

/// Raw native operations the dispatcher needs.
///
/// Implemented by the platform crate; tests use a recording sink.
pub trait MessageSink {
    /// Installs the non-client message hook on the window.
    fn install_hook(&mut self, handle: NativeHandle) -> WindowResult<()>;

    /// Sets a DWM window attribute to a 32-bit value of `size` bytes.
    fn set_window_attribute(
        &mut self,
        handle: NativeHandle,
        attribute: u32,
        value: u32,
        size: u32,
    ) -> WindowResult<()>;

    /// Asks the compositor to draw its default drop shadow.
    fn show_shadow(&mut self, handle: NativeHandle) -> WindowResult<()>;

    /// Sends a message to the window. The receiver runs it synchronously,
    /// which for resize/move commands means a modal loop. A sink may hold
    /// the call back until the caller's own handler has finished.
    fn send_message(&mut self, handle: NativeHandle, msg: u32, wparam: usize, lparam: isize);

    /// Shows the window in the given state. May be held back like
    /// [`MessageSink::send_message`].
    fn show(&mut self, handle: NativeHandle, state: WindowState);
}

/// Sends chrome requests to the captured native window.
///
/// Every request issued before [`Dispatcher::on_source_initialized`] is
/// a silent no-op.
pub struct Dispatcher<S> {
    sink: S,
    handle: Option<NativeHandle>,
}

impl<S: MessageSink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, handle: None }
    }

    /// The captured handle, if initialization has happened.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.handle
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Captures the handle and prepares the window for custom chrome.
    ///
    /// Runs, in order: hook installation, the non-client rendering
    /// policy, and the default shadow. A failing step is logged and the
    /// remaining steps still run; the window opens either way, possibly
    /// without a shadow. Only the first call has any effect.
    pub fn on_source_initialized(&mut self, handle: NativeHandle) {
        if let Some(existing) = self.handle {
            log_warn!(
                "source already initialized with 0x{:X}, ignoring 0x{:X}",
                existing.raw(),
                handle.raw()
            );
            return;
        }
        self.handle = Some(handle);
        crate::log::tag_window(handle);
        log_info!("chrome attached");

        if let Err(e) = self.sink.install_hook(handle) {
            log_warn!("message hook not installed: {e}");
        }
        if let Err(e) = self.sink.set_window_attribute(
            handle,
            DWMWA_NCRENDERING_POLICY,
            NCRENDERING_POLICY_VALUE,
            NCRENDERING_POLICY_SIZE,
        ) {
            log_warn!("non-client rendering policy not set: {e}");
        }
        if let Err(e) = self.sink.show_shadow(handle) {
            log_warn!("window shadow unavailable: {e}");
        }
    }

    /// Hands an interactive resize in `direction` to the platform.
    pub fn request_resize(&mut self, direction: ResizeDirection) {
        self.send_syscommand(direction.syscommand());
    }

    /// Hands an interactive move to the platform.
    pub fn request_drag_move(&mut self) {
        self.send_syscommand(SC_DRAG_MOVE);
    }

    /// Asks the platform to show the window in `state`.
    pub fn request_show(&mut self, state: WindowState) {
        let Some(handle) = self.handle else {
            log_debug!("show {state:?} requested before initialization");
            return;
        };
        self.sink.show(handle, state);
    }

    fn send_syscommand(&mut self, code: u32) {
        let Some(handle) = self.handle else {
            log_debug!("syscommand {code} requested before initialization");
            return;
        };
        log_debug!("syscommand 0x{code:X}");
        self.sink.send_message(handle, WM_SYSCOMMAND, code as usize, 0);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A call recorded by [`RecordingSink`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Hook(usize),
        Attribute { attribute: u32, value: u32, size: u32 },
        Shadow,
        Message { msg: u32, wparam: usize, lparam: isize },
        Show(WindowState),
    }

    /// Records every sink call; optionally fails selected steps.
    #[derive(Default)]
    pub struct RecordingSink {
        pub calls: Vec<Call>,
        pub fail_hook: bool,
        pub fail_attribute: bool,
    }

    impl MessageSink for RecordingSink {
        fn install_hook(&mut self, handle: NativeHandle) -> WindowResult<()> {
            self.calls.push(Call::Hook(handle.raw()));
            if self.fail_hook {
                return Err("hook refused".into());
            }
            Ok(())
        }

        fn set_window_attribute(
            &mut self,
            _handle: NativeHandle,
            attribute: u32,
            value: u32,
            size: u32,
        ) -> WindowResult<()> {
            self.calls.push(Call::Attribute {
                attribute,
                value,
                size,
            });
            if self.fail_attribute {
                return Err("composition disabled".into());
            }
            Ok(())
        }

        fn show_shadow(&mut self, _handle: NativeHandle) -> WindowResult<()> {
            self.calls.push(Call::Shadow);
            Ok(())
        }

        fn send_message(&mut self, _handle: NativeHandle, msg: u32, wparam: usize, lparam: isize) {
            self.calls.push(Call::Message {
                msg,
                wparam,
                lparam,
            });
        }

        fn show(&mut self, _handle: NativeHandle, state: WindowState) {
            self.calls.push(Call::Show(state));
        }
    }

    pub fn handle() -> NativeHandle {
        NativeHandle::from_raw(0xABCD).expect("non-null")
    }

    #[test]
    fn initialization_runs_hook_attribute_shadow_in_order() {
        // Arrange
        let mut dispatcher = Dispatcher::new(RecordingSink::default());

        // Act
        dispatcher.on_source_initialized(handle());

        // Assert
        assert_eq!(
            dispatcher.sink().calls,
            vec![
                Call::Hook(0xABCD),
                Call::Attribute {
                    attribute: 2,
                    value: 2,
                    size: 4
                },
                Call::Shadow,
            ]
        );
        assert_eq!(dispatcher.handle(), Some(handle()));
    }

    #[test]
    fn failed_steps_do_not_stop_initialization() {
        // Arrange
        let sink = RecordingSink {
            fail_hook: true,
            fail_attribute: true,
            ..Default::default()
        };
        let mut dispatcher = Dispatcher::new(sink);

        // Act
        dispatcher.on_source_initialized(handle());
        dispatcher.request_resize(ResizeDirection::Left);

        // Assert
        assert_eq!(dispatcher.sink().calls.len(), 4);
        assert_eq!(dispatcher.sink().calls[2], Call::Shadow);
    }

    #[test]
    fn handle_is_captured_only_once() {
        // Arrange
        let mut dispatcher = Dispatcher::new(RecordingSink::default());
        dispatcher.on_source_initialized(handle());

        // Act
        dispatcher.on_source_initialized(NativeHandle::from_raw(0x9999).expect("non-null"));

        // Assert
        assert_eq!(dispatcher.handle(), Some(handle()));
        assert_eq!(dispatcher.sink().calls.len(), 3);
    }

    #[test]
    fn resize_sends_sc_size_plus_ordinal() {
        // Arrange
        let mut dispatcher = Dispatcher::new(RecordingSink::default());
        dispatcher.on_source_initialized(handle());

        for direction in ResizeDirection::ALL {
            // Act
            dispatcher.request_resize(direction);

            // Assert
            assert_eq!(
                dispatcher.sink().calls.last(),
                Some(&Call::Message {
                    msg: 0x112,
                    wparam: 61440 + direction as usize,
                    lparam: 0
                })
            );
        }
    }

    #[test]
    fn drag_move_sends_move_code() {
        // Arrange
        let mut dispatcher = Dispatcher::new(RecordingSink::default());
        dispatcher.on_source_initialized(handle());

        // Act
        dispatcher.request_drag_move();

        // Assert
        assert_eq!(
            dispatcher.sink().calls.last(),
            Some(&Call::Message {
                msg: WM_SYSCOMMAND,
                wparam: 0xF012,
                lparam: 0
            })
        );
    }

    #[test]
    fn requests_before_initialization_are_no_ops() {
        // Arrange
        let mut dispatcher = Dispatcher::new(RecordingSink::default());

        // Act
        dispatcher.request_resize(ResizeDirection::BottomRight);
        dispatcher.request_drag_move();
        dispatcher.request_show(WindowState::Maximized);

        // Assert
        assert!(dispatcher.sink().calls.is_empty());
        assert_eq!(dispatcher.handle(), None);
    }
}
