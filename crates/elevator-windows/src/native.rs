//! Win32 side of the message dispatcher.
//!
//! The window is created without a caption, so the OS frame is removed
//! by a subclass that claims the whole window as client area in
//! `WM_NCCALCSIZE`. DWM still renders the drop shadow once non-client
//! rendering is enabled and the frame is extended by one pixel.
//!
//! Messages and show requests are not performed inside the sink. Both can
//! re-enter the window procedure (`ShowWindow` sends `WM_SIZE`, the size
//! and move syscommands run a modal loop), so they are queued and the
//! window procedure runs them with [`run_deferred`] once it has released
//! its window state.

use std::ffi::c_void;

use elevator_core::dispatch::MessageSink;
use elevator_core::{NativeHandle, WindowResult, WindowState, log_debug};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Dwm::{
    DWMWINDOWATTRIBUTE, DwmExtendFrameIntoClientArea, DwmSetWindowAttribute,
};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};
use windows::Win32::UI::Controls::MARGINS;
use windows::Win32::UI::Input::KeyboardAndMouse::ReleaseCapture;
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    MINMAXINFO, SHOW_WINDOW_CMD, SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SendMessageW, ShowWindow,
    WM_GETMINMAXINFO, WM_NCCALCSIZE, WM_NCDESTROY,
};

const SUBCLASS_ID: usize = 0x454C_4556;

/// Smallest size the user can drag the window to.
pub const MIN_TRACK_SIZE: (i32, i32) = (360, 240);

pub(crate) fn hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

/// Converts a Win32 window into the platform-neutral handle.
pub(crate) fn native_handle(hwnd: HWND) -> Option<NativeHandle> {
    NativeHandle::from_raw(hwnd.0 as usize)
}

/// A native call held back until the window state is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    Message {
        handle: NativeHandle,
        msg: u32,
        wparam: usize,
        lparam: isize,
    },
    Show {
        handle: NativeHandle,
        state: WindowState,
    },
}

/// [`MessageSink`] that talks to a real Win32 window.
#[derive(Debug, Default)]
pub struct Win32Sink {
    pending: Vec<Deferred>,
}

impl Win32Sink {
    /// Takes the calls queued since the last take, oldest first.
    pub fn take_pending(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.pending)
    }
}

/// Performs calls taken from [`Win32Sink::take_pending`].
pub fn run_deferred(calls: Vec<Deferred>) {
    for call in calls {
        match call {
            Deferred::Message {
                handle,
                msg,
                wparam,
                lparam,
            } => {
                // SAFETY: the sizing and move syscommands start a modal
                // loop that needs the mouse capture released first.
                unsafe {
                    let _ = ReleaseCapture();
                    SendMessageW(hwnd(handle), msg, Some(WPARAM(wparam)), Some(LPARAM(lparam)));
                }
            }
            Deferred::Show { handle, state } => {
                log_debug!("ShowWindow {state:?}");
                // SAFETY: ShowWindow is safe to call with any HWND.
                unsafe {
                    let _ = ShowWindow(hwnd(handle), show_command(state));
                }
            }
        }
    }
}

fn show_command(state: WindowState) -> SHOW_WINDOW_CMD {
    match state {
        WindowState::Normal => SW_RESTORE,
        WindowState::Minimized => SW_MINIMIZE,
        WindowState::Maximized => SW_MAXIMIZE,
    }
}

impl MessageSink for Win32Sink {
    fn install_hook(&mut self, handle: NativeHandle) -> WindowResult<()> {
        // SAFETY: the subclass is removed again in WM_NCDESTROY and uses
        // no reference data.
        let ok = unsafe { SetWindowSubclass(hwnd(handle), Some(frame_subclass_proc), SUBCLASS_ID, 0) };
        if !ok.as_bool() {
            return Err("SetWindowSubclass failed".into());
        }
        Ok(())
    }

    fn set_window_attribute(
        &mut self,
        handle: NativeHandle,
        attribute: u32,
        value: u32,
        size: u32,
    ) -> WindowResult<()> {
        // SAFETY: `value` outlives the call and `size` never exceeds it.
        unsafe {
            DwmSetWindowAttribute(
                hwnd(handle),
                DWMWINDOWATTRIBUTE(attribute as i32),
                &value as *const u32 as *const c_void,
                size.min(size_of::<u32>() as u32),
            )?;
        }
        Ok(())
    }

    fn show_shadow(&mut self, handle: NativeHandle) -> WindowResult<()> {
        let margins = MARGINS {
            cxLeftWidth: 1,
            cxRightWidth: 1,
            cyTopHeight: 1,
            cyBottomHeight: 1,
        };
        // SAFETY: valid HWND and margins pointer.
        unsafe { DwmExtendFrameIntoClientArea(hwnd(handle), &margins)? };
        Ok(())
    }

    fn send_message(&mut self, handle: NativeHandle, msg: u32, wparam: usize, lparam: isize) {
        self.pending.push(Deferred::Message {
            handle,
            msg,
            wparam,
            lparam,
        });
    }

    fn show(&mut self, handle: NativeHandle, state: WindowState) {
        self.pending.push(Deferred::Show { handle, state });
    }
}

/// Subclass that removes the OS frame and keeps maximized windows on
/// the monitor's work area.
unsafe extern "system" fn frame_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _uid: usize,
    _ref_data: usize,
) -> LRESULT {
    // SAFETY: called by Windows on the UI thread with the parameters of
    // the message being processed.
    unsafe {
        match msg {
            // wparam TRUE: the whole proposed rect becomes client area.
            WM_NCCALCSIZE if wparam.0 != 0 => LRESULT(0),
            WM_GETMINMAXINFO => {
                let info = &mut *(lparam.0 as *mut MINMAXINFO);
                fit_to_work_area(hwnd, info);
                LRESULT(0)
            }
            WM_NCDESTROY => {
                let _ = RemoveWindowSubclass(hwnd, Some(frame_subclass_proc), SUBCLASS_ID);
                DefSubclassProc(hwnd, msg, wparam, lparam)
            }
            _ => DefSubclassProc(hwnd, msg, wparam, lparam),
        }
    }
}

/// Without a caption the default maximized size covers the taskbar.
fn fit_to_work_area(hwnd: HWND, info: &mut MINMAXINFO) {
    let mut monitor_info = MONITORINFO {
        cbSize: size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    // SAFETY: MonitorFromWindow always returns a monitor with
    // MONITOR_DEFAULTTONEAREST; cbSize is set.
    let found = unsafe {
        let monitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST);
        GetMonitorInfoW(monitor, &mut monitor_info).as_bool()
    };

    if found {
        let work = monitor_info.rcWork;
        let screen = monitor_info.rcMonitor;
        info.ptMaxPosition.x = work.left - screen.left;
        info.ptMaxPosition.y = work.top - screen.top;
        info.ptMaxSize.x = work.right - work.left;
        info.ptMaxSize.y = work.bottom - work.top;
    }

    info.ptMinTrackSize.x = MIN_TRACK_SIZE.0;
    info.ptMinTrackSize.y = MIN_TRACK_SIZE.1;
}

#[cfg(test)]
mod tests {
    use elevator_core::ResizeDirection;
    use elevator_core::dispatch::WM_SYSCOMMAND;

    use super::*;

    #[test]
    fn requests_wait_in_order_until_taken() {
        // Arrange
        let handle = NativeHandle::from_raw(0x1234).expect("non-null");
        let mut sink = Win32Sink::default();
        sink.send_message(handle, WM_SYSCOMMAND, ResizeDirection::Left.syscommand() as usize, 0);
        sink.show(handle, WindowState::Maximized);

        // Act
        let first = sink.take_pending();
        let second = sink.take_pending();

        // Assert
        assert_eq!(
            first,
            [
                Deferred::Message {
                    handle,
                    msg: WM_SYSCOMMAND,
                    wparam: 61441,
                    lparam: 0,
                },
                Deferred::Show {
                    handle,
                    state: WindowState::Maximized,
                },
            ]
        );
        assert!(second.is_empty());
    }

    #[test]
    fn show_commands_match_states() {
        assert_eq!(show_command(WindowState::Normal), SW_RESTORE);
        assert_eq!(show_command(WindowState::Minimized), SW_MINIMIZE);
        assert_eq!(show_command(WindowState::Maximized), SW_MAXIMIZE);
    }
}
