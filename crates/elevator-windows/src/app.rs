//! The elevator window: a captionless top-level window whose chrome is
//! drawn and hit-tested by the application.
//!
//! The window procedure is the only adapter between Win32 messages and
//! the platform-neutral [`Chrome`] controller.
//!
//! Window state lives in a `RefCell` behind `GWLP_USERDATA` and is only
//! borrowed for short state updates. Anything that can pump messages
//! (modal size/move loops, `ShowWindow`, message boxes, the file dialog)
//! runs with no borrow held, because those loops call back into the
//! window procedure. A message that still arrives while the state is
//! borrowed gets default handling.

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_void;
use std::ops::Range;
use std::panic::{self, Location};
use std::path::PathBuf;
use std::sync::Once;
use std::time::Instant;

use elevator_core::prompt::HOMEPAGE;
use elevator_core::{
    Chrome, ChromeLayout, ChromeRegion, Config, Control, CursorShape, ElevationList, Point,
    Prompt, PromptKind, WindowResult, WindowState, actions, chrome, config, log_debug, log_error,
    log_info, log_warn,
};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::InvalidateRect;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, TME_LEAVE, TRACKMOUSEEVENT, TrackMouseEvent, VK_DELETE, VK_LBUTTON,
};
use windows::Win32::UI::Shell::{DragAcceptFiles, HDROP};
use windows::Win32::UI::WindowsAndMessaging::{
    CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow,
    DispatchMessageW, GWLP_USERDATA, GetMessageW, GetSystemMetrics, GetWindowLongPtrW, HTCLIENT,
    IDC_ARROW, IDC_SIZENESW, IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE, LoadCursorW, MSG,
    PostMessageW, PostQuitMessage, RegisterClassW, SIZE_MAXIMIZED, SIZE_MINIMIZED, SIZE_RESTORED,
    SM_CXSCREEN, SM_CYSCREEN, SW_SHOW, SWP_FRAMECHANGED, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER,
    SetCursor, SetWindowLongPtrW, SetWindowPos, ShowWindow, TranslateMessage, WHEEL_DELTA,
    WINDOW_EX_STYLE, WM_CLOSE, WM_CREATE, WM_DESTROY, WM_DROPFILES, WM_ERASEBKGND, WM_KEYDOWN,
    WM_KILLFOCUS, WM_LBUTTONDOWN, WM_MOUSELEAVE, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_NCCREATE,
    WM_NCDESTROY, WM_PAINT, WM_SETCURSOR, WM_SETFOCUS, WM_SIZE, WNDCLASSW, WS_MAXIMIZEBOX,
    WS_MINIMIZEBOX, WS_POPUP, WS_SYSMENU, WS_THICKFRAME,
};
use windows::core::{PCWSTR, w};

use crate::native::{Win32Sink, native_handle, run_deferred};
use crate::paint::{self, Palette, Scene};
use crate::prompt::MessageBoxPrompt;
use crate::registry::RegistryStore;
use crate::shell;
use crate::wide;

static REGISTER_CLASS: Once = Once::new();
const CLASS_NAME: PCWSTR = w!("ElevatorWindow");

// Mouse message key-state bits.
const MK_LBUTTON: usize = 0x0001;
const MK_CONTROL: usize = 0x0008;

/// Rows scrolled per wheel notch.
const WHEEL_ROWS: isize = 3;

/// Per-window state reachable from the window procedure.
struct WindowContext {
    chrome: Chrome<Win32Sink>,
    layout: ChromeLayout,
    palette: Palette,
    title: String,
    confirm_quit: bool,
    store: RegistryStore,
    list: ElevationList,
    hover: Option<ChromeRegion>,
    tracking_leave: bool,
    size: (i32, i32),
}

impl WindowContext {
    fn new(config: &Config) -> Self {
        Self {
            chrome: Chrome::new(Win32Sink::default()),
            layout: config.chrome.layout(),
            palette: Palette::from_theme(&config.theme),
            title: config.window.title.clone(),
            confirm_quit: config.chrome.confirm_quit,
            store: RegistryStore::new(),
            list: ElevationList::default(),
            hover: None,
            tracking_leave: false,
            size: (config.window.width, config.window.height),
        }
    }

    fn prompt(&self, hwnd: HWND) -> MessageBoxPrompt {
        MessageBoxPrompt::new(Some(hwnd), &self.title)
    }

    fn visible_rows(&self) -> usize {
        let (width, height) = self.size;
        self.layout.visible_rows(width, height)
    }

    fn shown_rows(&self) -> Range<usize> {
        self.list.visible_range(self.visible_rows())
    }

    fn hit_test(&self, p: Point) -> ChromeRegion {
        let (width, height) = self.size;
        self.layout
            .hit_test(p, width, height, self.chrome.visuals(), self.shown_rows())
    }
}

/// Loads the configuration, starts logging and runs the window until it
/// is closed.
pub fn launch() -> WindowResult<()> {
    let config = config::load();
    elevator_core::log::init(&config.logging);
    log_info!("elevator {} starting", env!("CARGO_PKG_VERSION"));
    report_panics(&config.window.title);
    run(&config)
}

/// Opens the window and runs the message loop until it is closed.
pub fn run(config: &Config) -> WindowResult<()> {
    enable_dpi_awareness();
    ensure_class_registered()?;

    let (width, height) = (config.window.width, config.window.height);
    // SAFETY: GetSystemMetrics has no preconditions.
    let (screen_w, screen_h) =
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    let x = ((screen_w - width) / 2).max(0);
    let y = ((screen_h - height) / 2).max(0);

    let context = Box::into_raw(Box::new(RefCell::new(WindowContext::new(config))));
    let title = wide(&config.window.title);
    let style = WS_POPUP | WS_THICKFRAME | WS_MINIMIZEBOX | WS_MAXIMIZEBOX | WS_SYSMENU;

    // SAFETY: the context pointer is stored at WM_NCCREATE and freed at
    // WM_NCDESTROY.
    let hwnd = unsafe {
        let instance = GetModuleHandleW(None)?;
        let created = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            style,
            x,
            y,
            width,
            height,
            None,
            None,
            Some(instance.into()),
            Some(context as *const c_void),
        );
        // On failure after WM_NCCREATE the context is freed by
        // WM_NCDESTROY, so it is not reclaimed here.
        created?
    };

    log_info!("window created ({width}x{height})");

    // SAFETY: valid HWND owned by this thread.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
    }

    run_message_pump();
    Ok(())
}

/// Logs panics and shows them in a message box before the process ends.
fn report_panics(title: &str) {
    let caption = title.to_string();
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let message = describe_panic(info.payload(), info.location());
        log_error!("{message}");
        MessageBoxPrompt::new(None, &caption).confirm(&message, PromptKind::OkError);
        previous(info);
    }));
}

fn describe_panic(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> String {
    let what = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown error");
    match location {
        Some(at) => format!("Unexpected error: {what} ({}:{})", at.file(), at.line()),
        None => format!("Unexpected error: {what}"),
    }
}

/// Declares per-monitor DPI awareness so the chrome is laid out in real
/// pixels. Fails harmlessly if a manifest already set it.
fn enable_dpi_awareness() {
    // SAFETY: called once before any window exists.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

fn ensure_class_registered() -> WindowResult<()> {
    let mut result = Ok(());
    REGISTER_CLASS.call_once(|| {
        // SAFETY: the class name is a static wide string and the window
        // procedure matches the WNDPROC signature.
        unsafe {
            let instance = match GetModuleHandleW(None) {
                Ok(module) => module,
                Err(e) => {
                    result = Err(e);
                    return;
                }
            };
            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(window_proc),
                hInstance: instance.into(),
                lpszClassName: CLASS_NAME,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                result = Err(windows::core::Error::from_win32());
            }
        }
    });
    result.map_err(Into::into)
}

/// Blocks until WM_QUIT.
fn run_message_pump() {
    let mut msg = MSG::default();
    // SAFETY: standard GetMessage/Dispatch loop on the UI thread.
    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

fn context_cell(hwnd: HWND) -> Option<*const RefCell<WindowContext>> {
    // SAFETY: reading our own window's user data.
    let ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const RefCell<WindowContext>;
    (!ptr.is_null()).then_some(ptr)
}

/// Runs `f` with the window state borrowed, then performs the native
/// calls it queued.
///
/// Returns `None` when the window has no state or a handler further up
/// the stack is holding it.
fn with_context<R>(hwnd: HWND, f: impl FnOnce(&mut WindowContext) -> R) -> Option<R> {
    let ptr = context_cell(hwnd)?;
    // SAFETY: the cell is freed only in WM_NCDESTROY, which never arrives
    // while a borrow is held: DestroyWindow is only called unborrowed.
    let cell = unsafe { &*ptr };
    let Ok(mut ctx) = cell.try_borrow_mut() else {
        log_debug!("window state busy, default handling");
        return None;
    };
    let result = f(&mut ctx);
    let deferred = ctx.chrome.dispatcher_mut().sink_mut().take_pending();
    drop(ctx);
    run_deferred(deferred);
    Some(result)
}

fn point_from_lparam(lparam: LPARAM) -> Point {
    let raw = lparam.0 as u32;
    let x = (raw & 0xFFFF) as u16 as i16 as i32;
    let y = ((raw >> 16) & 0xFFFF) as u16 as i16 as i32;
    Point::new(x, y)
}

fn state_from_size(kind: u32) -> Option<WindowState> {
    match kind {
        SIZE_RESTORED => Some(WindowState::Normal),
        SIZE_MINIMIZED => Some(WindowState::Minimized),
        SIZE_MAXIMIZED => Some(WindowState::Maximized),
        _ => None,
    }
}

/// Rows to scroll for a `WM_MOUSEWHEEL`. Rolling away from the user
/// scrolls up.
fn wheel_rows(wparam: WPARAM) -> isize {
    let delta = (wparam.0 >> 16) as u16 as i16 as isize;
    -delta * WHEEL_ROWS / WHEEL_DELTA as isize
}

fn apply_cursor(shape: CursorShape) {
    let id = match shape {
        CursorShape::Arrow => IDC_ARROW,
        CursorShape::SizeNS => IDC_SIZENS,
        CursorShape::SizeWE => IDC_SIZEWE,
        CursorShape::SizeNWSE => IDC_SIZENWSE,
        CursorShape::SizeNESW => IDC_SIZENESW,
    };
    // SAFETY: system cursors are shared and never freed.
    unsafe {
        if let Ok(cursor) = LoadCursorW(None, id) {
            SetCursor(Some(cursor));
        }
    }
}

fn repaint(hwnd: HWND) {
    // SAFETY: valid HWND.
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, false);
    }
}

fn primary_held() -> bool {
    // SAFETY: GetKeyState has no preconditions; the high bit means down.
    unsafe { GetKeyState(VK_LBUTTON.0 as i32) < 0 }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        // SAFETY: lparam of WM_NCCREATE is the CREATESTRUCTW whose
        // lpCreateParams is the boxed context passed to CreateWindowExW.
        unsafe {
            let create = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }
    }

    if msg == WM_NCDESTROY {
        if let Some(ptr) = context_cell(hwnd) {
            // SAFETY: the pointer was produced by Box::into_raw in `run`
            // and no borrow of it is live (see `with_context`).
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                drop(Box::from_raw(ptr as *mut RefCell<WindowContext>));
            }
        }
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let handled = match msg {
        WM_CREATE => {
            on_create(hwnd);
            Some(LRESULT(0))
        }
        WM_SIZE => {
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            with_context(hwnd, |ctx| {
                if width > 0 && height > 0 {
                    ctx.size = (width, height);
                }
                if let Some(state) = state_from_size(wparam.0 as u32) {
                    ctx.chrome.sync_state(state);
                }
            });
            repaint(hwnd);
            Some(LRESULT(0))
        }
        WM_SETFOCUS => {
            with_context(hwnd, |ctx| ctx.chrome.on_focus_gained());
            repaint(hwnd);
            Some(LRESULT(0))
        }
        WM_KILLFOCUS => {
            with_context(hwnd, |ctx| ctx.chrome.on_focus_lost());
            repaint(hwnd);
            Some(LRESULT(0))
        }
        WM_MOUSEMOVE => {
            on_mouse_move(hwnd, point_from_lparam(lparam), wparam);
            Some(LRESULT(0))
        }
        WM_MOUSELEAVE => {
            let left = with_context(hwnd, |ctx| {
                ctx.tracking_leave = false;
                ctx.hover.take().is_some()
            });
            if left == Some(true) {
                repaint(hwnd);
            }
            Some(LRESULT(0))
        }
        WM_MOUSEWHEEL => {
            let rows = wheel_rows(wparam);
            with_context(hwnd, |ctx| {
                let visible = ctx.visible_rows();
                ctx.list.scroll_by(rows, visible);
                ctx.hover = None;
            });
            repaint(hwnd);
            Some(LRESULT(0))
        }
        WM_SETCURSOR if (lparam.0 & 0xFFFF) as u32 == HTCLIENT => {
            with_context(hwnd, |ctx| apply_cursor(ctx.chrome.cursor())).map(|()| LRESULT(1))
        }
        WM_LBUTTONDOWN => {
            on_left_button_down(hwnd, point_from_lparam(lparam), wparam);
            Some(LRESULT(0))
        }
        WM_KEYDOWN if wparam.0 == VK_DELETE.0 as usize => {
            remove_selected(hwnd);
            Some(LRESULT(0))
        }
        WM_DROPFILES => {
            let files = shell::dropped_files(HDROP(wparam.0 as *mut c_void));
            log_debug!("{} file(s) dropped", files.len());
            add_programs(hwnd, &files);
            Some(LRESULT(0))
        }
        WM_CLOSE => {
            on_close(hwnd);
            Some(LRESULT(0))
        }
        WM_ERASEBKGND => Some(LRESULT(1)),
        WM_PAINT => with_context(hwnd, |ctx| {
            let scene = Scene {
                title: &ctx.title,
                layout: ctx.layout,
                palette: ctx.palette,
                visuals: ctx.chrome.visuals(),
                state: ctx.chrome.state(),
                list: &ctx.list,
                hover: ctx.hover,
            };
            paint::paint(hwnd, &scene);
            LRESULT(0)
        }),
        WM_DESTROY => {
            log_info!("window destroyed");
            // SAFETY: ends the message loop of this thread.
            unsafe { PostQuitMessage(0) };
            Some(LRESULT(0))
        }
        _ => None,
    };

    handled.unwrap_or_else(|| unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) })
}

fn on_create(hwnd: HWND) {
    with_context(hwnd, |ctx| match native_handle(hwnd) {
        Some(handle) => ctx.chrome.on_source_initialized(handle),
        None => log_warn!("window created without a handle"),
    });

    // SAFETY: valid HWND; SWP_FRAMECHANGED re-runs WM_NCCALCSIZE now that
    // the frame subclass is installed.
    unsafe {
        let _ = SetWindowPos(
            hwnd,
            None,
            0,
            0,
            0,
            0,
            SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER,
        );
        DragAcceptFiles(hwnd, true);
    }

    reload(hwnd);
}

fn on_mouse_move(hwnd: HWND, p: Point, wparam: WPARAM) {
    let held = wparam.0 & MK_LBUTTON != 0;
    let changed = with_context(hwnd, |ctx| {
        ctx.chrome.on_pointer_move(held);

        let region = ctx.hit_test(p);
        if let ChromeRegion::Edge(edge) = region
            && !held
        {
            ctx.chrome.on_region_hover(edge);
        }
        apply_cursor(ctx.chrome.cursor());

        if !ctx.tracking_leave {
            let mut tme = TRACKMOUSEEVENT {
                cbSize: size_of::<TRACKMOUSEEVENT>() as u32,
                dwFlags: TME_LEAVE,
                hwndTrack: hwnd,
                dwHoverTime: 0,
            };
            // SAFETY: cbSize is set and hwnd is ours.
            ctx.tracking_leave = unsafe { TrackMouseEvent(&mut tme) }.is_ok();
        }

        let hover = Some(region);
        let changed = ctx.hover != hover;
        ctx.hover = hover;
        changed
    });
    if changed == Some(true) {
        repaint(hwnd);
    }
}

fn on_left_button_down(hwnd: HWND, p: Point, wparam: WPARAM) {
    let Some(region) = with_context(hwnd, |ctx| ctx.hit_test(p)) else {
        return;
    };
    match region {
        ChromeRegion::Edge(edge) => {
            // The native resize loop runs once the state is released.
            let direction = with_context(hwnd, |ctx| ctx.chrome.on_region_press(edge));
            log_debug!("resize {direction:?} finished");
            with_context(hwnd, |ctx| apply_cursor(ctx.chrome.cursor()));
        }
        ChromeRegion::Header => {
            let held = primary_held();
            with_context(hwnd, |ctx| ctx.chrome.on_header_press(Instant::now(), held));
        }
        ChromeRegion::Minimize => {
            with_context(hwnd, |ctx| ctx.chrome.minimize());
        }
        ChromeRegion::MaximizeRestore => {
            with_context(hwnd, |ctx| ctx.chrome.toggle_maximize_restore());
        }
        ChromeRegion::Close => {
            // SAFETY: posting to our own window.
            unsafe {
                let _ = PostMessageW(Some(hwnd), WM_CLOSE, WPARAM(0), LPARAM(0));
            }
        }
        ChromeRegion::Control(Control::Add) => {
            let files = shell::pick_programs(hwnd);
            add_programs(hwnd, &files);
        }
        ChromeRegion::Control(Control::Remove) => remove_selected(hwnd),
        ChromeRegion::Control(Control::About) => {
            let Some(prompt) = with_context(hwnd, |ctx| ctx.prompt(hwnd)) else {
                return;
            };
            if actions::about(&prompt) {
                shell::open_url(hwnd, HOMEPAGE);
            }
        }
        ChromeRegion::ListRow(index) => {
            let extend = wparam.0 & MK_CONTROL != 0;
            with_context(hwnd, |ctx| {
                if extend {
                    ctx.list.toggle(index);
                } else {
                    ctx.list.select_only(index);
                }
            });
            repaint(hwnd);
        }
        ChromeRegion::Client => {}
    }
}

fn on_close(hwnd: HWND) {
    let Some((prompt, confirm)) = with_context(hwnd, |ctx| (ctx.prompt(hwnd), ctx.confirm_quit))
    else {
        return;
    };
    if chrome::close_requested(&prompt, confirm) {
        // SAFETY: destroying our own window on its thread, unborrowed.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

fn add_programs(hwnd: HWND, files: &[PathBuf]) {
    let result = with_context(hwnd, |ctx| actions::add(&mut ctx.list, &mut ctx.store, files));
    report(hwnd, result);
    repaint(hwnd);
}

fn remove_selected(hwnd: HWND) {
    let Some((selected, prompt)) =
        with_context(hwnd, |ctx| (ctx.list.selected_paths(), ctx.prompt(hwnd)))
    else {
        return;
    };
    if !actions::confirm_removal(&selected, &prompt) {
        return;
    }
    let result = with_context(hwnd, |ctx| {
        actions::remove(&mut ctx.list, &mut ctx.store, &selected)
    });
    report(hwnd, result);
    repaint(hwnd);
}

/// Shows a store failure to the user and resyncs the list with whatever
/// the store holds now.
fn report(hwnd: HWND, result: Option<Result<bool, String>>) {
    if let Some(Err(e)) = result {
        show_error(hwnd, &e);
        reload(hwnd);
    }
}

fn reload(hwnd: HWND) {
    if let Some(Err(e)) = with_context(hwnd, |ctx| ctx.list.reload(&ctx.store)) {
        show_error(hwnd, &e);
    }
}

fn show_error(hwnd: HWND, message: &str) {
    log_error!("{message}");
    if let Some(prompt) = with_context(hwnd, |ctx| ctx.prompt(hwnd)) {
        prompt.confirm(message, PromptKind::OkError);
    }
}
