//! Common dialog, drag-and-drop and shell launch helpers.

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;

use elevator_core::elevation::split_multiselect;
use elevator_core::log_warn;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Controls::Dialogs::{
    GetOpenFileNameW, OFN_ALLOWMULTISELECT, OFN_EXPLORER, OFN_FILEMUSTEXIST, OFN_PATHMUSTEXIST,
    OPENFILENAMEW,
};
use windows::Win32::UI::Shell::{DragFinish, DragQueryFileW, HDROP, ShellExecuteW};
use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
use windows::core::{PCWSTR, PWSTR, w};

/// Room for a few hundred file names in one multi-select.
const SELECTION_BUFFER: usize = 32 * 1024;

/// Shows the "Add" file dialog. Returns an empty list when cancelled.
pub fn pick_programs(owner: HWND) -> Vec<PathBuf> {
    let mut buffer = vec![0u16; SELECTION_BUFFER];
    let filter = w!("Executable Files\0*.exe\0All Files\0*.*\0\0");

    let mut ofn = OPENFILENAMEW {
        lStructSize: size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: owner,
        lpstrFilter: filter,
        lpstrFile: PWSTR(buffer.as_mut_ptr()),
        nMaxFile: buffer.len() as u32,
        lpstrDefExt: w!("exe"),
        Flags: OFN_ALLOWMULTISELECT | OFN_EXPLORER | OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST,
        ..Default::default()
    };

    // SAFETY: the buffer outlives the call and its length is passed in.
    let accepted = unsafe { GetOpenFileNameW(&mut ofn) }.as_bool();
    if !accepted {
        return Vec::new();
    }
    split_multiselect(&buffer)
}

/// Reads and releases the file list of a `WM_DROPFILES` message.
pub fn dropped_files(drop: HDROP) -> Vec<PathBuf> {
    // SAFETY: `drop` comes straight from WM_DROPFILES and is released
    // with DragFinish once read.
    unsafe {
        let count = DragQueryFileW(drop, u32::MAX, None);
        let mut files = Vec::with_capacity(count as usize);
        for index in 0..count {
            let len = DragQueryFileW(drop, index, None) as usize;
            let mut name = vec![0u16; len + 1];
            let copied = DragQueryFileW(drop, index, Some(&mut name)) as usize;
            files.push(PathBuf::from(OsString::from_wide(&name[..copied])));
        }
        DragFinish(drop);
        files
    }
}

/// Opens `url` in the default browser.
pub fn open_url(owner: HWND, url: &str) {
    let target = crate::wide(url);
    // SAFETY: NUL-terminated strings that outlive the call.
    let result = unsafe {
        ShellExecuteW(
            Some(owner),
            w!("open"),
            PCWSTR(target.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };
    // Values up to 32 are error codes.
    if result.0 as usize <= 32 {
        log_warn!("could not open {url}: code {}", result.0 as usize);
    }
}
