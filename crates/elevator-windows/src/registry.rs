//! Elevation list stored in the per-user compatibility layers key.
//!
//! Each marked program is a `REG_SZ` value under
//! `HKEY_CURRENT_USER\Software\Microsoft\Windows NT\CurrentVersion\AppCompatFlags\Layers`
//! whose name is the program's full path and whose data contains
//! `RUNASADMIN`. No elevation is required since HKCU is per-user.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::path::PathBuf;

use elevator_core::elevation::{
    ElevationEntry, ElevationStore, LAYERS_KEY, RUN_AS_ADMIN, entry_from_value,
};
use elevator_core::log_debug;
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_READ, KEY_SET_VALUE, REG_EXPAND_SZ,
    REG_OPTION_NON_VOLATILE, REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE, RegCloseKey, RegCreateKeyExW,
    RegDeleteValueW, RegEnumValueW, RegFlushKey, RegSetValueExW,
};
use windows::core::{PCWSTR, PWSTR};

/// Longest registry value name, in UTF-16 units, plus the terminator.
const MAX_VALUE_NAME: usize = 16_384;

/// Elevation store backed by the HKCU layers key.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryStore;

impl RegistryStore {
    pub fn new() -> Self {
        Self
    }

    /// Checks that the layers key can be opened (or created) for writing.
    pub fn check_access(&self) -> Result<(), String> {
        LayersKey::open(KEY_SET_VALUE | KEY_QUERY_VALUE).map(|_| ())
    }
}

impl ElevationStore for RegistryStore {
    fn add_paths(&mut self, paths: &[PathBuf]) -> Result<(), String> {
        let key = LayersKey::open(KEY_SET_VALUE)?;
        for path in paths {
            key.set_string(path.as_os_str(), RUN_AS_ADMIN)?;
            log_debug!("marked {} as {RUN_AS_ADMIN}", path.display());
        }
        key.flush()
    }

    fn remove_paths(&mut self, paths: &[PathBuf]) -> Result<(), String> {
        let key = LayersKey::open(KEY_SET_VALUE)?;
        for path in paths {
            key.delete(path.as_os_str())?;
            log_debug!("unmarked {}", path.display());
        }
        key.flush()
    }

    fn list_current(&self) -> Result<Vec<ElevationEntry>, String> {
        let key = LayersKey::open(KEY_READ)?;
        let values = key.string_values()?;
        Ok(values
            .iter()
            .filter_map(|(name, data)| entry_from_value(name, data.as_deref()))
            .collect())
    }
}

/// An open handle to the layers key, closed on drop.
struct LayersKey(HKEY);

impl LayersKey {
    /// Opens the layers key, creating it if it does not exist yet.
    fn open(access: REG_SAM_FLAGS) -> Result<Self, String> {
        let wide_key = wide(OsStr::new(LAYERS_KEY));
        let mut key = HKEY::default();
        // SAFETY: RegCreateKeyExW opens the key if present and creates it
        // otherwise. We pass valid pointers and close the key on drop.
        let status = unsafe {
            RegCreateKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(wide_key.as_ptr()),
                None,
                PCWSTR::null(),
                REG_OPTION_NON_VOLATILE,
                access,
                None,
                &mut key,
                None,
            )
        };
        if status.is_err() {
            return Err(format!("could not open registry key: {status:?}"));
        }
        Ok(Self(key))
    }

    /// Writes a REG_SZ value.
    fn set_string(&self, name: &OsStr, value: &str) -> Result<(), String> {
        let wide_name = wide(name);
        let wide_value: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: reinterpreting a &[u16] as &[u8] is safe; the layout is
        // contiguous and we compute the correct byte length.
        let bytes: &[u8] =
            unsafe { std::slice::from_raw_parts(wide_value.as_ptr().cast(), wide_value.len() * 2) };
        // SAFETY: RegSetValueExW with the correct byte length for the value.
        let status =
            unsafe { RegSetValueExW(self.0, PCWSTR(wide_name.as_ptr()), None, REG_SZ, Some(bytes)) };
        if status.is_err() {
            return Err(format!(
                "could not write registry value {}: {status:?}",
                name.display()
            ));
        }
        Ok(())
    }

    /// Deletes a value. A missing value is not an error.
    fn delete(&self, name: &OsStr) -> Result<(), String> {
        let wide_name = wide(name);
        // SAFETY: RegDeleteValueW is a standard Win32 registry API.
        let status = unsafe { RegDeleteValueW(self.0, PCWSTR(wide_name.as_ptr())) };
        if status.is_err() && status != ERROR_FILE_NOT_FOUND {
            return Err(format!(
                "could not delete registry value {}: {status:?}",
                name.display()
            ));
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), String> {
        // SAFETY: RegFlushKey on a key we opened.
        let status = unsafe { RegFlushKey(self.0) };
        if status.is_err() {
            return Err(format!("could not flush registry key: {status:?}"));
        }
        Ok(())
    }

    /// Enumerates all values in order. Non-string values have no data.
    fn string_values(&self) -> Result<Vec<(String, Option<String>)>, String> {
        let mut values = Vec::new();
        let mut name = vec![0u16; MAX_VALUE_NAME];
        let mut data = vec![0u8; 1024];
        let mut index = 0u32;

        loop {
            let mut name_len = name.len() as u32;
            let mut data_len = data.len() as u32;
            let mut kind = REG_VALUE_TYPE::default();
            // SAFETY: buffers are sized by the lengths passed alongside them;
            // the API writes at most that many units.
            let status = unsafe {
                RegEnumValueW(
                    self.0,
                    index,
                    Some(PWSTR(name.as_mut_ptr())),
                    &mut name_len,
                    None,
                    Some(&mut kind as *mut REG_VALUE_TYPE),
                    Some(data.as_mut_ptr()),
                    Some(&mut data_len as *mut u32),
                )
            };

            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if status == ERROR_MORE_DATA {
                data.resize(data_len as usize, 0);
                continue;
            }
            if status.is_err() {
                return Err(format!("could not enumerate registry values: {status:?}"));
            }

            let value_name = String::from_utf16_lossy(&name[..name_len as usize]);
            let value_data = (kind == REG_SZ || kind == REG_EXPAND_SZ)
                .then(|| decode_string(&data[..data_len as usize]));
            values.push((value_name, value_data));
            index += 1;
        }

        Ok(values)
    }
}

impl Drop for LayersKey {
    fn drop(&mut self) {
        // SAFETY: RegCloseKey is safe to call on any valid HKEY.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Decodes REG_SZ bytes (UTF-16LE, optionally NUL-terminated).
fn decode_string(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
    String::from_utf16_lossy(&units[..end])
}

/// NUL-terminated UTF-16 copy of an OS string.
fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}
