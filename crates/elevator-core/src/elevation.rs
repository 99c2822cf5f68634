//! The list of programs marked to always run elevated.
//!
//! Storage lives behind [`ElevationStore`]; the registry-backed store is
//! in the platform crate. [`ElevationList`] is the window's view of the
//! store: the current entries plus the user's selection.

use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Compatibility flag that makes Windows elevate a program on launch.
pub const RUN_AS_ADMIN: &str = "RUNASADMIN";

/// Per-user compatibility layers key, relative to `HKEY_CURRENT_USER`.
pub const LAYERS_KEY: &str = r"Software\Microsoft\Windows NT\CurrentVersion\AppCompatFlags\Layers";

/// A program on the elevation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElevationEntry {
    /// File name shown in the list.
    pub display_name: String,
    /// Full path used as the registry value name.
    pub full_path: PathBuf,
}

impl ElevationEntry {
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        let full_path = full_path.into();
        let display_name = display_name(&full_path);
        Self {
            display_name,
            full_path,
        }
    }
}

/// Builds an entry from a registry value if its data carries the flag.
///
/// Layer strings can combine several flags (`"~ RUNASADMIN WIN8RTM"`),
/// so a substring match is used.
pub fn entry_from_value(name: &str, data: Option<&str>) -> Option<ElevationEntry> {
    let data = data?;
    if !data.contains(RUN_AS_ADMIN) {
        return None;
    }
    Some(ElevationEntry::new(name))
}

/// Whether two registry value names refer to the same program. Value
/// names, like Windows paths, ignore case.
pub fn same_path(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

/// The entry stored under `path`, matched the way the registry matches
/// value names.
pub fn find_entry<'a>(entries: &'a [ElevationEntry], path: &Path) -> Option<&'a ElevationEntry> {
    entries.iter().find(|entry| same_path(&entry.full_path, path))
}

/// File name of a path. Handles `\` separators on every platform so
/// registry paths display the same everywhere.
fn display_name(path: &Path) -> String {
    let s = path.to_string_lossy();
    s.rsplit(['\\', '/'])
        .find(|part| !part.is_empty())
        .unwrap_or(s.as_ref())
        .to_string()
}

/// Storage for the elevation list.
pub trait ElevationStore {
    /// Marks every path to run elevated.
    fn add_paths(&mut self, paths: &[PathBuf]) -> Result<(), String>;

    /// Removes the mark from every path. Unknown paths are not an error.
    fn remove_paths(&mut self, paths: &[PathBuf]) -> Result<(), String>;

    /// Lists the currently marked programs in storage order.
    fn list_current(&self) -> Result<Vec<ElevationEntry>, String>;
}

/// In-memory store, in insertion order. Names ignore case like registry
/// value names.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Vec<(String, String)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw value, for seeding entries with other flags.
    pub fn insert_raw(&mut self, name: &str, data: &str) {
        match self
            .values
            .iter_mut()
            .find(|(n, _)| same_path(Path::new(n), Path::new(name)))
        {
            Some((_, d)) => *d = data.to_string(),
            None => self.values.push((name.to_string(), data.to_string())),
        }
    }
}

impl ElevationStore for MemoryStore {
    fn add_paths(&mut self, paths: &[PathBuf]) -> Result<(), String> {
        for path in paths {
            self.insert_raw(&path.to_string_lossy(), RUN_AS_ADMIN);
        }
        Ok(())
    }

    fn remove_paths(&mut self, paths: &[PathBuf]) -> Result<(), String> {
        self.values
            .retain(|(name, _)| !paths.iter().any(|p| same_path(p, Path::new(name))));
        Ok(())
    }

    fn list_current(&self) -> Result<Vec<ElevationEntry>, String> {
        Ok(self
            .values
            .iter()
            .filter_map(|(name, data)| entry_from_value(name, Some(data.as_str())))
            .collect())
    }
}

/// Entries shown in the window plus the current selection.
///
/// The list area shows a window of consecutive entries starting at the
/// scroll offset. Indices are always entry indices, never row slots.
#[derive(Debug, Default)]
pub struct ElevationList {
    entries: Vec<ElevationEntry>,
    selected: BTreeSet<usize>,
    scroll: usize,
}

impl ElevationList {
    pub fn entries(&self) -> &[ElevationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Reloads from `store` and selects the first entry, if any.
    ///
    /// The scroll offset is kept but never points past the last entry.
    pub fn reload(&mut self, store: &impl ElevationStore) -> Result<(), String> {
        self.entries = store.list_current()?;
        self.selected.clear();
        if !self.entries.is_empty() {
            self.selected.insert(0);
        }
        self.scroll = self.scroll.min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    /// Entries shown by a list area `visible` rows tall.
    ///
    /// When the area grows past the end of the list the range slides up
    /// so the last row is never left empty while entries are hidden above.
    pub fn visible_range(&self, visible: usize) -> Range<usize> {
        let first = self.scroll.min(self.max_scroll(visible));
        first..(first + visible).min(self.entries.len())
    }

    /// Scrolls by `rows` (negative is up), clamped to the list.
    pub fn scroll_by(&mut self, rows: isize, visible: usize) {
        let first = self.visible_range(visible).start;
        self.scroll = first
            .saturating_add_signed(rows)
            .min(self.max_scroll(visible));
    }

    fn max_scroll(&self, visible: usize) -> usize {
        self.entries.len().saturating_sub(visible)
    }

    /// Replaces the selection with `index`.
    pub fn select_only(&mut self, index: usize) {
        self.selected.clear();
        if index < self.entries.len() {
            self.selected.insert(index);
        }
    }

    /// Adds `index` to the selection or removes it if already selected.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Full paths of the selected entries, in list order.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.selected
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .map(|e| e.full_path.clone())
            .collect()
    }

    /// Full path shown in the label: the first selected entry, or empty.
    pub fn selected_label(&self) -> String {
        self.selected
            .first()
            .and_then(|&i| self.entries.get(i))
            .map(|e| e.full_path.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Splits a multi-select file dialog buffer into full paths.
///
/// The buffer is a sequence of NUL-terminated strings ended by an empty
/// string. With one file the only string is its full path; with several
/// the first string is the directory and the rest are file names.
pub fn split_multiselect(buffer: &[u16]) -> Vec<PathBuf> {
    let parts: Vec<String> = buffer
        .split(|&c| c == 0)
        .take_while(|part| !part.is_empty())
        .map(String::from_utf16_lossy)
        .collect();

    match parts.as_slice() {
        [] => Vec::new(),
        [single] => vec![PathBuf::from(single)],
        [dir, files @ ..] => files
            .iter()
            .map(|f| PathBuf::from(format!("{}\\{f}", dir.trim_end_matches('\\'))))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn only_values_with_the_flag_are_entries() {
        // Assert
        assert!(entry_from_value(r"C:\a.exe", Some("RUNASADMIN")).is_some());
        assert!(entry_from_value(r"C:\b.exe", Some("~ HIGHDPIAWARE RUNASADMIN")).is_some());
        assert!(entry_from_value(r"C:\c.exe", Some("~ WIN7RTM")).is_none());
        assert!(entry_from_value(r"C:\d.exe", None).is_none());
    }

    #[test]
    fn display_name_is_the_file_name() {
        // Act
        let entry = ElevationEntry::new(r"C:\Program Files\Tool\tool.exe");

        // Assert
        assert_eq!(entry.display_name, "tool.exe");
        assert_eq!(entry.full_path, PathBuf::from(r"C:\Program Files\Tool\tool.exe"));
    }

    #[test]
    fn memory_store_filters_and_keeps_order() {
        // Arrange
        let mut store = MemoryStore::new();
        store.insert_raw(r"C:\legacy.exe", "~ WIN7RTM");
        store
            .add_paths(&[PathBuf::from(r"C:\b.exe"), PathBuf::from(r"C:\a.exe")])
            .unwrap();

        // Act
        let names: Vec<String> = store
            .list_current()
            .unwrap()
            .into_iter()
            .map(|e| e.display_name)
            .collect();

        // Assert
        assert_eq!(names, ["b.exe", "a.exe"]);
    }

    #[test]
    fn removing_unknown_paths_is_not_an_error() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add_paths(&[PathBuf::from(r"C:\a.exe")]).unwrap();

        // Act
        let result = store.remove_paths(&[PathBuf::from(r"C:\missing.exe")]);

        // Assert
        assert!(result.is_ok());
        assert_eq!(store.list_current().unwrap().len(), 1);
    }

    #[test]
    fn lookup_ignores_case() {
        // Arrange
        let entries = vec![ElevationEntry::new(r"C:\Tools\a.exe")];

        // Act
        let found = find_entry(&entries, Path::new(r"c:\tools\A.EXE"));

        // Assert
        assert_eq!(found.map(|e| e.full_path.as_path()), Some(Path::new(r"C:\Tools\a.exe")));
        assert!(find_entry(&entries, Path::new(r"C:\Tools\b.exe")).is_none());
    }

    #[test]
    fn memory_store_names_ignore_case() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add_paths(&[PathBuf::from(r"C:\Tools\a.exe")]).unwrap();

        // Act
        store.add_paths(&[PathBuf::from(r"c:\tools\a.exe")]).unwrap();
        let after_add = store.list_current().unwrap().len();
        store.remove_paths(&[PathBuf::from(r"C:\TOOLS\A.EXE")]).unwrap();

        // Assert
        assert_eq!(after_add, 1);
        assert!(store.list_current().unwrap().is_empty());
    }

    #[test]
    fn reload_selects_first_entry() {
        // Arrange
        let mut store = MemoryStore::new();
        store
            .add_paths(&[PathBuf::from(r"C:\a.exe"), PathBuf::from(r"C:\b.exe")])
            .unwrap();
        let mut list = ElevationList::default();

        // Act
        list.reload(&store).unwrap();

        // Assert
        assert_eq!(list.len(), 2);
        assert!(list.is_selected(0));
        assert_eq!(list.selected_label(), r"C:\a.exe");
    }

    #[test]
    fn reload_of_empty_store_clears_selection() {
        // Arrange
        let mut store = MemoryStore::new();
        store.add_paths(&[PathBuf::from(r"C:\a.exe")]).unwrap();
        let mut list = ElevationList::default();
        list.reload(&store).unwrap();
        store.remove_paths(&[PathBuf::from(r"C:\a.exe")]).unwrap();

        // Act
        list.reload(&store).unwrap();

        // Assert
        assert!(list.is_empty());
        assert!(list.selected_paths().is_empty());
        assert_eq!(list.selected_label(), "");
    }

    #[test]
    fn toggle_builds_multi_selection() {
        // Arrange
        let mut store = MemoryStore::new();
        store
            .add_paths(&[
                PathBuf::from(r"C:\a.exe"),
                PathBuf::from(r"C:\b.exe"),
                PathBuf::from(r"C:\c.exe"),
            ])
            .unwrap();
        let mut list = ElevationList::default();
        list.reload(&store).unwrap();

        // Act
        list.toggle(2);
        list.toggle(0);
        list.toggle(7);

        // Assert
        assert_eq!(list.selected_paths(), [PathBuf::from(r"C:\c.exe")]);
    }

    #[test]
    fn multiselect_buffer_with_one_file_is_its_path() {
        // Arrange
        let mut buf = wide(r"C:\tools\a.exe");
        buf.extend([0, 0]);

        // Act / Assert
        assert_eq!(split_multiselect(&buf), [PathBuf::from(r"C:\tools\a.exe")]);
    }

    #[test]
    fn multiselect_buffer_joins_directory_and_files() {
        // Arrange
        let mut buf = wide(r"C:\tools");
        buf.push(0);
        buf.extend(wide("a.exe"));
        buf.push(0);
        buf.extend(wide("b.exe"));
        buf.extend([0, 0]);

        // Act / Assert
        assert_eq!(
            split_multiselect(&buf),
            [PathBuf::from(r"C:\tools\a.exe"), PathBuf::from(r"C:\tools\b.exe")]
        );
    }

    #[test]
    fn empty_multiselect_buffer_yields_nothing() {
        // Assert
        assert!(split_multiselect(&[0, 0]).is_empty());
        assert!(split_multiselect(&[]).is_empty());
    }

    fn numbered(count: usize) -> (ElevationList, MemoryStore) {
        let mut store = MemoryStore::new();
        let paths: Vec<PathBuf> = (0..count)
            .map(|i| PathBuf::from(format!(r"C:\tools\{i:02}.exe")))
            .collect();
        store.add_paths(&paths).unwrap();
        let mut list = ElevationList::default();
        list.reload(&store).unwrap();
        (list, store)
    }

    #[test]
    fn scrolling_reaches_the_last_entry() {
        // Arrange
        let (mut list, _) = numbered(40);
        assert_eq!(list.visible_range(13), 0..13);

        // Act
        list.scroll_by(100, 13);

        // Assert
        assert_eq!(list.visible_range(13), 27..40);
    }

    #[test]
    fn scrolling_up_stops_at_the_top() {
        // Arrange
        let (mut list, _) = numbered(40);
        list.scroll_by(5, 13);

        // Act
        list.scroll_by(-3, 13);
        let middle = list.visible_range(13);
        list.scroll_by(-10, 13);

        // Assert
        assert_eq!(middle, 2..15);
        assert_eq!(list.visible_range(13), 0..13);
    }

    #[test]
    fn short_list_does_not_scroll() {
        // Arrange
        let (mut list, _) = numbered(3);

        // Act
        list.scroll_by(2, 13);

        // Assert
        assert_eq!(list.visible_range(13), 0..3);
    }

    #[test]
    fn growing_viewport_slides_range_up() {
        // Arrange
        let (mut list, _) = numbered(20);
        list.scroll_by(10, 5);

        // Act
        let range = list.visible_range(15);

        // Assert
        assert_eq!(range, 5..20);
    }

    #[test]
    fn reload_clamps_scroll_to_remaining_entries() {
        // Arrange
        let (mut list, mut store) = numbered(40);
        list.scroll_by(100, 13);
        let keep: Vec<PathBuf> = (5..40)
            .map(|i| PathBuf::from(format!(r"C:\tools\{i:02}.exe")))
            .collect();
        store.remove_paths(&keep).unwrap();

        // Act
        list.reload(&store).unwrap();

        // Assert
        assert_eq!(list.visible_range(13), 0..5);
        assert_eq!(list.visible_range(2), 3..5);
    }
}
