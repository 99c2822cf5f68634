use elevator_core::{ElevationEntry, ElevationStore};

use super::{fail, open_store};

/// Prints the programs marked to run as administrator.
pub fn execute(json: bool) {
    let store = open_store().unwrap_or_else(|e| fail(&e));
    let entries = store.list_current().unwrap_or_else(|e| fail(&e));

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(&e.to_string()),
        }
        return;
    }

    print!("{}", render_table(&entries));
}

fn render_table(entries: &[ElevationEntry]) -> String {
    if entries.is_empty() {
        return "No programs are marked to run as administrator.\n".to_string();
    }

    let width = entries
        .iter()
        .map(|e| e.display_name.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            entry.display_name,
            entry.full_path.display()
        ));
    }
    out.push_str(&format!("\n{} program(s)\n", entries.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_paths() {
        // Arrange
        let entries = [
            ElevationEntry::new(r"C:\a.exe"),
            ElevationEntry::new(r"C:\tools\long.exe"),
        ];

        // Act
        let table = render_table(&entries);

        // Assert
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], r"  a.exe     C:\a.exe");
        assert_eq!(lines[1], r"  long.exe  C:\tools\long.exe");
        assert!(table.ends_with("2 program(s)\n"));
    }

    #[test]
    fn empty_list_says_so() {
        assert!(render_table(&[]).starts_with("No programs"));
    }

    #[test]
    fn json_uses_field_names() {
        // Arrange
        let entries = [ElevationEntry::new(r"C:\a.exe")];

        // Act
        let json = serde_json::to_value(&entries).unwrap();

        // Assert
        assert_eq!(json[0]["display_name"], "a.exe");
        assert_eq!(json[0]["full_path"], r"C:\a.exe");
    }
}
