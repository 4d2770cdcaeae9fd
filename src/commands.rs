//! One-shot subcommand handlers.
//!
//! Each handler renders either human status lines or a single JSON envelope
//! into the given writer.

use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;

use crate::config::{self, PortalConfig};
use crate::output::{write_success, OutputMode};
use crate::storage::StudentStore;
use crate::ui::{self, students_table, Icons, Theme};

pub fn run_add(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    store: &StudentStore,
    name: &str,
    age: i64,
) -> anyhow::Result<()> {
    let id = store.add(name, age)?;

    if mode.is_human() {
        ui::success(out, theme, &format!("Student saved successfully. (ID: {})", id))?;
    } else {
        write_success(out, "add", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_list(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    store: &StudentStore,
) -> anyhow::Result<()> {
    let students = store.list_all()?;

    if !mode.is_human() {
        return write_success(out, "list", &students);
    }

    if students.is_empty() {
        ui::warn(out, theme, "No students found.")?;
    } else {
        writeln!(out, "{}", students_table(&students))?;
    }
    Ok(())
}

pub fn run_search(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    store: &StudentStore,
    name: &str,
) -> anyhow::Result<()> {
    let found = store.search_by_name(name)?;

    if !mode.is_human() {
        return write_success(out, "search", &found);
    }

    match found {
        Some(student) => {
            ui::success(out, theme, "Student found:")?;
            ui::record_line(out, theme, &student)?;
        }
        None => ui::warn(out, theme, "No student found with that name.")?,
    }
    Ok(())
}

pub fn run_delete(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    store: &StudentStore,
    name: &str,
) -> anyhow::Result<()> {
    let deleted = store.delete_by_name(name)?;

    if !mode.is_human() {
        return write_success(out, "delete", serde_json::json!({ "deleted": deleted }));
    }

    if deleted == 0 {
        ui::warn(out, theme, "No student found with that name.")?;
    } else {
        ui::success(out, theme, &format!("Deleted {} student(s).", deleted))?;
    }
    Ok(())
}

pub fn run_stats(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    store: &StudentStore,
    database: &Path,
) -> anyhow::Result<()> {
    let count = store.count()?;

    if !mode.is_human() {
        return write_success(
            out,
            "stats",
            serde_json::json!({ "database": database.display().to_string(), "students": count }),
        );
    }

    writeln!(out, "{} {}", Icons::STATS, "Student Portal Statistics".style(theme.title.clone()))?;
    ui::info(out, theme, "Database", &database.display().to_string())?;
    ui::info(out, theme, "Students", &count.to_string())?;
    Ok(())
}

/// Write a config file pointing at `database`
pub fn run_init(
    out: &mut impl Write,
    theme: &Theme,
    mode: OutputMode,
    config_path: &Path,
    database: &Path,
    force: bool,
) -> anyhow::Result<()> {
    let config = PortalConfig {
        database: Some(database.display().to_string()),
        ..Default::default()
    };
    config::write_config(config_path, &config, force)?;

    if mode.is_human() {
        ui::success(out, theme, &format!("Wrote config to {}", config_path.display()))?;
        ui::info(out, theme, &format!("{} Database", Icons::DATABASE), &database.display().to_string())?;
    } else {
        write_success(
            out,
            "init",
            serde_json::json!({
                "config": config_path.display().to_string(),
                "database": database.display().to_string(),
            }),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    fn seeded() -> StudentStore {
        let store = StudentStore::open_in_memory().unwrap();
        store.add("Alice", 20).unwrap();
        store.add("Bob", 22).unwrap();
        store
    }

    fn json(buf: Vec<u8>) -> serde_json::Value {
        serde_json::from_slice(&buf).unwrap()
    }

    #[test]
    fn test_add_json() {
        let store = seeded();
        let mut buf = Vec::new();
        run_add(&mut buf, &Theme::plain(), OutputMode::Json, &store, "Cy", 9).unwrap();

        assert_eq!(
            json(buf),
            serde_json::json!({"ok": true, "command": "add", "data": {"id": 3}})
        );
    }

    #[test]
    fn test_add_rejects_invalid_age() {
        let store = seeded();
        let mut buf = Vec::new();
        let err = run_add(&mut buf, &Theme::plain(), OutputMode::Human, &store, "Cy", 400).unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::InvalidInput(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_list_json_in_insertion_order() {
        let store = seeded();
        let mut buf = Vec::new();
        run_list(&mut buf, &Theme::plain(), OutputMode::Json, &store).unwrap();

        assert_eq!(
            json(buf)["data"],
            serde_json::json!([
                {"id": 1, "name": "Alice", "age": 20},
                {"id": 2, "name": "Bob", "age": 22}
            ])
        );
    }

    #[test]
    fn test_list_human_empty() {
        let store = StudentStore::open_in_memory().unwrap();
        let mut buf = Vec::new();
        run_list(&mut buf, &Theme::plain(), OutputMode::Human, &store).unwrap();

        assert!(String::from_utf8(buf).unwrap().contains("No students found."));
    }

    #[test]
    fn test_list_human_table() {
        let store = seeded();
        let mut buf = Vec::new();
        run_list(&mut buf, &Theme::plain(), OutputMode::Human, &store).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Alice"));
        assert!(text.contains("Bob"));
    }

    #[test]
    fn test_search_json_miss_is_null() {
        let store = seeded();
        let mut buf = Vec::new();
        run_search(&mut buf, &Theme::plain(), OutputMode::Json, &store, "Zoe").unwrap();

        assert_eq!(json(buf)["data"], serde_json::Value::Null);
    }

    #[test]
    fn test_search_human_hit() {
        let store = seeded();
        let mut buf = Vec::new();
        run_search(&mut buf, &Theme::plain(), OutputMode::Human, &store, "Bob").unwrap();

        assert!(String::from_utf8(buf).unwrap().contains("ID: 2 | Name: Bob | Age: 22"));
    }

    #[test]
    fn test_padded_name_add_search_delete() {
        let store = seeded();
        let theme = Theme::plain();
        run_add(&mut Vec::new(), &theme, OutputMode::Json, &store, " Ann ", 20).unwrap();

        let mut buf = Vec::new();
        run_search(&mut buf, &theme, OutputMode::Json, &store, " Ann ").unwrap();
        assert_eq!(json(buf)["data"], serde_json::json!({"id": 3, "name": " Ann ", "age": 20}));

        let mut buf = Vec::new();
        run_delete(&mut buf, &theme, OutputMode::Json, &store, " Ann ").unwrap();
        assert_eq!(json(buf)["data"], serde_json::json!({"deleted": 1}));
    }

    #[test]
    fn test_delete_json_count() {
        let store = seeded();
        store.add("Alice", 30).unwrap();
        let mut buf = Vec::new();
        run_delete(&mut buf, &Theme::plain(), OutputMode::Json, &store, "Alice").unwrap();

        assert_eq!(json(buf)["data"], serde_json::json!({"deleted": 2}));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_stats_human() {
        let store = seeded();
        let mut buf = Vec::new();
        run_stats(&mut buf, &Theme::plain(), OutputMode::Human, &store, Path::new("students.db")).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Database: students.db"));
        assert!(text.contains("Students: 2"));
    }

    #[test]
    fn test_uninitialized_store_surfaces_error() {
        let store = StudentStore::new();
        let mut buf = Vec::new();
        let err = run_list(&mut buf, &Theme::plain(), OutputMode::Human, &store).unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotInitialized)));
    }

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("student-portal.toml");
        let mut buf = Vec::new();

        run_init(&mut buf, &Theme::plain(), OutputMode::Human, &config_path, Path::new("data/s.db"), false).unwrap();
        let loaded = config::load_config(Some(&config_path)).unwrap().unwrap();
        assert_eq!(loaded.database.as_deref(), Some("data/s.db"));

        let mut buf = Vec::new();
        assert!(run_init(&mut buf, &Theme::plain(), OutputMode::Human, &config_path, Path::new("x.db"), false).is_err());
    }
}
