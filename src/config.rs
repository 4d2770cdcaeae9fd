use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shell::ShellOptions;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PortalConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_screen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<bool>,
}

impl PortalConfig {
    pub fn shell_options(&self) -> ShellOptions {
        let defaults = ShellOptions::default();
        ShellOptions {
            clear_screen: self.clear_screen.unwrap_or(defaults.clear_screen),
            pause: self.pause.unwrap_or(defaults.pause),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("student-portal.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("students.db")
}

/// Pick the database path: explicit flag, then config file, then the default.
pub fn resolve_database_path(flag: Option<&Path>, config: Option<&PortalConfig>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }

    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(default_database_path)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PortalConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PortalConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PortalConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student-portal.toml");
        let config = PortalConfig {
            database: Some("data/students.db".to_string()),
            clear_screen: Some(false),
            pause: None,
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config));
    }

    #[test]
    fn test_write_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student-portal.toml");
        let config = PortalConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        assert!(write_config(&path, &config, true).is_ok());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student-portal.toml");
        std::fs::write(&path, "database = 42\n").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_database_path_precedence() {
        let config = PortalConfig {
            database: Some("from-config.db".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_database_path(Some(Path::new("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(resolve_database_path(None, Some(&config)), PathBuf::from("from-config.db"));
        assert_eq!(resolve_database_path(None, None), default_database_path());
        assert_eq!(
            resolve_database_path(None, Some(&PortalConfig::default())),
            default_database_path()
        );
    }

    #[test]
    fn test_shell_options_fall_back_to_defaults() {
        let config = PortalConfig {
            pause: Some(false),
            ..Default::default()
        };
        let options = config.shell_options();
        assert!(options.clear_screen);
        assert!(!options.pause);
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("students.db");

        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
        ensure_db_dir(Path::new("students.db")).unwrap();
    }
}
