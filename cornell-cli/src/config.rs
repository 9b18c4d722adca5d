//! Optional TOML configuration, `~/.cornell/config.toml` by default.
//!
//! ```toml
//! export_dir = "/home/me/notes"
//! bulk_mode = "strict"
//! log_level = "debug"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use cornell_core::BulkMode;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where `e`/`m` exports are written; defaults to the cornell directory
    pub export_dir: Option<PathBuf>,
    pub bulk_mode: BulkMode,
    pub log_level: Option<String>,
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
            export_dir = "/tmp/notes"
            bulk_mode = "strict"
            log_level = "warn"
            "#,
        )
        .unwrap();

        assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/notes")));
        assert_eq!(config.bulk_mode, BulkMode::Strict);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().bulk_mode, BulkMode::Lenient);
    }

    #[test]
    fn test_rejects_unknown_keys_and_modes() {
        assert!(Config::from_toml("bulk_mode = \"loose\"").is_err());
        assert!(Config::from_toml("exportdir = \"/tmp\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "bulk_mode = [").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
