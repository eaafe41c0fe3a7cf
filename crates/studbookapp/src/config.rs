//! # Configuration
//!
//! Studbook configuration is managed by [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `STUDBOOK_DATA_FILE`, `STUDBOOK_UPCOMING_DAYS`,
//!    `STUDBOOK_DEFAULT_SORT`.
//! 2. **Config file**: `studbook.toml` in the OS config directory (via the
//!    `directories` crate), or an explicit path.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! A missing config file is not an error; defaults apply.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `<data dir>/records.json` | Where records are saved |
//! | `upcoming_days` | `7` | Window for upcoming records |
//! | `default_sort` | none (store order) | Sort key for listings |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StudbookError};
use crate::sort::SortKey;
use crate::stats::DEFAULT_UPCOMING_DAYS;
use crate::store::fs_backend::DEFAULT_FILE_NAME;

pub const CONFIG_FILE_NAME: &str = "studbook.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudbookConfig {
    /// Path of the JSON file records are saved to.
    #[config(env = "STUDBOOK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Days ahead that count as "upcoming".
    #[config(default = 7, env = "STUDBOOK_UPCOMING_DAYS")]
    pub upcoming_days: u32,

    /// Sort key applied to listings when none is given.
    #[config(env = "STUDBOOK_DEFAULT_SORT")]
    pub default_sort: Option<SortKey>,
}

impl Default for StudbookConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            default_sort: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "studbook", "studbook")
}

/// `studbook.toml` in the platform config directory, if one can be determined.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// `records.json` in the platform data directory, if one can be determined.
pub fn default_data_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(DEFAULT_FILE_NAME))
}

impl StudbookConfig {
    /// Load from env and `path` (or the default config file when `None`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        let file = path.map(Path::to_path_buf).or_else(default_config_file);
        if let Some(file) = file {
            log::debug!("config: reading {}", file.display());
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    /// The configured data file, falling back to the platform data directory.
    pub fn data_file(&self) -> Result<PathBuf> {
        self.data_file
            .clone()
            .or_else(default_data_file)
            .ok_or_else(|| {
                StudbookError::Store("Could not determine a data directory".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StudbookConfig::default();
        assert_eq!(config.upcoming_days, 7);
        assert_eq!(config.data_file, None);
        assert_eq!(config.default_sort, None);
    }

    #[test]
    fn test_explicit_data_file_wins() {
        let config = StudbookConfig {
            data_file: Some(PathBuf::from("/tmp/stud/records.json")),
            ..Default::default()
        };
        assert_eq!(
            config.data_file().unwrap(),
            PathBuf::from("/tmp/stud/records.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "upcoming_days = 14\ndefault_sort = \"priority\"\ndata_file = \"/srv/stud.json\"\n",
        )
        .unwrap();

        let config = StudbookConfig::load(Some(&path)).unwrap();
        assert_eq!(config.upcoming_days, 14);
        assert_eq!(config.default_sort, Some(SortKey::Priority));
        assert_eq!(config.data_file, Some(PathBuf::from("/srv/stud.json")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = StudbookConfig::load(Some(&path)).unwrap();
        assert_eq!(config.upcoming_days, 7);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "upcoming_days = \"soon\"\n").unwrap();
        assert!(matches!(
            StudbookConfig::load(Some(&path)),
            Err(StudbookError::Config(_))
        ));
    }
}
