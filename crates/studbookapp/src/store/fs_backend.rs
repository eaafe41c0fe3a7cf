use super::backend::SnapshotBackend;
use crate::error::{Result, StudbookError};
use crate::model::Record;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_FILE_NAME: &str = "records.json";

/// Snapshot backend storing all records in a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A backend using `records.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_FILE_NAME))
    }

    fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !parent.exists() {
            fs::create_dir_all(&parent).map_err(StudbookError::Io)?;
        }
        Ok(parent)
    }
}

impl SnapshotBackend for FsBackend {
    fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            debug!("snapshot: {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(StudbookError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(StudbookError::Serialization)?;
        debug!(
            "snapshot: loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let parent = self.ensure_parent()?;
        let content = serde_json::to_string_pretty(records).map_err(StudbookError::Serialization)?;

        let tmp_file = parent.join(format!(".records-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, &self.path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(StudbookError::Io(err));
        }

        debug!(
            "snapshot: saved {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
