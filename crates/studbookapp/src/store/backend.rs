use crate::error::Result;
use crate::model::Record;
use std::path::PathBuf;

/// Abstract interface for snapshot I/O.
/// This trait handles the "how" of persistence (filesystem vs memory),
/// while [`super::RecordStore`] handles the "what" (the records themselves).
pub trait SnapshotBackend {
    /// Load every saved record, in saved order.
    /// A backend with nothing saved yet returns an empty list.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replace the saved records with `records`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, records: &[Record]) -> Result<()>;

    /// Where the snapshot lives. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
