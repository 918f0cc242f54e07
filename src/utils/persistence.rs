use std::{fs, path::Path};

use crate::{core::source::FinanceSnapshot, errors::SnapshotError};

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &FinanceSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a finance snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<FinanceSnapshot, SnapshotError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
