pub mod check;
pub mod demo;
pub mod roles;
pub mod view;

use anyhow::{Context, Result};
use crestgate_core::resource::Resource;
use std::path::Path;

/// Load a JSON array of records from disk.
pub fn load_records(path: &Path) -> Result<Vec<Resource>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records file {}", path.display()))?;
    let records: Vec<Resource> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse records file {}", path.display()))?;
    Ok(records)
}
