use crate::core::fence_format::StoredLocation;
use crate::domain::model::GeoFence;
use crate::domain::ports::FenceSource;
use crate::utils::error::{PunchError, Result};
use serde_json::Value;
use std::path::PathBuf;

/// Reads a JSON array of stored locations on every load, so admin edits apply
/// to the next punch. A malformed location is skipped with a warning; the
/// rest still load.
#[derive(Debug, Clone)]
pub struct JsonFenceFile {
    path: PathBuf,
}

impl JsonFenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FenceSource for JsonFenceFile {
    async fn load_fences(&self) -> Result<Vec<GeoFence>> {
        let data = tokio::fs::read(&self.path).await?;
        let rows: Vec<Value> = serde_json::from_slice(&data)?;

        let mut fences = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let name = row
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("#{}", index));

            let fence = serde_json::from_value::<StoredLocation>(row)
                .map_err(PunchError::from)
                .and_then(StoredLocation::into_fence);
            match fence {
                Ok(fence) => fences.push(fence),
                Err(e) => tracing::warn!("Skipping location '{}': {}", name, e),
            }
        }

        tracing::debug!(
            "Loaded {} geo-fences from {}",
            fences.len(),
            self.path.display()
        );
        Ok(fences)
    }
}
