use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod assignments;
pub mod cache;
pub mod gene_scatter;
pub mod payload;

pub use assignments::{AssignmentDataset, Transition};
pub use cache::{PayloadCache, read_json_file, read_payload_file};
pub use gene_scatter::{GeneScatterData, ScatterCell, ScatterGroup};
pub use payload::{Figure, RegionPayload, Selection};

use crate::model::Region;

pub const WITHOUT_THETA_FILE: &str = "without_theta.json";
pub const WITH_THETA_FILE: &str = "with_theta.json";
pub const GENE_SCATTER_FILE: &str = "gene_scatter_data.json";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn payload_candidates(region: Region) -> [String; 2] {
    [
        format!("heatmap_payloads_{}.json", region.key()),
        format!("heatmap_payloads_{}.json.gz", region.key()),
    ]
}

pub fn find_payload_path(data_dir: &Path, region: Region) -> Result<PathBuf, InputError> {
    for name in payload_candidates(region) {
        let path = data_dir.join(&name);
        if path.exists() {
            return Ok(path);
        }
    }
    Err(InputError::MissingInput(format!(
        "no payload for region {} in {} (expected heatmap_payloads_{}.json[.gz])",
        region,
        data_dir.display(),
        region.key()
    )))
}

pub fn load_region_payload(data_dir: &Path, region: Region) -> Result<RegionPayload, InputError> {
    let path = find_payload_path(data_dir, region)?;
    tracing::info!(region = %region, path = %path.display(), "loading region payload");
    let payload = read_payload_file(&path)?;
    tracing::info!(
        cells = payload.cells.len(),
        genes = payload.genes.len(),
        selections = payload.selections.len(),
        "payload loaded"
    );
    Ok(payload)
}

/// Loads a side input that a run can do without. `name` is tried as is and
/// then with `.gz`; absence is `Ok(None)`.
pub fn load_optional<T: DeserializeOwned>(
    data_dir: &Path,
    name: &str,
) -> Result<Option<T>, InputError> {
    for candidate in [name.to_string(), format!("{name}.gz")] {
        let path = data_dir.join(&candidate);
        if path.exists() {
            tracing::info!(path = %path.display(), "loading side input");
            return read_json_file(&path).map(Some);
        }
    }
    tracing::debug!(file = name, dir = %data_dir.display(), "side input not present");
    Ok(None)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
