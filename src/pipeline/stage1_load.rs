use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::input::{
    AssignmentDataset, GENE_SCATTER_FILE, GeneScatterData, InputError, PayloadCache,
    RegionPayload, WITH_THETA_FILE, WITHOUT_THETA_FILE, load_optional, load_region_payload,
};
use crate::model::context::DashboardContext;

/// Makes sure the active region's payload is fully loaded before any other
/// stage sees it.
pub fn run_stage1(
    ctx: &DashboardContext,
    cache: &mut PayloadCache,
) -> Result<Arc<RegionPayload>, InputError> {
    let data_dir = ctx.data_dir.clone();
    cache.get_or_load(ctx.region, |region| load_region_payload(&data_dir, region))
}

/// Inputs shared by all regions that only feed the comparison and gene
/// scatter views.
#[derive(Debug, Clone, Default)]
pub struct SideInputs {
    pub without_theta: Option<AssignmentDataset>,
    pub with_theta: Option<AssignmentDataset>,
    pub gene_scatter: Option<GeneScatterData>,
    /// Side inputs that were present but could not be read.
    pub failures: Vec<String>,
}

/// A side input that fails to load leaves its view without data instead of
/// aborting the run.
pub fn load_side_inputs(data_dir: &Path) -> SideInputs {
    let mut failures = Vec::new();
    let without_theta = load_or_note(data_dir, WITHOUT_THETA_FILE, &mut failures);
    let with_theta = load_or_note(data_dir, WITH_THETA_FILE, &mut failures);
    let gene_scatter = load_or_note(data_dir, GENE_SCATTER_FILE, &mut failures);
    SideInputs {
        without_theta,
        with_theta,
        gene_scatter,
        failures,
    }
}

fn load_or_note<T: DeserializeOwned>(
    data_dir: &Path,
    name: &str,
    failures: &mut Vec<String>,
) -> Option<T> {
    match load_optional(data_dir, name) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(file = name, error = %e, "side input skipped");
            failures.push(format!("{name}: {e}"));
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_load.rs"]
mod tests;
