use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::context::CellFilter;
use crate::model::{Region, null_as_default};

/// One cell-type assignment run over every region: the run without theta or
/// the run with it. Only the with-theta run carries transitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentDataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub regions: BTreeMap<String, RegionCounts>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transitions: BTreeMap<String, RegionTransitions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_type_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub high_gene_count: Option<CountSubset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountSubset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_type_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionTransitions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub all: Vec<Transition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub high_gene: Vec<Transition>,
}

/// Cells moving from one coarse class (without theta) to another (with theta).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub count: u64,
}

impl AssignmentDataset {
    /// Class counts for `region` under `filter`; `None` when the run has no
    /// such region or no high-gene subset.
    pub fn counts(&self, region: Region, filter: CellFilter) -> Option<&BTreeMap<String, u64>> {
        let counts = self.regions.get(region.key())?;
        match filter {
            CellFilter::All => Some(&counts.cell_type_counts),
            CellFilter::HighGene => counts.high_gene_count.as_ref().map(|s| &s.cell_type_counts),
        }
    }

    pub fn transitions(&self, region: Region, filter: CellFilter) -> Option<&[Transition]> {
        let t = self.transitions.get(region.key())?;
        Some(match filter {
            CellFilter::All => &t.all,
            CellFilter::HighGene => &t.high_gene,
        })
    }
}
