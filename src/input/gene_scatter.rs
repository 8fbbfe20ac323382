use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::null_as_default;

/// Per-gene expression (with and without theta) against raw counts for
/// sample cells, grouped by population (`dg_in_ca1`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneScatterData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub genes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: BTreeMap<String, ScatterGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScatterGroup {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cells: Vec<ScatterCell>,
}

/// Series entries may be `null`; a missing series leaves the cell unusable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScatterCell {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_num: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_class: String,
    #[serde(default)]
    pub exp_with_theta: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub exp_without_theta: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub counts: Option<Vec<Option<f64>>>,
}

impl ScatterCell {
    pub fn label(&self) -> String {
        format!("Cell {} ({})", self.cell_num, self.primary_class)
    }
}
