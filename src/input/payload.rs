use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::contrib::ContributionRow;
use crate::model::{CellRecord, SelectionKey, null_as_default};

/// Everything shipped for one region. Every section is optional on disk and
/// defaults to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionPayload {
    #[serde(default, alias = "theta_data", deserialize_with = "null_as_default")]
    pub cells: Vec<CellRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_class_names: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comparison_classes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub selections: BTreeMap<String, Selection>,
    #[serde(default)]
    pub figure: Option<Figure>,
}

impl RegionPayload {
    pub fn selection(&self, key: &SelectionKey) -> Option<&Selection> {
        self.selections.get(&key.to_string())
    }

    pub fn find_cell(&self, cell_num: i64) -> Option<&CellRecord> {
        self.cells.iter().find(|c| c.cell_num == cell_num)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub rows: Option<Vec<ContributionRow>>,
}

/// A prebuilt chart figure. Traces are kept as raw JSON so one malformed
/// trace cannot reject the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Figure {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub layout: Value,
}
