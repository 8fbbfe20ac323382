use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::Value;

use crate::model::null_as_default;

/// One cell's precomputed attributes as shipped in a region payload.
///
/// Membership flags (`in_<region>`, `is_<region>`, `is_<category>`) are kept
/// as the set of keys whose JSON value was literally `true`; anything absent,
/// `false`, `null` or non-boolean reads as unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawCellRecord")]
pub struct CellRecord {
    pub cell_num: i64,
    pub theta: Option<f64>,
    pub shape_user: Option<f64>,
    pub shape_data: Option<f64>,
    pub rate_user: Option<f64>,
    pub rate_data: Option<f64>,
    flags: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct RawCellRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    cell_num: i64,
    #[serde(default)]
    theta: Option<f64>,
    #[serde(default)]
    shape_user: Option<f64>,
    #[serde(default)]
    shape_data: Option<f64>,
    #[serde(default)]
    rate_user: Option<f64>,
    #[serde(default)]
    rate_data: Option<f64>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawCellRecord> for CellRecord {
    fn from(raw: RawCellRecord) -> Self {
        let flags = raw
            .extra
            .into_iter()
            .filter(|(_, v)| matches!(v, Value::Bool(true)))
            .map(|(k, _)| k)
            .collect();
        Self {
            cell_num: raw.cell_num,
            theta: raw.theta,
            shape_user: raw.shape_user,
            shape_data: raw.shape_data,
            rate_user: raw.rate_user,
            rate_data: raw.rate_data,
            flags,
        }
    }
}

impl CellRecord {
    pub fn new(cell_num: i64) -> Self {
        Self {
            cell_num,
            theta: None,
            shape_user: None,
            shape_data: None,
            rate_user: None,
            rate_data: None,
            flags: BTreeSet::new(),
        }
    }

    pub fn with_flag(mut self, name: &str) -> Self {
        self.flags.insert(name.to_string());
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = Some(theta);
        self
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn finite_theta(&self) -> Option<f64> {
        self.theta.filter(|t| t.is_finite())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/cell.rs"]
mod tests;
