pub mod expand;
pub mod heatmap;
pub mod labels;

use serde::{Deserialize, Serialize};

use crate::model::null_as_default;

pub use expand::expand;
pub use heatmap::{HeatmapMatrix, build_heatmap};
pub use labels::{thin_labels, thin_vocabulary};

pub const DEFAULT_MAX_LABELS: usize = 60;

/// One heatmap row as shipped: the strongest `(gene_index, value)` pairs for
/// a single cell. Indices are signed so malformed negatives can be dropped
/// instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContributionRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cell_num: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicted_class: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tops: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseRow {
    pub cell_num: i64,
    pub predicted_class: String,
    pub dense: Vec<f64>,
}
