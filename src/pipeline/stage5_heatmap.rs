use std::collections::BTreeSet;

use serde::Serialize;

use crate::contrib::heatmap::{heatmap_subtitle, heatmap_title};
use crate::contrib::{HeatmapMatrix, build_heatmap, expand};
use crate::input::RegionPayload;
use crate::model::SelectionKey;
use crate::model::classes::{default_desired_class, default_predicted_classes};
use crate::model::context::DashboardContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeatmapOutcome {
    /// No predicted class or no desired class to compare against.
    NeedSelection,
    /// The payload has no rows for this key.
    NoSelectionData { key: String },
    /// Selection exists but nothing survives the class filter (N=0).
    Empty {
        key: String,
        title: String,
        subtitle: String,
    },
    Ready {
        key: String,
        title: String,
        subtitle: String,
        matrix: HeatmapMatrix,
    },
    /// Rows and gene vocabulary disagree in width. `expand` sizes every row
    /// from the vocabulary, so this only marks an internal inconsistency.
    Failed { key: String, reason: String },
}

/// Predicted classes and desired class after applying payload defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelection {
    pub predicted: Vec<String>,
    pub key: Option<SelectionKey>,
}

pub fn resolve_selection(payload: &RegionPayload, ctx: &DashboardContext) -> ResolvedSelection {
    let predicted = if ctx.predicted_classes.is_empty() {
        default_predicted_classes(&payload.all_class_names)
    } else {
        ctx.predicted_classes.clone()
    };
    let desired = ctx
        .desired_class
        .clone()
        .or_else(|| default_desired_class(&payload.comparison_classes));
    ResolvedSelection {
        predicted,
        key: desired.map(|d| SelectionKey::new(d, ctx.top_n)),
    }
}

pub fn run_stage5(payload: &RegionPayload, ctx: &DashboardContext) -> HeatmapOutcome {
    let resolved = resolve_selection(payload, ctx);
    let Some(key) = resolved.key else {
        return HeatmapOutcome::NeedSelection;
    };
    if resolved.predicted.is_empty() {
        return HeatmapOutcome::NeedSelection;
    }
    let key_str = key.to_string();

    let Some(rows) = payload.selection(&key).and_then(|s| s.rows.as_ref()) else {
        tracing::warn!(key = %key_str, "no heatmap rows for selection");
        return HeatmapOutcome::NoSelectionData { key: key_str };
    };

    let title = heatmap_title(&resolved.predicted, ctx.region.display_name());
    let subtitle = heatmap_subtitle(key.top_n, &key.desired_class);

    let filter: BTreeSet<String> = resolved.predicted.iter().cloned().collect();
    let dense = expand(rows, payload.genes.len(), &filter);
    if payload.genes.is_empty() || dense.is_empty() {
        return HeatmapOutcome::Empty {
            key: key_str,
            title,
            subtitle,
        };
    }

    match build_heatmap(&payload.genes, dense, ctx.max_labels) {
        Ok(matrix) => {
            tracing::info!(
                key = %key_str,
                rows = matrix.n_rows(),
                cols = matrix.n_cols(),
                ticks = matrix.tick_values.len(),
                "heatmap built"
            );
            HeatmapOutcome::Ready {
                key: key_str,
                title,
                subtitle,
                matrix,
            }
        }
        Err(reason) => HeatmapOutcome::Failed {
            key: key_str,
            reason,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_heatmap.rs"]
mod tests;
