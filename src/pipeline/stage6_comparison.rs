use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::{AssignmentDataset, Transition};
use crate::model::Region;
use crate::model::classes::{SIMPLIFIED_CLASSES, simplified_class_index, simplify_class_label};
use crate::model::context::{CellFilter, DashboardContext};
use crate::pipeline::stage1_load::SideInputs;

pub const TOP_COUNTS: usize = 15;

/// Two columns of nodes, before then after, over the fixed coarse classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SankeyLinks {
    pub node_labels: Vec<String>,
    pub node_classes: Vec<&'static str>,
    pub sources: Vec<usize>,
    pub targets: Vec<usize>,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBar {
    pub label: String,
    pub count: u64,
    pub simplified: &'static str,
}

/// Top class counts of one assignment run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountsPanel {
    pub title: String,
    pub bars: Vec<CountBar>,
}

/// The runs without and with theta side by side, plus the transitions
/// between them. A side is `None` when its dataset, region or subset is
/// absent.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
    pub region: Region,
    pub filter: CellFilter,
    pub without_theta: Option<CountsPanel>,
    pub with_theta: Option<CountsPanel>,
    pub sankey: Option<SankeyLinks>,
}

pub fn build_sankey(transitions: &[Transition]) -> SankeyLinks {
    let n = SIMPLIFIED_CLASSES.len();
    let mut links = SankeyLinks {
        node_labels: SIMPLIFIED_CLASSES
            .iter()
            .map(|c| format!("{c} (Without)"))
            .chain(SIMPLIFIED_CLASSES.iter().map(|c| format!("{c} (With)")))
            .collect(),
        node_classes: SIMPLIFIED_CLASSES
            .iter()
            .chain(SIMPLIFIED_CLASSES.iter())
            .copied()
            .collect(),
        ..Default::default()
    };

    let mut skipped = 0usize;
    for t in transitions {
        match (simplified_class_index(&t.from), simplified_class_index(&t.to)) {
            (Some(from), Some(to)) => {
                links.sources.push(from);
                links.targets.push(to + n);
                links.values.push(t.count);
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "transitions with unknown classes skipped");
    }
    links
}

/// The `limit` largest counts, descending; equal counts keep label order.
pub fn top_counts(counts: &BTreeMap<String, u64>, limit: usize) -> Vec<CountBar> {
    let mut sorted: Vec<(&String, &u64)> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1));
    sorted
        .into_iter()
        .take(limit)
        .map(|(label, &count)| CountBar {
            label: label.clone(),
            count,
            simplified: simplify_class_label(label),
        })
        .collect()
}

fn counts_panel(
    dataset: Option<&AssignmentDataset>,
    label: &str,
    region: Region,
    filter: CellFilter,
) -> Option<CountsPanel> {
    let counts = dataset?.counts(region, filter)?;
    Some(CountsPanel {
        title: format!("{label} Theta - Distribution in {}", region.display_name()),
        bars: top_counts(counts, TOP_COUNTS),
    })
}

pub fn run_stage6(side: &SideInputs, ctx: &DashboardContext) -> ComparisonView {
    let (region, filter) = (ctx.region, ctx.cell_filter);
    let sankey = side
        .with_theta
        .as_ref()
        .and_then(|d| d.transitions(region, filter))
        .map(build_sankey);
    let view = ComparisonView {
        region,
        filter,
        without_theta: counts_panel(side.without_theta.as_ref(), "WITHOUT", region, filter),
        with_theta: counts_panel(side.with_theta.as_ref(), "WITH", region, filter),
        sankey,
    };
    tracing::info!(
        region = %region,
        filter = filter.key(),
        without = view.without_theta.is_some(),
        with = view.with_theta.is_some(),
        links = view.sankey.as_ref().map_or(0, |s| s.values.len()),
        "comparison built"
    );
    view
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_comparison.rs"]
mod tests;
