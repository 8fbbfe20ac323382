use serde::Serialize;

use crate::input::{GeneScatterData, ScatterCell};
use crate::model::context::DashboardContext;

pub const DEFAULT_SCATTER_GROUP: &str = "dg_in_ca1";

const AXIS_PAD: f64 = 0.05;

/// One marker series: scaled expression (x) against gene counts (y).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionSeries {
    pub name: &'static str,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScatterPlot {
    /// `gene_scatter_data.json` was not loaded.
    NoData,
    NoCells,
    NoCellSelected { index: usize, n_cells: usize },
    InvalidCell { cell_num: i64, reason: String },
    Ready {
        cell_num: i64,
        primary_class: String,
        title: String,
        genes: Vec<String>,
        with_theta: ExpressionSeries,
        without_theta: ExpressionSeries,
        /// Both axes and the y = x line run from 0 to here.
        axis_end: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneScatterView {
    pub group: String,
    pub groups: Vec<String>,
    pub cell_labels: Vec<String>,
    pub plot: ScatterPlot,
}

fn finite_max(values: &[Option<f64>]) -> Option<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
}

/// Shared axis end: the larger of both maxima plus 5% of the larger one.
/// Series without a single finite value count as 0.
pub fn axis_end(with_theta: &[Option<f64>], without_theta: &[Option<f64>], counts: &[Option<f64>]) -> f64 {
    let max_x = match (finite_max(with_theta), finite_max(without_theta)) {
        (Some(a), Some(b)) => a.max(b),
        (a, b) => a.or(b).unwrap_or(0.0),
    };
    let max_y = finite_max(counts).unwrap_or(0.0);
    max_x.max(max_y) + (max_x * AXIS_PAD).max(max_y * AXIS_PAD)
}

pub fn scatter_plot(cell: &ScatterCell, genes: &[String]) -> ScatterPlot {
    let invalid = |reason: String| ScatterPlot::InvalidCell {
        cell_num: cell.cell_num,
        reason,
    };
    let (Some(with), Some(without), Some(counts)) = (
        cell.exp_with_theta.as_ref(),
        cell.exp_without_theta.as_ref(),
        cell.counts.as_ref(),
    ) else {
        return invalid("missing expression or count series".to_string());
    };
    let g = genes.len();
    if with.len() != g || without.len() != g || counts.len() != g {
        return invalid(format!(
            "series lengths {}/{}/{} do not match {g} genes",
            with.len(),
            without.len(),
            counts.len()
        ));
    }

    ScatterPlot::Ready {
        cell_num: cell.cell_num,
        primary_class: cell.primary_class.clone(),
        title: format!("Cell {}: {}", cell.cell_num, cell.primary_class),
        genes: genes.to_vec(),
        axis_end: axis_end(with, without, counts),
        with_theta: ExpressionSeries {
            name: "With theta",
            x: with.clone(),
            y: counts.clone(),
        },
        without_theta: ExpressionSeries {
            name: "Without theta",
            x: without.clone(),
            y: counts.clone(),
        },
    }
}

pub fn run_stage7(data: Option<&GeneScatterData>, ctx: &DashboardContext) -> GeneScatterView {
    let group = ctx.scatter_group.clone();
    let Some(data) = data else {
        return GeneScatterView {
            group,
            groups: Vec::new(),
            cell_labels: Vec::new(),
            plot: ScatterPlot::NoData,
        };
    };

    let groups = data.groups.keys().cloned().collect();
    let cells = data
        .groups
        .get(&group)
        .map(|g| g.cells.as_slice())
        .unwrap_or_default();
    let plot = if cells.is_empty() {
        ScatterPlot::NoCells
    } else {
        match cells.get(ctx.scatter_cell) {
            Some(cell) => scatter_plot(cell, &data.genes),
            None => ScatterPlot::NoCellSelected {
                index: ctx.scatter_cell,
                n_cells: cells.len(),
            },
        }
    };
    if let ScatterPlot::InvalidCell { cell_num, reason } = &plot {
        tracing::warn!(group = %group, cell_num, reason = %reason, "gene scatter cell rejected");
    }

    GeneScatterView {
        cell_labels: cells.iter().map(ScatterCell::label).collect(),
        group,
        groups,
        plot,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_gene_scatter.rs"]
mod tests;
