use serde::Serialize;

use crate::model::context::{ComponentsMode, DashboardContext};
use crate::model::{CellRecord, Region};
use crate::panels::{build_panels, partition};

const DIAGONAL_PAD: f64 = 0.05;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScatterPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub cell_nums: Vec<i64>,
    pub thetas: Vec<Option<f64>>,
}

impl ScatterPoints {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentsPanel {
    pub id: &'static str,
    pub title: String,
    pub plot_title: String,
    pub n: usize,
    pub points: ScatterPoints,
    /// End of the y = x reference line, starting at the origin.
    pub diagonal_end: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentsGrid {
    pub region: Region,
    pub mode: ComponentsMode,
    pub x_title: String,
    pub y_title: String,
    pub panels: Vec<ComponentsPanel>,
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

pub fn component_pair(cell: &CellRecord, mode: ComponentsMode) -> Option<(f64, f64)> {
    let (x, y) = match mode {
        ComponentsMode::Shape => (cell.shape_user, cell.shape_data),
        ComponentsMode::Rate => (cell.rate_user, cell.rate_data),
    };
    Some((finite(x)?, finite(y)?))
}

/// Pairs of (user, data) components; records missing either value are left
/// out.
pub fn scatter_points(cells: &[&CellRecord], mode: ComponentsMode) -> ScatterPoints {
    let mut points = ScatterPoints::default();
    for cell in cells {
        if let Some((x, y)) = component_pair(cell, mode) {
            points.x.push(x);
            points.y.push(y);
            points.cell_nums.push(cell.cell_num);
            points.thetas.push(finite(cell.theta));
        }
    }
    points
}

pub fn diagonal_end(points: &ScatterPoints) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let max = points
        .x
        .iter()
        .chain(points.y.iter())
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    Some(max + max * DIAGONAL_PAD)
}

pub fn run_stage4(cells: &[CellRecord], ctx: &DashboardContext) -> ComponentsGrid {
    let mode = ctx.components_mode;
    let panels = build_panels(ctx.region);
    let subsets = partition(&panels, cells);

    let out = panels
        .iter()
        .zip(subsets)
        .map(|(spec, subset)| {
            let points = scatter_points(&subset, mode);
            let n = points.len();
            ComponentsPanel {
                id: spec.id,
                title: spec.title.clone(),
                plot_title: format!("{} (N={n})", spec.title),
                n,
                diagonal_end: diagonal_end(&points),
                points,
            }
        })
        .collect::<Vec<_>>();

    tracing::info!(region = %ctx.region, mode = mode.label(), "components grid built");

    ComponentsGrid {
        region: ctx.region,
        mode,
        x_title: format!("{}: user-defined component", mode.label()),
        y_title: format!("{}: data-driven component", mode.label()),
        panels: out,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBar {
    pub user: f64,
    pub data: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CellView {
    NotFound { cell_num: i64 },
    Found {
        cell_num: i64,
        theta: Option<f64>,
        shape: Option<ComponentBar>,
        rate: Option<ComponentBar>,
    },
}

/// Stacked shape/rate bars for a single cell. A bar is present only when both
/// of its components are finite.
pub fn cell_components(cells: &[CellRecord], cell_num: i64) -> CellView {
    let Some(cell) = cells.iter().find(|c| c.cell_num == cell_num) else {
        return CellView::NotFound { cell_num };
    };
    let bar = |mode| {
        component_pair(cell, mode).map(|(user, data)| ComponentBar {
            user,
            data,
            total: user + data,
        })
    };
    CellView::Found {
        cell_num,
        theta: finite(cell.theta),
        shape: bar(ComponentsMode::Shape),
        rate: bar(ComponentsMode::Rate),
    }
}

/// First cell carrying both shape components, used when no cell was asked for.
pub fn default_cell_num(cells: &[CellRecord]) -> Option<i64> {
    cells
        .iter()
        .find(|c| component_pair(c, ComponentsMode::Shape).is_some())
        .map(|c| c.cell_num)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_components.rs"]
mod tests;
