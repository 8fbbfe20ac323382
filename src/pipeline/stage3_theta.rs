use serde::Serialize;

use crate::density::{DensityCurve, estimate};
use crate::model::context::{DashboardContext, ThetaPlotMode};
use crate::model::{CellRecord, Region};
use crate::panels::{build_panels, partition};
use crate::report::mean;

pub const HISTOGRAM_BINS: usize = 30;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThetaPlot {
    /// No cells in this panel ("No cells (N=0)").
    Empty,
    Density {
        curve: DensityCurve,
        mean_line_x: [f64; 2],
        mean_line_y: [f64; 2],
    },
    Histogram {
        values: Vec<f64>,
        nbins: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_reason: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ThetaPanel {
    pub id: &'static str,
    pub title: String,
    pub plot_title: String,
    pub n: usize,
    pub mean: Option<f64>,
    pub plot: ThetaPlot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThetaGrid {
    pub region: Region,
    pub mode: ThetaPlotMode,
    pub panels: Vec<ThetaPanel>,
}

pub fn theta_values(cells: &[&CellRecord]) -> Vec<f64> {
    cells.iter().filter_map(|c| c.finite_theta()).collect()
}

fn histogram(values: Vec<f64>, fallback_reason: Option<String>) -> ThetaPlot {
    ThetaPlot::Histogram {
        values,
        nbins: HISTOGRAM_BINS,
        fallback_reason,
    }
}

pub fn theta_panel(
    id: &'static str,
    title: &str,
    values: Vec<f64>,
    mode: ThetaPlotMode,
    kde_points: usize,
) -> ThetaPanel {
    let n = values.len();
    let Some(m) = mean(&values) else {
        return ThetaPanel {
            id,
            title: title.to_string(),
            plot_title: format!("{title} (N=0)"),
            n: 0,
            mean: None,
            plot: ThetaPlot::Empty,
        };
    };

    let plot = match mode {
        ThetaPlotMode::Histogram => histogram(values, None),
        ThetaPlotMode::Density => match estimate(&values, kde_points) {
            Ok(curve) => {
                let peak = curve.peak();
                ThetaPlot::Density {
                    curve,
                    mean_line_x: [m, m],
                    mean_line_y: [0.0, peak],
                }
            }
            Err(e) => {
                tracing::warn!(panel = %title, error = %e, "density failed; using histogram");
                histogram(values, Some(e.to_string()))
            }
        },
    };

    ThetaPanel {
        id,
        title: title.to_string(),
        plot_title: format!("{title} (N={n}, mean={m:.3})"),
        n,
        mean: Some(m),
        plot,
    }
}

/// Theta distribution for each of the region's nine panels.
pub fn run_stage3(cells: &[CellRecord], ctx: &DashboardContext) -> ThetaGrid {
    let panels = build_panels(ctx.region);
    let subsets = partition(&panels, cells);

    let out = panels
        .iter()
        .zip(subsets)
        .map(|(spec, subset)| {
            theta_panel(
                spec.id,
                &spec.title,
                theta_values(&subset),
                ctx.theta_plot,
                ctx.kde_points,
            )
        })
        .collect::<Vec<_>>();

    let empty = out.iter().filter(|p| p.n == 0).count();
    tracing::info!(region = %ctx.region, panels = out.len(), empty, "theta grid built");

    ThetaGrid {
        region: ctx.region,
        mode: ctx.theta_plot,
        panels: out,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_theta.rs"]
mod tests;
