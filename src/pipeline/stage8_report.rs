use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::input::RegionPayload;
use crate::model::context::{DashboardContext, RunMode, ThetaPlotMode};
use crate::pipeline::stage2_decode::DecodedFigure;
use crate::pipeline::stage3_theta::{ThetaGrid, ThetaPlot};
use crate::pipeline::stage4_components::{CellView, ComponentsGrid};
use crate::pipeline::stage5_heatmap::HeatmapOutcome;
use crate::pipeline::stage6_comparison::ComparisonView;
use crate::pipeline::stage7_gene_scatter::{GeneScatterView, ScatterPlot};
use crate::report::json::{pipeline_step_json, write_json};
use crate::report::text::render_summary_text;
use crate::report::{PanelLine, ReportError, SummaryData, mean};

#[derive(Debug, Clone)]
pub struct Stage8Input<'a> {
    pub ctx: &'a DashboardContext,
    pub payload: &'a RegionPayload,
    pub theta: &'a ThetaGrid,
    pub components: &'a ComponentsGrid,
    pub cell: Option<&'a CellView>,
    pub heatmap: &'a HeatmapOutcome,
    pub comparison: &'a ComparisonView,
    pub figure: Option<&'a DecodedFigure>,
    pub gene_scatter: &'a GeneScatterView,
    pub side_failures: &'a [String],

    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage8Input<'_>, out_dir: &Path) -> Result<SummaryData, ReportError> {
    fs::create_dir_all(out_dir)?;
    let region = input.ctx.region.key();
    let mut outputs = Vec::new();

    emit(out_dir, format!("theta_{region}.json"), input.theta, &mut outputs)?;
    emit(
        out_dir,
        format!("components_{region}.json"),
        input.components,
        &mut outputs,
    )?;
    if let Some(cell) = input.cell {
        emit(out_dir, format!("cell_{region}.json"), cell, &mut outputs)?;
    }
    emit(out_dir, format!("heatmap_{region}.json"), input.heatmap, &mut outputs)?;
    emit(
        out_dir,
        format!("comparison_{region}.json"),
        input.comparison,
        &mut outputs,
    )?;
    if let Some(figure) = input.figure {
        emit(out_dir, format!("figure_{region}.json"), figure, &mut outputs)?;
    }
    emit(
        out_dir,
        "gene_scatter.json".to_string(),
        input.gene_scatter,
        &mut outputs,
    )?;

    let mut summary = build_summary(input);
    outputs.push("summary.txt".to_string());
    if input.ctx.run_mode == RunMode::Pipeline {
        outputs.push("pipeline_step.json".to_string());
    }
    summary.outputs = outputs;

    write_text(&out_dir.join("summary.txt"), &render_summary_text(&summary))?;
    if input.ctx.run_mode == RunMode::Pipeline {
        write_json(
            &out_dir.join("pipeline_step.json"),
            &pipeline_step_json(&summary),
        )?;
    }

    tracing::info!(dir = %out_dir.display(), files = summary.outputs.len(), "reports written");
    Ok(summary)
}

pub fn build_summary(input: &Stage8Input<'_>) -> SummaryData {
    let theta_panels = input
        .theta
        .panels
        .iter()
        .map(|p| PanelLine {
            title: p.title.clone(),
            n: p.n,
            mean: p.mean,
            note: match &p.plot {
                ThetaPlot::Histogram {
                    fallback_reason: Some(reason),
                    ..
                } => Some(reason.clone()),
                _ => None,
            },
        })
        .collect();

    let components_panels = input
        .components
        .panels
        .iter()
        .map(|p| PanelLine {
            title: p.title.clone(),
            n: p.n,
            mean: mean(&p.points.y),
            note: None,
        })
        .collect();

    let (heatmap_status, heatmap_key, heatmap_shape) = match input.heatmap {
        HeatmapOutcome::NeedSelection => ("need_selection", None, None),
        HeatmapOutcome::NoSelectionData { key } => ("no_selection_data", Some(key.clone()), None),
        HeatmapOutcome::Empty { key, .. } => ("empty", Some(key.clone()), None),
        HeatmapOutcome::Ready { key, matrix, .. } => (
            "ready",
            Some(key.clone()),
            Some((matrix.n_rows(), matrix.n_cols())),
        ),
        HeatmapOutcome::Failed { key, .. } => ("failed", Some(key.clone()), None),
    };

    SummaryData {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        region: input.ctx.region.key().to_string(),
        region_label: input.ctx.region.display_name().to_string(),
        run_mode: match input.ctx.run_mode {
            RunMode::Standalone => "standalone".to_string(),
            RunMode::Pipeline => "pipeline".to_string(),
        },
        n_cells: input.payload.cells.len(),
        n_genes: input.payload.genes.len(),
        n_selections: input.payload.selections.len(),
        theta_mode: match input.theta.mode {
            ThetaPlotMode::Density => "density".to_string(),
            ThetaPlotMode::Histogram => "histogram".to_string(),
        },
        theta_panels,
        components_mode: input.components.mode.label().to_ascii_lowercase(),
        components_panels,
        heatmap_status: heatmap_status.to_string(),
        heatmap_key,
        heatmap_shape,
        figure_traces: input.figure.map(|f| f.data.len()),
        figure_failures: input.figure.map_or(0, |f| f.failures.len()),
        comparison_filter: input.comparison.filter.key().to_string(),
        comparison_sides: [
            input.comparison.without_theta.is_some(),
            input.comparison.with_theta.is_some(),
        ],
        sankey_links: input.comparison.sankey.as_ref().map(|s| s.values.len()),
        gene_scatter_status: scatter_status(&input.gene_scatter.plot).to_string(),
        side_failures: input.side_failures.to_vec(),
        outputs: Vec::new(),
    }
}

fn scatter_status(plot: &ScatterPlot) -> &'static str {
    match plot {
        ScatterPlot::NoData => "no_data",
        ScatterPlot::NoCells => "no_cells",
        ScatterPlot::NoCellSelected { .. } => "no_cell_selected",
        ScatterPlot::InvalidCell { .. } => "invalid_cell",
        ScatterPlot::Ready { .. } => "ready",
    }
}

fn emit<T: Serialize + ?Sized>(
    out_dir: &Path,
    name: String,
    value: &T,
    outputs: &mut Vec<String>,
) -> Result<(), ReportError> {
    write_json(&out_dir.join(&name), value)?;
    tracing::debug!(file = %name, "report written");
    outputs.push(name);
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage8_report.rs"]
mod tests;
