pub mod json;
pub mod text;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct PanelLine {
    pub title: String,
    pub n: usize,
    pub mean: Option<f64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub region: String,
    pub region_label: String,
    pub run_mode: String,

    pub n_cells: usize,
    pub n_genes: usize,
    pub n_selections: usize,

    pub theta_mode: String,
    pub theta_panels: Vec<PanelLine>,
    pub components_mode: String,
    pub components_panels: Vec<PanelLine>,

    pub heatmap_status: String,
    pub heatmap_key: Option<String>,
    pub heatmap_shape: Option<(usize, usize)>,

    pub figure_traces: Option<usize>,
    pub figure_failures: usize,
    pub comparison_filter: String,
    /// Whether the without-theta and with-theta counts were available.
    pub comparison_sides: [bool; 2],
    pub sankey_links: Option<usize>,
    pub gene_scatter_status: String,
    pub side_failures: Vec<String>,
    pub outputs: Vec<String>,
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
