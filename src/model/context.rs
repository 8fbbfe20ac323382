use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::model::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentsMode {
    Shape,
    Rate,
}

impl ComponentsMode {
    pub fn label(self) -> &'static str {
        match self {
            ComponentsMode::Shape => "Shape",
            ComponentsMode::Rate => "Rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThetaPlotMode {
    Density,
    Histogram,
}

/// Which cells the comparison counts and transitions cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFilter {
    All,
    #[value(alias = "high_gene")]
    HighGene,
}

impl CellFilter {
    /// Key of this filter in the transitions table.
    pub fn key(self) -> &'static str {
        match self {
            CellFilter::All => "all",
            CellFilter::HighGene => "high_gene",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Standalone,
    Pipeline,
}

/// Everything a run needs to know about the active selection. Built once
/// from the command line and passed by reference into each stage.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    pub run_mode: RunMode,
    pub region: Region,
    pub desired_class: Option<String>,
    pub top_n: u32,
    pub predicted_classes: Vec<String>,
    pub components_mode: ComponentsMode,
    pub theta_plot: ThetaPlotMode,
    pub kde_points: usize,
    pub max_labels: usize,
    pub cell_num: Option<i64>,
    pub cell_filter: CellFilter,
    pub scatter_group: String,
    pub scatter_cell: usize,
}

impl DashboardContext {
    pub fn for_region(region: Region) -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("out"),
            run_mode: RunMode::Standalone,
            region,
            desired_class: None,
            top_n: 3,
            predicted_classes: Vec::new(),
            components_mode: ComponentsMode::Shape,
            theta_plot: ThetaPlotMode::Density,
            kde_points: crate::density::DEFAULT_NUM_POINTS,
            max_labels: crate::contrib::DEFAULT_MAX_LABELS,
            cell_num: None,
            cell_filter: CellFilter::All,
            scatter_group: crate::pipeline::stage7_gene_scatter::DEFAULT_SCATTER_GROUP.to_string(),
            scatter_cell: 0,
        }
    }

    pub fn resolved_out_dir(&self) -> PathBuf {
        match self.run_mode {
            RunMode::Standalone => self.out_dir.clone(),
            RunMode::Pipeline => self.out_dir.join("kira-thetadash"),
        }
    }
}
