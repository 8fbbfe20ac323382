mod codec;
mod contrib;
mod density;
mod input;
mod logging;
mod model;
mod panels;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::PayloadCache;
use crate::model::Region;
use crate::model::context::{
    CellFilter, ComponentsMode, DashboardContext, RunMode, ThetaPlotMode,
};
use crate::pipeline::stage1_load::{load_side_inputs, run_stage1};
use crate::pipeline::stage2_decode::run_stage2;
use crate::pipeline::stage3_theta::run_stage3;
use crate::pipeline::stage4_components::{cell_components, default_cell_num, run_stage4};
use crate::pipeline::stage5_heatmap::run_stage5;
use crate::pipeline::stage6_comparison::run_stage6;
use crate::pipeline::stage7_gene_scatter::{DEFAULT_SCATTER_GROUP, run_stage7};
use crate::pipeline::stage8_report::{Stage8Input, write_reports};

#[derive(Debug, Parser)]
#[command(name = "kira-thetadash", version, about)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build every view for one region and write chart-ready JSON.
    Run(RunArgs),
    /// Print the panel grid definitions for a region as JSON.
    Panels {
        #[arg(long, value_enum)]
        region: Region,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Directory holding heatmap_payloads_<region>.json[.gz] and the optional
    /// without_theta.json, with_theta.json and gene_scatter_data.json.
    #[arg(long = "data")]
    data_dir: PathBuf,
    #[arg(long = "out")]
    out_dir: PathBuf,
    #[arg(long, value_enum, default_value = "ca1")]
    region: Region,
    #[arg(long)]
    desired_class: Option<String>,
    #[arg(long, default_value_t = 3)]
    top_n: u32,
    /// Repeat to select several predicted classes.
    #[arg(long = "predicted-class")]
    predicted_classes: Vec<String>,
    #[arg(long, value_enum, default_value = "shape")]
    components_mode: ComponentsMode,
    /// Raw theta values instead of density curves.
    #[arg(long)]
    histogram: bool,
    #[arg(long, default_value_t = density::DEFAULT_NUM_POINTS)]
    kde_points: usize,
    #[arg(long, default_value_t = contrib::DEFAULT_MAX_LABELS)]
    max_labels: usize,
    #[arg(long)]
    cell_num: Option<i64>,
    /// Cells covered by the comparison counts and transitions.
    #[arg(long = "filter", value_enum, default_value = "all")]
    cell_filter: CellFilter,
    #[arg(long, default_value = DEFAULT_SCATTER_GROUP)]
    scatter_group: String,
    /// Index of the cell within the scatter group.
    #[arg(long, default_value_t = 0)]
    scatter_cell: usize,
    #[arg(long, value_enum, default_value = "standalone")]
    run_mode: RunMode,
}

impl RunArgs {
    fn into_context(self) -> DashboardContext {
        DashboardContext {
            data_dir: self.data_dir,
            out_dir: self.out_dir,
            run_mode: self.run_mode,
            region: self.region,
            desired_class: self.desired_class,
            top_n: self.top_n,
            predicted_classes: self.predicted_classes,
            components_mode: self.components_mode,
            theta_plot: if self.histogram {
                ThetaPlotMode::Histogram
            } else {
                ThetaPlotMode::Density
            },
            kde_points: self.kde_points,
            max_labels: self.max_labels,
            cell_num: self.cell_num,
            cell_filter: self.cell_filter,
            scatter_group: self.scatter_group,
            scatter_cell: self.scatter_cell,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let result = match cli.command {
        Command::Run(args) => run(&args.into_context()),
        Command::Panels { region } => print_panels(region),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(ctx: &DashboardContext) -> Result<(), String> {
    let mut cache = PayloadCache::new();
    let payload = run_stage1(ctx, &mut cache).map_err(|e| e.to_string())?;
    let side = load_side_inputs(&ctx.data_dir);

    let figure = payload.figure.as_ref().map(run_stage2);
    let theta = run_stage3(&payload.cells, ctx);
    let components = run_stage4(&payload.cells, ctx);
    let cell = ctx
        .cell_num
        .or_else(|| default_cell_num(&payload.cells))
        .map(|n| cell_components(&payload.cells, n));
    let heatmap = run_stage5(&payload, ctx);
    let comparison = run_stage6(&side, ctx);
    let gene_scatter = run_stage7(side.gene_scatter.as_ref(), ctx);

    let input = Stage8Input {
        ctx,
        payload: &payload,
        theta: &theta,
        components: &components,
        cell: cell.as_ref(),
        heatmap: &heatmap,
        comparison: &comparison,
        figure: figure.as_ref(),
        gene_scatter: &gene_scatter,
        side_failures: &side.failures,
        tool_name: "kira-thetadash".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&input, &ctx.resolved_out_dir()).map_err(|e| e.to_string())?;
    Ok(())
}

fn print_panels(region: Region) -> Result<(), String> {
    let panels = panels::build_panels(region);
    let json = serde_json::to_string_pretty(&panels).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
