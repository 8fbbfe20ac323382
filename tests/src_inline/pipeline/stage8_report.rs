use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::input::Figure;
use crate::model::{CellRecord, Region};
use crate::pipeline::stage2_decode::run_stage2;
use crate::pipeline::stage3_theta::run_stage3;
use crate::pipeline::stage4_components::{cell_components, run_stage4};
use crate::pipeline::stage5_heatmap::run_stage5;
use crate::pipeline::stage1_load::SideInputs;
use crate::pipeline::stage6_comparison::run_stage6;
use crate::pipeline::stage7_gene_scatter::run_stage7;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_thetadash_report_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn payload() -> RegionPayload {
    let mut cells = Vec::new();
    for (i, theta) in [0.1, 0.3, 0.35, 0.6].into_iter().enumerate() {
        let mut c = CellRecord::new(i as i64 + 1)
            .with_theta(theta)
            .with_flag("in_ca1")
            .with_flag("is_ca1");
        c.shape_user = Some(theta);
        c.shape_data = Some(1.0 - theta);
        cells.push(c);
    }
    cells.push(
        CellRecord::new(9)
            .with_theta(0.2)
            .with_flag("in_ca1")
            .with_flag("is_zero"),
    );
    RegionPayload {
        cells,
        genes: vec!["Gad1".to_string(), "Prox1".to_string()],
        ..Default::default()
    }
}

fn read_json(dir: &std::path::Path, name: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_write_reports_standalone() {
    let dir = make_temp_dir();
    let ctx = DashboardContext::for_region(Region::Ca1);
    let payload = payload();
    let theta = run_stage3(&payload.cells, &ctx);
    let components = run_stage4(&payload.cells, &ctx);
    let cell = cell_components(&payload.cells, 2);
    let heatmap = run_stage5(&payload, &ctx);
    let side = SideInputs::default();
    let comparison = run_stage6(&side, &ctx);
    let gene_scatter = run_stage7(None, &ctx);

    let input = Stage8Input {
        ctx: &ctx,
        payload: &payload,
        theta: &theta,
        components: &components,
        cell: Some(&cell),
        heatmap: &heatmap,
        comparison: &comparison,
        figure: None,
        gene_scatter: &gene_scatter,
        side_failures: &side.failures,
        tool_name: "kira-thetadash".to_string(),
        tool_version: "0.1.0".to_string(),
    };
    let summary = write_reports(&input, &dir).unwrap();

    assert_eq!(
        summary.outputs,
        vec![
            "theta_ca1.json",
            "components_ca1.json",
            "cell_ca1.json",
            "heatmap_ca1.json",
            "comparison_ca1.json",
            "gene_scatter.json",
            "summary.txt",
        ]
    );
    assert!(!dir.join("pipeline_step.json").exists());
    assert_eq!(summary.heatmap_status, "need_selection");
    assert_eq!(summary.theta_panels.len(), 9);
    assert_eq!(summary.theta_panels[0].n, 4);

    let theta_json = read_json(&dir, "theta_ca1.json");
    assert_eq!(theta_json["panels"][0]["plot"]["kind"], "density");
    assert_eq!(theta_json["panels"][8]["n"], 1);
    let cell_json = read_json(&dir, "cell_ca1.json");
    assert_eq!(cell_json["status"], "found");
    assert_eq!(cell_json["cell_num"], 2);

    let comparison_json = read_json(&dir, "comparison_ca1.json");
    assert_eq!(comparison_json["filter"], "all");
    assert!(comparison_json["with_theta"].is_null());
    assert_eq!(summary.gene_scatter_status, "no_data");
    assert_eq!(summary.sankey_links, None);

    let text = std::fs::read_to_string(dir.join("summary.txt")).unwrap();
    assert!(text.contains("CA1 in CA1"));
    assert!(text.contains("Status: need_selection"));
}

#[test]
fn test_write_reports_pipeline_with_figure() {
    let dir = make_temp_dir();
    let mut ctx = DashboardContext::for_region(Region::Ca1);
    ctx.run_mode = RunMode::Pipeline;
    ctx.out_dir = dir.clone();
    let payload = payload();
    let theta = run_stage3(&payload.cells, &ctx);
    let components = run_stage4(&payload.cells, &ctx);
    let heatmap = run_stage5(&payload, &ctx);
    let side = SideInputs::default();
    let comparison = run_stage6(&side, &ctx);
    let gene_scatter = run_stage7(None, &ctx);
    let figure: Figure = serde_json::from_value(json!({
        "data": [{"z": [[1.0]]}, {"z": {"dtype": "f8", "bdata": "??", "shape": [1, 1]}}],
        "layout": {}
    }))
    .unwrap();
    let decoded = run_stage2(&figure);
    let failures = vec!["gene_scatter_data.json: parse error".to_string()];

    let input = Stage8Input {
        ctx: &ctx,
        payload: &payload,
        theta: &theta,
        components: &components,
        cell: None,
        heatmap: &heatmap,
        comparison: &comparison,
        figure: Some(&decoded),
        gene_scatter: &gene_scatter,
        side_failures: &failures,
        tool_name: "kira-thetadash".to_string(),
        tool_version: "0.1.0".to_string(),
    };
    let out_dir = ctx.resolved_out_dir();
    let summary = write_reports(&input, &out_dir).unwrap();

    assert!(out_dir.ends_with("kira-thetadash"));
    assert_eq!(summary.figure_traces, Some(2));
    assert_eq!(summary.figure_failures, 1);
    assert!(summary.outputs.contains(&"figure_ca1.json".to_string()));
    assert!(!summary.outputs.contains(&"cell_ca1.json".to_string()));

    let step = read_json(&out_dir, "pipeline_step.json");
    assert_eq!(step["tool"], "kira-thetadash");
    assert_eq!(step["input"]["region"], "ca1");
    assert_eq!(step["input"]["n_cells"], 5);
    assert_eq!(step["heatmap"]["status"], "need_selection");
    assert_eq!(step["gene_scatter"], "no_data");
    assert_eq!(step["skipped_inputs"][0], "gene_scatter_data.json: parse error");
    assert_eq!(
        step["outputs"].as_array().unwrap().last().unwrap(),
        "pipeline_step.json"
    );
}
