use crate::report::{PanelLine, SummaryData, format_f64_3};

pub fn render_summary_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Theta Dashboard Summary\n");
    out.push_str("=======================\n\n");
    out.push_str(&format!(
        "{} {} | region {} ({}) | run mode {}\n",
        data.tool_name, data.tool_version, data.region_label, data.region, data.run_mode
    ));
    out.push_str(&format!(
        "Cells: {}  Genes: {}  Selections: {}\n\n",
        data.n_cells, data.n_genes, data.n_selections
    ));

    out.push_str(&format!("1. Theta panels ({})\n", data.theta_mode));
    push_panels(&mut out, &data.theta_panels);
    out.push('\n');

    out.push_str(&format!("2. Component panels ({})\n", data.components_mode));
    push_panels(&mut out, &data.components_panels);
    out.push('\n');

    out.push_str("3. Contribution heatmap\n");
    out.push_str(&format!("Status: {}\n", data.heatmap_status));
    if let Some(key) = &data.heatmap_key {
        out.push_str(&format!("Selection: {key}\n"));
    }
    if let Some((rows, cols)) = data.heatmap_shape {
        out.push_str(&format!("Matrix: {rows} x {cols}\n"));
    }
    out.push('\n');

    out.push_str("4. Other views\n");
    match data.figure_traces {
        Some(n) => out.push_str(&format!(
            "Figure traces: {} ({} failed to decode)\n",
            n, data.figure_failures
        )),
        None => out.push_str("Figure traces: none\n"),
    }
    let side = |present: bool| if present { "yes" } else { "missing" };
    out.push_str(&format!(
        "Comparison ({}): without theta {}, with theta {}\n",
        data.comparison_filter,
        side(data.comparison_sides[0]),
        side(data.comparison_sides[1])
    ));
    match data.sankey_links {
        Some(n) => out.push_str(&format!("Transition links: {n}\n")),
        None => out.push_str("Transition links: none\n"),
    }
    out.push_str(&format!("Gene scatter: {}\n", data.gene_scatter_status));
    for failure in &data.side_failures {
        out.push_str(&format!("Skipped input: {failure}\n"));
    }

    out
}

fn push_panels(out: &mut String, panels: &[PanelLine]) {
    for p in panels {
        let mean = p.mean.map(format_f64_3).unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("  {:<36} N={:<6} mean={}", p.title, p.n, mean));
        if let Some(note) = &p.note {
            out.push_str(&format!("  [{note}]"));
        }
        out.push('\n');
    }
}
