use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::report::{ReportError, SummaryData};

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Aggregator contract for pipeline runs.
pub fn pipeline_step_json(summary: &SummaryData) -> serde_json::Value {
    json!({
        "tool": summary.tool_name,
        "version": summary.tool_version,
        "input": {
            "region": summary.region,
            "n_cells": summary.n_cells,
            "n_genes": summary.n_genes,
            "n_selections": summary.n_selections,
        },
        "heatmap": {
            "status": summary.heatmap_status,
            "key": summary.heatmap_key,
        },
        "comparison": {
            "filter": summary.comparison_filter,
            "sankey_links": summary.sankey_links,
        },
        "gene_scatter": summary.gene_scatter_status,
        "skipped_inputs": summary.side_failures,
        "outputs": summary.outputs,
    })
}
