use serde::Serialize;

use crate::contrib::{DenseRow, thin_vocabulary};

/// Rectangular heatmap ready for a renderer: `z[i]` is the row labelled
/// `y[i]`, and every row has one value per entry of `x`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapMatrix {
    pub z: Vec<Vec<f64>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub row_classes: Vec<String>,
    pub tick_values: Vec<String>,
}

impl HeatmapMatrix {
    pub fn n_rows(&self) -> usize {
        self.z.len()
    }

    pub fn n_cols(&self) -> usize {
        self.x.len()
    }
}

pub fn row_label(cell_num: i64, predicted_class: &str) -> String {
    format!("{cell_num} ({predicted_class})")
}

pub fn build_heatmap(
    genes: &[String],
    rows: Vec<DenseRow>,
    max_labels: usize,
) -> Result<HeatmapMatrix, String> {
    let mut z = Vec::with_capacity(rows.len());
    let mut y = Vec::with_capacity(rows.len());
    let mut row_classes = Vec::with_capacity(rows.len());
    for row in rows {
        if row.dense.len() != genes.len() {
            return Err(format!(
                "row for cell {} has {} columns, vocabulary has {}",
                row.cell_num,
                row.dense.len(),
                genes.len()
            ));
        }
        y.push(row_label(row.cell_num, &row.predicted_class));
        row_classes.push(row.predicted_class);
        z.push(row.dense);
    }
    Ok(HeatmapMatrix {
        z,
        x: genes.to_vec(),
        y,
        row_classes,
        tick_values: thin_vocabulary(genes, max_labels),
    })
}

pub fn predicted_class_label(selected: &[String]) -> String {
    match selected.len() {
        1 => selected[0].clone(),
        2 | 3 => selected.join(", "),
        n => format!("{n} classes"),
    }
}

pub fn heatmap_title(selected: &[String], region_label: &str) -> String {
    format!(
        "{} Cells in {}: Gene Contributions",
        predicted_class_label(selected),
        region_label
    )
}

pub fn heatmap_subtitle(top_n: u32, desired_class: &str) -> String {
    let genes = if top_n == 1 {
        "gene".to_string()
    } else {
        format!("{top_n} genes")
    };
    format!(
        "For each cell, showing the top {genes} with highest contribution difference (predicted class \u{2212} {desired_class})"
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/contrib/heatmap.rs"]
mod tests;
