use std::collections::BTreeSet;

use crate::contrib::{ContributionRow, DenseRow};

/// Expands the rows whose predicted class is in `predicted_class_filter`
/// into dense vectors of length `gene_count`, keeping input order.
///
/// Pairs are applied in listed order so a repeated index keeps its last
/// value. Indices outside `0..gene_count` are skipped.
pub fn expand(
    rows: &[ContributionRow],
    gene_count: usize,
    predicted_class_filter: &BTreeSet<String>,
) -> Vec<DenseRow> {
    if predicted_class_filter.is_empty() {
        return Vec::new();
    }

    let mut dropped = 0usize;
    let out: Vec<DenseRow> = rows
        .iter()
        .filter(|r| predicted_class_filter.contains(&r.predicted_class))
        .map(|r| {
            let mut dense = vec![0.0; gene_count];
            for &(idx, value) in &r.tops {
                match usize::try_from(idx) {
                    Ok(i) if i < gene_count => dense[i] = value,
                    _ => dropped += 1,
                }
            }
            DenseRow {
                cell_num: r.cell_num,
                predicted_class: r.predicted_class.clone(),
                dense,
            }
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, gene_count, "skipped out-of-range contribution indices");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/contrib/expand.rs"]
mod tests;
