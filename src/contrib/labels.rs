/// Indices of the tick labels to show for a vocabulary of `vocab_len`
/// entries when at most about `max_labels` fit: every `ceil(G/M)`-th index,
/// starting at 0. `max_labels == 0` is treated as 1.
pub fn thin_labels(vocab_len: usize, max_labels: usize) -> Vec<usize> {
    if vocab_len == 0 {
        return Vec::new();
    }
    let step = vocab_len.div_ceil(max_labels.max(1)).max(1);
    (0..vocab_len).step_by(step).collect()
}

pub fn thin_vocabulary(vocab: &[String], max_labels: usize) -> Vec<String> {
    thin_labels(vocab.len(), max_labels)
        .into_iter()
        .map(|i| vocab[i].clone())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/contrib/labels.rs"]
mod tests;
