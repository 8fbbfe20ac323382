use super::*;

#[test]
fn test_thinning_boundary() {
    let idx = thin_labels(61, 60);
    assert_eq!(idx[0], 0);
    assert_eq!(idx[1], 2);
    assert_eq!(idx.len(), 31);
    assert!(idx.iter().all(|i| i % 2 == 0));
}

#[test]
fn test_thinning_fits_without_skipping() {
    assert_eq!(thin_labels(5, 60), vec![0, 1, 2, 3, 4]);
    assert_eq!(thin_labels(60, 60).len(), 60);
}

#[test]
fn test_thinning_edge_cases() {
    assert!(thin_labels(0, 60).is_empty());
    assert_eq!(thin_labels(10, 0), vec![0]);
    assert_eq!(thin_labels(10, 1), vec![0]);
    assert_eq!(thin_labels(10, 3), vec![0, 4, 8]);
}

#[test]
fn test_thin_vocabulary_values() {
    let vocab: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(thin_vocabulary(&vocab, 2), vec!["a", "d"]);
}
