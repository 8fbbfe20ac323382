use super::*;
use crate::model::{CellRecord, Region};

fn cell(num: i64, flags: &[&str]) -> CellRecord {
    flags
        .iter()
        .fold(CellRecord::new(num), |c, f| c.with_flag(f))
}

#[test]
fn test_panel_set_exact_order_ca1() {
    let panels = build_panels(Region::Ca1);
    let titles: Vec<&str> = panels.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "CA1 in CA1",
            "CA2 in CA1",
            "CA3 in CA1",
            "DG in CA1",
            "L2/3 in CA1",
            "L4/5 in CA1",
            "L6 in CA1",
            "non-CA1 in CA1",
            "Zero in CA1",
        ]
    );
}

#[test]
fn test_titles_use_display_name() {
    let panels = build_panels(Region::Dg);
    assert_eq!(panels[0].title, "Dentate Gyrus (DG) in Dentate Gyrus (DG)");
    assert_eq!(panels[7].title, "non-Dentate Gyrus (DG) in Dentate Gyrus (DG)");
}

#[test]
fn test_other_panel_excludes_zero() {
    let panels = build_panels(Region::Ca1);
    let other = &panels[7];
    assert_eq!(other.predicate.terms.len(), 3);

    for flags in [
        vec!["in_ca1", "is_zero"],
        vec!["in_ca1", "is_ca1", "is_zero"],
        vec!["is_zero"],
        vec!["is_ca1", "is_zero"],
    ] {
        assert!(!other.matches(&cell(1, &flags)), "flags {flags:?}");
    }
    assert!(other.matches(&cell(2, &["in_ca1", "is_dg"])));
    assert!(!other.matches(&cell(3, &["in_ca1", "is_ca1"])));
}

#[test]
fn test_every_panel_requires_region_membership() {
    let panels = build_panels(Region::Ca3);
    let everything = cell(
        1,
        &[
            "is_ca3", "is_ca2", "is_dg", "is_L23", "is_L45", "is_L6", "is_zero",
        ],
    );
    assert!(panels.iter().all(|p| !p.matches(&everything)));
    for p in &panels {
        assert_eq!(p.predicate.terms[0].flag, "in_ca3");
        assert!(p.predicate.terms[0].expected);
    }
}

#[test]
fn test_partition_keeps_order_and_overlap() {
    let cells = vec![
        cell(1, &["in_ca1", "is_ca1"]),
        cell(2, &["in_ca1", "is_dg"]),
        cell(3, &["in_ca2", "is_dg"]),
        cell(4, &["in_ca1", "is_dg", "is_L6"]),
        cell(5, &["in_ca1", "is_zero"]),
    ];
    let panels = build_panels(Region::Ca1);
    let parts = partition(&panels, &cells);
    let nums = |i: usize| parts[i].iter().map(|c| c.cell_num).collect::<Vec<_>>();

    assert_eq!(parts.len(), 9);
    assert_eq!(nums(0), vec![1]);
    assert_eq!(nums(3), vec![2, 4]);
    assert_eq!(nums(6), vec![4]);
    assert_eq!(nums(7), vec![2, 4]);
    assert_eq!(nums(8), vec![5]);
    assert_eq!(cells[1].flags().count(), 2);
}

#[test]
fn test_panel_set_order_stable() {
    let a = build_panels(Region::Ca2);
    let b = build_panels(Region::Ca2);
    assert_eq!(a, b);
    assert_eq!(defs::builtin_panels().len(), 9);
}
