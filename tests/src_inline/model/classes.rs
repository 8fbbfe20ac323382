use super::*;

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_simplify_class_label() {
    assert_eq!(simplify_class_label("016 CA1-ProS Glut"), "CA1");
    assert_eq!(simplify_class_label("038 DG-PIR Ex IMN"), "DG");
    assert_eq!(simplify_class_label("037 DG Glut"), "DG");
    assert_eq!(simplify_class_label("022 L5 ET CTX Glut"), "L5");
    assert_eq!(simplify_class_label("029 L6b CTX Glut"), "L6");
    assert_eq!(simplify_class_label("Zero"), "Zero");
    assert_eq!(simplify_class_label("100 Something"), "Other");
    assert_eq!(simplify_class_label(""), "Other");
}

#[test]
fn test_simplified_index_matches_order() {
    assert_eq!(simplified_class_index("Astro"), Some(0));
    assert_eq!(simplified_class_index("Zero"), Some(9));
    assert_eq!(simplified_class_index("Nope"), None);
}

#[test]
fn test_default_predicted_classes() {
    let all = names(&["016 CA1-ProS Glut", "037 DG Glut", "038 DG-PIR Ex IMN"]);
    assert_eq!(
        default_predicted_classes(&all),
        names(&["037 DG Glut", "038 DG-PIR Ex IMN"])
    );
    assert_eq!(
        default_predicted_classes(&names(&["X", "Y"])),
        names(&["X"])
    );
    assert!(default_predicted_classes(&[]).is_empty());
}

#[test]
fn test_default_desired_class() {
    let comp = names(&["025 CA2-FC-IG Glut", "016 CA1-ProS Glut"]);
    assert_eq!(
        default_desired_class(&comp).as_deref(),
        Some("016 CA1-ProS Glut")
    );
    assert_eq!(
        default_desired_class(&names(&["B"])).as_deref(),
        Some("B")
    );
    assert_eq!(default_desired_class(&[]), None);
}
