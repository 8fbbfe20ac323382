/// Coarse class order shared by the transition links and their node labels.
pub const SIMPLIFIED_CLASSES: [&str; 10] = [
    "Astro", "CA1", "CA2", "CA3", "DG", "L5", "L6", "Oligo", "Other", "Zero",
];

const PREFIX_TABLE: &[(&str, &[&str])] = &[
    ("CA1", &["016 CA1"]),
    ("CA2", &["025 CA2"]),
    ("CA3", &["017 CA3"]),
    ("DG", &["037 DG Glut", "038 DG-PIR"]),
    ("Astro", &["319 Astro"]),
    ("Oligo", &["327 Oligo"]),
    ("L5", &["005 L5 IT", "022 L5 ET", "032 L5 NP"]),
    ("L6", &["030 L6 CT", "004 L6 IT", "029 L6b CTX"]),
    ("Zero", &["Zero"]),
];

const DEFAULT_PREDICTED_PREFIXES: &[&str] = &["037 DG Glut", "038 DG-PIR"];
const DEFAULT_DESIRED_PREFIX: &str = "016 CA1";

/// Maps a full taxonomy label onto one of [`SIMPLIFIED_CLASSES`].
pub fn simplify_class_label(label: &str) -> &'static str {
    for (simple, prefixes) in PREFIX_TABLE {
        if prefixes.iter().any(|p| label.starts_with(p)) {
            return simple;
        }
    }
    "Other"
}

pub fn simplified_class_index(simple: &str) -> Option<usize> {
    SIMPLIFIED_CLASSES.iter().position(|c| *c == simple)
}

/// Both DG variants when present, otherwise the first known class.
pub fn default_predicted_classes(all_class_names: &[String]) -> Vec<String> {
    let dg: Vec<String> = all_class_names
        .iter()
        .filter(|name| {
            DEFAULT_PREDICTED_PREFIXES
                .iter()
                .any(|p| name.starts_with(p))
        })
        .cloned()
        .collect();
    if !dg.is_empty() {
        return dg;
    }
    all_class_names.first().cloned().into_iter().collect()
}

pub fn default_desired_class(comparison_classes: &[String]) -> Option<String> {
    comparison_classes
        .iter()
        .find(|name| name.starts_with(DEFAULT_DESIRED_PREFIX))
        .or_else(|| comparison_classes.first())
        .cloned()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/classes.rs"]
mod tests;
