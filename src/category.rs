//! Documentation categories used to order output within a root.

/// Known categories in priority order. The first category whose name is a
/// segment of the document's path wins.
pub const CATEGORIES: &[(&str, u32)] = &[
    ("decisions", 0),
    ("constraints", 1),
    ("architecture", 2),
    ("playbooks", 3),
];

/// Weight of a document that belongs to no known category.
pub const UNCATEGORIZED_WEIGHT: u32 = 100;

/// Classify a `/`-separated root-relative path.
pub fn classify(relative_path: &str) -> Option<(&'static str, u32)> {
    CATEGORIES
        .iter()
        .find(|(name, _)| relative_path.split('/').any(|segment| segment == *name))
        .copied()
}

/// Ordering weight for a root-relative path.
pub fn weight(relative_path: &str) -> u32 {
    classify(relative_path)
        .map(|(_, weight)| weight)
        .unwrap_or(UNCATEGORIZED_WEIGHT)
}
