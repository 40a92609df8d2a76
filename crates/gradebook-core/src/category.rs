//! Aggregate-to-category mapping.

use crate::config::CategoryThreshold;

/// Label of the first range containing `aggregate`, or `default_label`.
///
/// Ranges are checked in configured order; gaps and overlaps are allowed.
pub fn classify<'a>(
    aggregate: u32,
    ranges: &'a [CategoryThreshold],
    default_label: &'a str,
) -> &'a str {
    ranges
        .iter()
        .find(|r| r.contains(aggregate))
        .map(|r| r.label.as_str())
        .unwrap_or(default_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges() -> Vec<CategoryThreshold> {
        vec![
            CategoryThreshold::new("Distinction", 6, 12),
            CategoryThreshold::new("Merit", 13, 24),
            CategoryThreshold::new("Overlap", 20, 30),
        ]
    }

    #[test]
    fn bounds_are_inclusive() {
        let ranges = ranges();
        assert_eq!(classify(6, &ranges, "Pass"), "Distinction");
        assert_eq!(classify(12, &ranges, "Pass"), "Distinction");
        assert_eq!(classify(13, &ranges, "Pass"), "Merit");
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(classify(22, &ranges(), "Pass"), "Merit");
        assert_eq!(classify(26, &ranges(), "Pass"), "Overlap");
    }

    #[test]
    fn unmatched_uses_default() {
        assert_eq!(classify(40, &ranges(), "Pass"), "Pass");
        assert_eq!(classify(3, &[], "Pass"), "Pass");
    }
}
