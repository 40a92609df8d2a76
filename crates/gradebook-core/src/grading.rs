//! Z-score banding.

use serde::{Deserialize, Serialize};

use crate::config::GradingThresholds;
use crate::model::Grade;
use crate::statistics::SummaryStats;

/// Grade given to every score when the cohort has no spread.
pub const DEGENERATE_GRADE: Grade = Grade::C4;

/// Grade given below the lowest cut-off.
pub const FLOOR_GRADE: Grade = Grade::F9;

/// Result of grading one composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeAssignment {
    pub grade: Grade,
    /// Zero when the degenerate policy applied.
    pub z_score: f64,
}

/// Map a z-score to the first band whose cut-off it meets, best first.
pub fn band_for_z(z: f64, thresholds: &GradingThresholds) -> Grade {
    thresholds
        .bands()
        .into_iter()
        .find(|&(_, cutoff)| z >= cutoff)
        .map(|(grade, _)| grade)
        .unwrap_or(FLOOR_GRADE)
}

/// Grade `score` against cohort `stats`.
pub fn assign_grade(
    score: f64,
    stats: &SummaryStats,
    thresholds: &GradingThresholds,
) -> GradeAssignment {
    if stats.is_degenerate() {
        return GradeAssignment {
            grade: DEGENERATE_GRADE,
            z_score: 0.0,
        };
    }

    let z_score = (score - stats.mean) / stats.std_dev;
    GradeAssignment {
        grade: band_for_z(z_score, thresholds),
        z_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::VarianceMode;

    fn cohort() -> SummaryStats {
        SummaryStats::from_values(&[50.0, 70.0, 90.0], VarianceMode::Population)
    }

    #[test]
    fn scenario_three_students() {
        let thresholds = GradingThresholds::default();
        let stats = cohort();

        let top = assign_grade(90.0, &stats, &thresholds);
        assert!((top.z_score - 1.2247).abs() < 0.001);
        assert_eq!(top.grade, Grade::B2);

        let middle = assign_grade(70.0, &stats, &thresholds);
        assert_eq!(middle.grade, Grade::C4);

        let bottom = assign_grade(50.0, &stats, &thresholds);
        assert!((bottom.z_score + 1.2247).abs() < 0.001);
        assert_eq!(bottom.grade, Grade::D7);
    }

    #[test]
    fn cutoffs_are_inclusive() {
        let thresholds = GradingThresholds::default();
        assert_eq!(band_for_z(1.5, &thresholds), Grade::A1);
        assert_eq!(band_for_z(1.4999, &thresholds), Grade::B2);
        assert_eq!(band_for_z(0.0, &thresholds), Grade::C4);
        assert_eq!(band_for_z(-2.0, &thresholds), Grade::E8);
    }

    #[test]
    fn below_lowest_cutoff_fails() {
        let thresholds = GradingThresholds::default();
        assert_eq!(band_for_z(-2.01, &thresholds), Grade::F9);
        assert_eq!(band_for_z(f64::NEG_INFINITY, &thresholds), Grade::F9);
    }

    #[test]
    fn no_spread_gives_default_grade() {
        let stats = SummaryStats::from_values(&[60.0, 60.0, 60.0], VarianceMode::Population);
        let result = assign_grade(60.0, &stats, &GradingThresholds::default());
        assert_eq!(result.grade, Grade::C4);
        assert_eq!(result.grade.remark(), "Credit");
        assert_eq!(result.z_score, 0.0);
    }

    #[test]
    fn higher_scores_never_grade_worse() {
        let thresholds = GradingThresholds::default();
        let stats = cohort();
        let mut previous = u8::MAX;
        for score in (0..=120).map(f64::from) {
            let value = assign_grade(score, &stats, &thresholds).grade.value();
            assert!(value <= previous, "score {score} graded {value} after {previous}");
            previous = value;
        }
    }
}
