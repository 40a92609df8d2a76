//! Cohort statistics for norm-referenced grading.
//!
//! Statistics are computed once per roster + settings snapshot and then
//! treated as read-only while every student is graded against them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::access::{effective_record, raw_score};
use crate::config::GradingSettings;
use crate::model::StudentRecord;
use crate::scoring::composite_for;

/// Spreads below this are reported as zero.
const SPREAD_EPSILON: f64 = 1e-9;

/// Divisor used for the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarianceMode {
    /// Divide by `n`.
    Population,
    /// Divide by `n - 1` (Bessel's correction).
    Sample,
}

impl fmt::Display for VarianceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarianceMode::Population => write!(f, "population"),
            VarianceMode::Sample => write!(f, "sample"),
        }
    }
}

/// Mean and standard deviation of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SummaryStats {
    /// Compute mean and standard deviation of `values`.
    ///
    /// Fewer than two values yields a standard deviation of zero, and an
    /// empty series a mean of zero.
    pub fn from_values(values: &[f64], mode: VarianceMode) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                count: 0,
            };
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        if n < 2 {
            return Self {
                mean,
                std_dev: 0.0,
                count: n,
            };
        }

        let divisor = match mode {
            VarianceMode::Population => n as f64,
            VarianceMode::Sample => (n - 1) as f64,
        };
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / divisor;
        let std_dev = variance.sqrt();

        Self {
            mean,
            std_dev: if std_dev < SPREAD_EPSILON { 0.0 } else { std_dev },
            count: n,
        }
    }

    /// True when the series has no spread to grade against.
    pub fn is_degenerate(&self) -> bool {
        self.std_dev == 0.0
    }
}

/// Statistics for one subject across the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectStatistics {
    /// Over composite scores; grades are assigned against this.
    pub composite: SummaryStats,
    /// Over raw objective-section scores.
    pub section_a: SummaryStats,
    /// Over raw theory-section scores.
    pub section_b: SummaryStats,
}

/// Per-subject statistics for a whole cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    pub variance: VarianceMode,
    pub subjects: BTreeMap<String, SubjectStatistics>,
}

impl ClassStatistics {
    pub fn subject(&self, name: &str) -> Option<&SubjectStatistics> {
        self.subjects.get(name)
    }
}

/// Compute per-subject statistics over every student on the roster.
///
/// Each student contributes exactly one value per subject; a missing subject
/// entry counts as all-zero scores.
pub fn compute_class_statistics(
    students: &[StudentRecord],
    settings: &GradingSettings,
) -> ClassStatistics {
    let mode = settings.variance_mode();
    let period = settings.period.as_deref();

    let mut subjects = BTreeMap::new();
    for subject in &settings.subjects {
        let mut composites = Vec::with_capacity(students.len());
        let mut section_a = Vec::with_capacity(students.len());
        let mut section_b = Vec::with_capacity(students.len());

        for student in students {
            let raw = raw_score(effective_record(student, period), subject);
            composites.push(composite_for(&raw, subject, settings));
            section_a.push(raw.section_a);
            section_b.push(raw.section_b);
        }

        let stats = SubjectStatistics {
            composite: SummaryStats::from_values(&composites, mode),
            section_a: SummaryStats::from_values(&section_a, mode),
            section_b: SummaryStats::from_values(&section_b, mode),
        };
        tracing::debug!(
            subject = subject.as_str(),
            mean = stats.composite.mean,
            std_dev = stats.composite.std_dev,
            "computed subject statistics"
        );
        subjects.insert(subject.clone(), stats);
    }

    ClassStatistics {
        variance: mode,
        subjects,
    }
}
