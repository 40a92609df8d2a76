//! Roster ordering and rank assignment.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::model::ProcessedStudent;

/// Key the processed roster is sorted by before ranks are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    NameAsc,
    NameDesc,
    IdAsc,
    /// Total score, highest first.
    #[default]
    ScoreDesc,
    /// Best-six aggregate, lowest first; ties go to the higher total score.
    AggregateAsc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::NameAsc => write!(f, "name-asc"),
            SortOrder::NameDesc => write!(f, "name-desc"),
            SortOrder::IdAsc => write!(f, "id-asc"),
            SortOrder::ScoreDesc => write!(f, "score-desc"),
            SortOrder::AggregateAsc => write!(f, "aggregate-asc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name-asc" | "name" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "id-asc" | "id" => Ok(SortOrder::IdAsc),
            "score-desc" | "score" => Ok(SortOrder::ScoreDesc),
            "aggregate-asc" | "aggregate" => Ok(SortOrder::AggregateAsc),
            _ => Err(InputError::UnknownSortOrder(s.to_string())),
        }
    }
}

fn compare_names(a: &ProcessedStudent, b: &ProcessedStudent) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

impl SortOrder {
    /// Total ordering: the primary key, its fixed secondary key, then id.
    pub fn compare(self, a: &ProcessedStudent, b: &ProcessedStudent) -> Ordering {
        let primary = match self {
            SortOrder::NameAsc => compare_names(a, b),
            SortOrder::NameDesc => compare_names(b, a),
            SortOrder::IdAsc => Ordering::Equal,
            SortOrder::ScoreDesc => b
                .total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.best_six_aggregate.cmp(&b.best_six_aggregate)),
            SortOrder::AggregateAsc => a
                .best_six_aggregate
                .cmp(&b.best_six_aggregate)
                .then_with(|| b.total_score.total_cmp(&a.total_score)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Sort `students` by `order` and number them 1..=N.
///
/// Ties in the sort key still get distinct consecutive ranks.
pub fn rank_students(mut students: Vec<ProcessedStudent>, order: SortOrder) -> Vec<ProcessedStudent> {
    students.sort_by(|a, b| order.compare(a, b));
    for (position, student) in students.iter_mut().enumerate() {
        student.rank = position + 1;
    }
    students
}
