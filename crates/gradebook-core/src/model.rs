//! Core data model types for gradebook.
//!
//! Raw per-period score records flow in, [`ProcessedStudent`] values flow
//! out. Everything here is plain data; the pipeline lives in
//! [`crate::engine`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// Raw scores for one student in one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRawScore {
    /// Objective section score.
    #[serde(default)]
    pub section_a: f64,
    /// Theory section score.
    #[serde(default)]
    pub section_b: f64,
    /// School-based assessment score.
    #[serde(default)]
    pub sba_score: f64,
    /// Flat exam score from records that predate sectioned scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SubjectRawScore {
    /// Resolve the exam total used for normalization.
    ///
    /// Sections are summed unless both are zero, in which case a positive
    /// legacy `score` stands in as the total.
    pub fn exam_total(&self) -> f64 {
        if self.section_a == 0.0 && self.section_b == 0.0 {
            match self.score {
                Some(legacy) if legacy > 0.0 => legacy,
                _ => 0.0,
            }
        } else {
            self.section_a + self.section_b
        }
    }
}

/// The score set recorded for one evaluation period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Raw scores keyed by subject name.
    #[serde(default)]
    pub scores: BTreeMap<String, SubjectRawScore>,
    /// Days attended, if recorded.
    #[serde(default)]
    pub attendance: Option<u32>,
    /// Conduct remark, if recorded.
    #[serde(default)]
    pub conduct: Option<String>,
}

/// A student on the roster with a default record and optional per-period
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique identifier (admission number or similar).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Record used when no period-specific record exists.
    #[serde(default)]
    pub record: ScoreRecord,
    /// Period-specific records keyed by period id (e.g. "term-2").
    #[serde(default)]
    pub periods: BTreeMap<String, ScoreRecord>,
}

/// The roster as supplied by the roster store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    /// Facilitator name keyed by subject.
    #[serde(default)]
    pub facilitators: BTreeMap<String, String>,
}

/// Grade bands from best (`A1`) to worst (`F9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A1,
    B2,
    B3,
    C4,
    C5,
    C6,
    D7,
    E8,
    F9,
}

impl Grade {
    /// All bands in evaluation order.
    pub const ALL: [Grade; 9] = [
        Grade::A1,
        Grade::B2,
        Grade::B3,
        Grade::C4,
        Grade::C5,
        Grade::C6,
        Grade::D7,
        Grade::E8,
        Grade::F9,
    ];

    /// Numeric grade value, 1 (best) to 9 (worst).
    pub fn value(self) -> u8 {
        match self {
            Grade::A1 => 1,
            Grade::B2 => 2,
            Grade::B3 => 3,
            Grade::C4 => 4,
            Grade::C5 => 5,
            Grade::C6 => 6,
            Grade::D7 => 7,
            Grade::E8 => 8,
            Grade::F9 => 9,
        }
    }

    pub fn remark(self) -> &'static str {
        match self {
            Grade::A1 => "Excellent",
            Grade::B2 => "Very Good",
            Grade::B3 => "Good",
            Grade::C4 | Grade::C5 | Grade::C6 => "Credit",
            Grade::D7 | Grade::E8 => "Pass",
            Grade::F9 => "Fail",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Grade::A1 => "A1",
            Grade::B2 => "B2",
            Grade::B3 => "B3",
            Grade::C4 => "C4",
            Grade::C5 => "C5",
            Grade::C6 => "C6",
            Grade::D7 => "D7",
            Grade::E8 => "E8",
            Grade::F9 => "F9",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Grade {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.code() == upper)
            .ok_or_else(|| InputError::UnknownGrade(s.to_string()))
    }
}

/// One graded subject for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedSubject {
    pub subject: String,
    pub section_a: f64,
    pub section_b: f64,
    /// Exam total after the legacy-score fallback.
    pub exam_total: f64,
    /// Exam total after normalization to the 0-100 scale (if configured).
    pub normalized_exam: f64,
    pub sba_score: f64,
    /// Blended subject score the grade is computed from.
    pub composite_score: f64,
    /// Distance from the cohort mean in standard deviations.
    pub z_score: f64,
    pub grade: Grade,
    pub grade_value: u8,
    pub remark: String,
    #[serde(default)]
    pub facilitator: Option<String>,
}

/// A student after the full pipeline has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedStudent {
    pub id: String,
    pub name: String,
    /// Every subject in the cohort's subject list, in list order.
    pub subjects: Vec<ComputedSubject>,
    /// Sum of composite scores across all subjects.
    pub total_score: f64,
    /// Sum of grade values over the selected core and elective subjects.
    pub best_six_aggregate: u32,
    pub best_core: Vec<ComputedSubject>,
    pub best_electives: Vec<ComputedSubject>,
    pub category: String,
    /// 1-based position after sorting.
    pub rank: usize,
    #[serde(default)]
    pub attendance: Option<u32>,
    #[serde(default)]
    pub conduct: Option<String>,
}

impl ProcessedStudent {
    /// Look up a computed subject by name.
    pub fn subject(&self, name: &str) -> Option<&ComputedSubject> {
        self.subjects.iter().find(|s| s.subject == name)
    }
}
