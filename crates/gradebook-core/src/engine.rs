//! Central grading pipeline.
//!
//! Statistics are computed for the whole cohort first, then every student is
//! scored, graded, aggregated, categorized, and finally ranked. Every step is
//! a pure function of the roster and the settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::access::{effective_record, raw_score};
use crate::aggregate::best_six;
use crate::category::classify;
use crate::config::GradingSettings;
use crate::grading::assign_grade;
use crate::model::{ComputedSubject, ProcessedStudent, Roster, StudentRecord};
use crate::ranking::rank_students;
use crate::scoring::score_breakdown;
use crate::statistics::{ClassStatistics, SummaryStats};

pub use crate::statistics::compute_class_statistics;

/// Statistics plus the ranked students they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingOutcome {
    pub statistics: ClassStatistics,
    pub students: Vec<ProcessedStudent>,
}

/// Grade a whole roster: statistics first, then every student.
pub fn grade_cohort(roster: &Roster, settings: &GradingSettings) -> GradingOutcome {
    let statistics = compute_class_statistics(&roster.students, settings);
    let students = process_students(&statistics, &roster.students, &roster.facilitators, settings);
    GradingOutcome {
        statistics,
        students,
    }
}

/// Score, grade and rank every student against precomputed `stats`.
///
/// The result is sorted by `settings.sort_order` with ranks assigned.
pub fn process_students(
    stats: &ClassStatistics,
    students: &[StudentRecord],
    facilitators: &BTreeMap<String, String>,
    settings: &GradingSettings,
) -> Vec<ProcessedStudent> {
    let processed: Vec<ProcessedStudent> = students
        .iter()
        .map(|student| process_student(stats, student, facilitators, settings))
        .collect();

    let ranked = rank_students(processed, settings.sort_order);
    tracing::info!(
        students = ranked.len(),
        subjects = settings.subjects.len(),
        sort_order = %settings.sort_order,
        "processed cohort"
    );
    ranked
}

fn process_student(
    stats: &ClassStatistics,
    student: &StudentRecord,
    facilitators: &BTreeMap<String, String>,
    settings: &GradingSettings,
) -> ProcessedStudent {
    let record = effective_record(student, settings.period.as_deref());

    let subjects: Vec<ComputedSubject> = settings
        .subjects
        .iter()
        .map(|subject| {
            let raw = raw_score(record, subject);
            let breakdown = score_breakdown(&raw, subject, settings);
            let subject_stats = stats
                .subject(subject)
                .map(|s| s.composite)
                .unwrap_or_else(|| SummaryStats::from_values(&[], stats.variance));
            let assignment = assign_grade(breakdown.composite, &subject_stats, &settings.thresholds);

            ComputedSubject {
                subject: subject.clone(),
                section_a: raw.section_a,
                section_b: raw.section_b,
                exam_total: breakdown.exam_total,
                normalized_exam: breakdown.normalized_exam,
                sba_score: raw.sba_score,
                composite_score: breakdown.composite,
                z_score: assignment.z_score,
                grade: assignment.grade,
                grade_value: assignment.grade.value(),
                remark: assignment.grade.remark().to_string(),
                facilitator: facilitators.get(subject).cloned(),
            }
        })
        .collect();

    let total_score: f64 = subjects.iter().map(|s| s.composite_score).sum();
    let best = best_six(
        &subjects,
        |name| settings.is_core(name),
        settings.best_core_count,
        settings.best_elective_count,
    );
    let category = classify(best.aggregate, &settings.categories, &settings.default_category);

    tracing::debug!(
        student = student.id.as_str(),
        total_score,
        aggregate = best.aggregate,
        category,
        "processed student"
    );

    ProcessedStudent {
        id: student.id.clone(),
        name: student.name.clone(),
        subjects,
        total_score,
        best_six_aggregate: best.aggregate,
        best_core: best.core,
        best_electives: best.electives,
        category: category.to_string(),
        rank: 0,
        attendance: record.attendance,
        conduct: record.conduct.clone(),
    }
}
