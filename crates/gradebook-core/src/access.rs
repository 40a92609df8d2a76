//! Period-aware access to a student's raw scores.

use crate::model::{ScoreRecord, StudentRecord, SubjectRawScore};

/// Resolve the record to grade for `period`.
///
/// Falls back to the student's default record when no period is active or
/// the student has nothing recorded for it.
pub fn effective_record<'a>(student: &'a StudentRecord, period: Option<&str>) -> &'a ScoreRecord {
    period
        .and_then(|p| student.periods.get(p))
        .unwrap_or(&student.record)
}

/// Raw score for `subject`, all zeros when the record has no entry.
pub fn raw_score(record: &ScoreRecord, subject: &str) -> SubjectRawScore {
    record.scores.get(subject).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn student_with_term_two() -> StudentRecord {
        let mut default_scores = BTreeMap::new();
        default_scores.insert(
            "Mathematics".to_string(),
            SubjectRawScore {
                section_a: 10.0,
                section_b: 20.0,
                ..Default::default()
            },
        );
        let mut term_scores = BTreeMap::new();
        term_scores.insert(
            "Mathematics".to_string(),
            SubjectRawScore {
                section_a: 40.0,
                section_b: 45.0,
                ..Default::default()
            },
        );

        let mut periods = BTreeMap::new();
        periods.insert(
            "term-2".to_string(),
            ScoreRecord {
                scores: term_scores,
                attendance: Some(60),
                conduct: Some("Respectful".into()),
            },
        );

        StudentRecord {
            id: "S001".into(),
            name: "Kofi Mensah".into(),
            record: ScoreRecord {
                scores: default_scores,
                attendance: Some(55),
                conduct: None,
            },
            periods,
        }
    }

    #[test]
    fn period_record_wins_when_present() {
        let student = student_with_term_two();
        let record = effective_record(&student, Some("term-2"));
        assert_eq!(record.attendance, Some(60));
        assert_eq!(raw_score(record, "Mathematics").exam_total(), 85.0);
    }

    #[test]
    fn unknown_period_falls_back_to_default() {
        let student = student_with_term_two();
        let record = effective_record(&student, Some("term-3"));
        assert_eq!(record.attendance, Some(55));
        assert_eq!(raw_score(record, "Mathematics").exam_total(), 30.0);
    }

    #[test]
    fn no_period_uses_default() {
        let student = student_with_term_two();
        assert_eq!(effective_record(&student, None).attendance, Some(55));
    }

    #[test]
    fn missing_subject_is_all_zero() {
        let student = student_with_term_two();
        let raw = raw_score(&student.record, "French");
        assert_eq!(raw, SubjectRawScore::default());
    }
}
