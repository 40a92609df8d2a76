//! Exam normalization and SBA blending.

use crate::config::{GradingSettings, Normalization, SbaConfig};
use crate::model::SubjectRawScore;

/// Rescale a raw exam total to 0-100 when `subject` is a normalization
/// target; otherwise return it unchanged.
pub fn normalize_exam_score(raw: f64, subject: &str, normalization: &Normalization) -> f64 {
    match normalization.max_score_for(subject) {
        Some(max) => (raw / max) * 100.0,
        None => raw,
    }
}

/// Blend the normalized exam score with the SBA score.
///
/// Weights are applied literally as percentages; they are not rescaled to
/// sum to 100.
pub fn blend_composite(exam_normalized: f64, sba: f64, config: &SbaConfig) -> f64 {
    if !config.enabled {
        return exam_normalized;
    }
    sba * (config.sba_weight / 100.0) + exam_normalized * (config.exam_weight / 100.0)
}

/// Intermediate values for one subject score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub exam_total: f64,
    pub normalized_exam: f64,
    pub composite: f64,
}

pub fn score_breakdown(
    raw: &SubjectRawScore,
    subject: &str,
    settings: &GradingSettings,
) -> ScoreBreakdown {
    let exam_total = raw.exam_total();
    let normalized_exam = normalize_exam_score(exam_total, subject, &settings.normalization);
    ScoreBreakdown {
        exam_total,
        normalized_exam,
        composite: blend_composite(normalized_exam, raw.sba_score, &settings.sba),
    }
}

/// Composite score for one raw subject record.
pub fn composite_for(raw: &SubjectRawScore, subject: &str, settings: &GradingSettings) -> f64 {
    score_breakdown(raw, subject, settings).composite
}
