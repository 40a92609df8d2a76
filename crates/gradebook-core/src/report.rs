//! Results report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::GradingOutcome;
use crate::model::ProcessedStudent;
use crate::ranking::SortOrder;
use crate::statistics::ClassStatistics;

/// A complete results report for one grading run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Evaluation period graded, if any.
    pub period: Option<String>,
    pub sort_order: SortOrder,
    pub statistics: ClassStatistics,
    /// Per-subject grade distribution, in subject-list order.
    pub subject_summaries: Vec<SubjectSummary>,
    /// Ranked students.
    pub students: Vec<ProcessedStudent>,
}

/// Spread and grade distribution for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub subject: String,
    pub mean: f64,
    pub std_dev: f64,
    /// Count per grade code, e.g. `"B2" -> 3`.
    pub grade_counts: BTreeMap<String, usize>,
}

/// Count grades per subject across the processed students.
pub fn summarize_subjects(
    statistics: &ClassStatistics,
    students: &[ProcessedStudent],
) -> Vec<SubjectSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: BTreeMap<&str, BTreeMap<String, usize>> = BTreeMap::new();
    for student in students {
        for subject in &student.subjects {
            let entry = counts.entry(subject.subject.as_str()).or_insert_with(|| {
                order.push(subject.subject.as_str());
                BTreeMap::new()
            });
            *entry.entry(subject.grade.to_string()).or_default() += 1;
        }
    }

    order
        .into_iter()
        .map(|subject| {
            let composite = statistics.subject(subject).map(|s| s.composite);
            SubjectSummary {
                subject: subject.to_string(),
                mean: composite.map(|c| c.mean).unwrap_or(0.0),
                std_dev: composite.map(|c| c.std_dev).unwrap_or(0.0),
                grade_counts: counts.remove(subject).unwrap_or_default(),
            }
        })
        .collect()
}

impl ResultsReport {
    /// Wrap a grading outcome in a fresh report.
    pub fn new(outcome: GradingOutcome, period: Option<String>, sort_order: SortOrder) -> Self {
        let subject_summaries = summarize_subjects(&outcome.statistics, &outcome.students);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            period,
            sort_order,
            statistics: outcome.statistics,
            subject_summaries,
            students: outcome.students,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ResultsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the ranked result sheet as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Results\n\n");
        if let Some(period) = &self.period {
            md.push_str(&format!("**Period:** {period}  \n"));
        }
        md.push_str(&format!(
            "**Students:** {} | **Sorted by:** {}\n\n",
            self.students.len(),
            self.sort_order
        ));

        md.push_str("| Rank | ID | Name | Total | Aggregate | Category |\n");
        md.push_str("|------|----|------|-------|-----------|----------|\n");
        for s in &self.students {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1} | {} | {} |\n",
                s.rank, s.id, s.name, s.total_score, s.best_six_aggregate, s.category
            ));
        }
        md.push('\n');

        if !self.subject_summaries.is_empty() {
            md.push_str("### Subjects\n\n");
            md.push_str("| Subject | Mean | Std Dev | Grades |\n");
            md.push_str("|---------|------|---------|--------|\n");
            for summary in &self.subject_summaries {
                let grades = summary
                    .grade_counts
                    .iter()
                    .map(|(g, n)| format!("{g}: {n}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {} |\n",
                    summary.subject, summary.mean, summary.std_dev, grades
                ));
            }
        }

        md
    }
}
