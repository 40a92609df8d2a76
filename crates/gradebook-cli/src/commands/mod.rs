//! Subcommand implementations.

pub mod init;
pub mod process;
pub mod stats;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use gradebook_core::config::{load_settings_from, GradingSettings};
use gradebook_core::engine::{grade_cohort, GradingOutcome};
use gradebook_core::parser::load_roster;

/// Load settings and apply a `--period` flag on top.
pub(crate) fn resolve_settings(
    settings_path: Option<PathBuf>,
    period: Option<String>,
) -> Result<GradingSettings> {
    let mut settings = load_settings_from(settings_path.as_deref())?;
    if let Some(period) = period {
        settings.period = Some(period);
    }
    Ok(settings)
}

/// Load a roster and run the full pipeline over it.
pub(crate) fn grade_roster(roster_path: &Path, settings: &GradingSettings) -> Result<GradingOutcome> {
    let roster = load_roster(roster_path)?;
    anyhow::ensure!(
        !roster.students.is_empty(),
        "roster has no students: {}",
        roster_path.display()
    );
    tracing::info!(
        "grading {} students across {} subjects",
        roster.students.len(),
        settings.subjects.len()
    );
    Ok(grade_cohort(&roster, settings))
}
