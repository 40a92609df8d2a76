//! Roster and settings parsing.
//!
//! Loads rosters from TOML or JSON files and directories, and validates
//! settings for common authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::GradingSettings;
use crate::error::InputError;
use crate::model::Roster;

/// Parse a roster file, choosing TOML or JSON by extension.
pub fn parse_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_roster_str(&content, path),
        Some("json") => parse_roster_json(&content, path),
        other => Err(InputError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

/// Parse a TOML string into a `Roster` (useful for testing).
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<Roster> {
    let roster: Roster = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    check_unique_ids(&roster)?;
    Ok(roster)
}

/// Parse a JSON string into a `Roster`.
pub fn parse_roster_json(content: &str, source_path: &Path) -> Result<Roster> {
    let roster: Roster = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
    check_unique_ids(&roster)?;
    Ok(roster)
}

fn check_unique_ids(roster: &Roster) -> Result<(), InputError> {
    let mut seen = HashSet::new();
    for student in &roster.students {
        if !seen.insert(student.id.as_str()) {
            return Err(InputError::DuplicateStudent(student.id.clone()));
        }
    }
    Ok(())
}

/// Load every roster file in a directory and merge them into one cohort.
///
/// Files that fail to parse are skipped with a warning; a duplicate id
/// across files is an error.
pub fn load_roster_directory(dir: &Path) -> Result<Roster> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    let mut merged = Roster::default();
    for path in paths {
        let is_roster = path
            .extension()
            .is_some_and(|ext| ext == "toml" || ext == "json");
        if !path.is_file() || !is_roster {
            continue;
        }
        match parse_roster(&path) {
            Ok(roster) => {
                merged.students.extend(roster.students);
                for (subject, name) in roster.facilitators {
                    merged.facilitators.entry(subject).or_insert(name);
                }
            }
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
            }
        }
    }

    check_unique_ids(&merged)?;
    Ok(merged)
}

/// Load a roster from a file or a directory of files.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if path.is_dir() {
        load_roster_directory(path)
    } else {
        parse_roster(path)
    }
}

/// Parse a TOML settings string.
pub fn parse_settings_str(content: &str, source_path: &Path) -> Result<GradingSettings> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse settings: {}", source_path.display()))
}

/// A warning from settings validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The settings section the warning refers to.
    pub section: &'static str,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(section: &'static str, message: impl Into<String>) -> Self {
        Self {
            section,
            message: message.into(),
        }
    }
}

/// Validate settings for common authoring issues.
///
/// The pipeline never consults these warnings; every input still resolves
/// to a defined result.
pub fn validate_settings(settings: &GradingSettings) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if settings.subjects.is_empty() {
        warnings.push(ValidationWarning::new("subjects", "subject list is empty"));
    }

    let mut seen = HashSet::new();
    for subject in &settings.subjects {
        if !seen.insert(subject.as_str()) {
            warnings.push(ValidationWarning::new(
                "subjects",
                format!("duplicate subject: {subject}"),
            ));
        }
    }

    for core in &settings.core_subjects {
        if !settings.subjects.contains(core) {
            warnings.push(ValidationWarning::new(
                "core_subjects",
                format!("core subject '{core}' is not in the subject list"),
            ));
        }
    }

    if !settings.thresholds.is_monotonic() {
        warnings.push(ValidationWarning::new(
            "thresholds",
            "cut-offs must not increase from A1 down to E8",
        ));
    }

    if settings.normalization.is_enabled() {
        let targets = settings.normalization.targets();
        if targets.is_empty() {
            warnings.push(ValidationWarning::new(
                "normalization",
                "normalization is enabled but names no subject",
            ));
        }
        for (subject, max) in targets {
            if !settings.subjects.iter().any(|s| s == subject) {
                warnings.push(ValidationWarning::new(
                    "normalization",
                    format!("normalized subject '{subject}' is not in the subject list"),
                ));
            }
            if max <= 0.0 {
                warnings.push(ValidationWarning::new(
                    "normalization",
                    format!("max_score for '{subject}' must be positive; raw totals will pass through"),
                ));
            }
        }
    }

    if settings.sba.enabled {
        let sum = settings.sba.sba_weight + settings.sba.exam_weight;
        if (sum - 100.0).abs() > 1e-9 {
            warnings.push(ValidationWarning::new(
                "sba",
                format!("sba_weight + exam_weight = {sum}, not 100; weights are applied as given"),
            ));
        }
    }

    for (i, range) in settings.categories.iter().enumerate() {
        if range.min > range.max {
            warnings.push(ValidationWarning::new(
                "categories",
                format!("category '{}' has min {} above max {}", range.label, range.min, range.max),
            ));
        }
        for earlier in &settings.categories[..i] {
            if range.min <= earlier.max && earlier.min <= range.max {
                warnings.push(ValidationWarning::new(
                    "categories",
                    format!(
                        "category '{}' overlaps '{}'; the earlier range wins",
                        range.label, earlier.label
                    ),
                ));
            }
        }
    }

    if settings.best_core_count + settings.best_elective_count == 0 {
        warnings.push(ValidationWarning::new(
            "aggregate",
            "best_core_count and best_elective_count are both zero",
        ));
    }

    warnings
}
