//! Grading settings and their loader.
//!
//! [`GradingSettings`] is an immutable value handed to every pipeline call.
//! Nothing in the pipeline reads global state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Grade;
use crate::parser::parse_settings_str;
use crate::ranking::SortOrder;
use crate::statistics::VarianceMode;

/// The single global normalization slot: one subject rescaled at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default)]
    pub is_locked: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            subject: String::new(),
            max_score: default_max_score(),
            is_locked: false,
        }
    }
}

fn default_max_score() -> f64 {
    100.0
}

/// Normalization parameters for several subjects at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSubjectNormalization {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub is_locked: bool,
    /// Maximum attainable exam total keyed by subject.
    #[serde(default)]
    pub max_scores: BTreeMap<String, f64>,
}

/// How exam totals are rescaled to 0-100.
///
/// `Single` reproduces the one-slot behaviour (only the configured subject
/// is ever rescaled). `PerSubject` generalizes it to a map. A table without
/// a `mode` key is read as `PerSubject` when it carries `max_scores`, and as
/// `Single` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", from = "NormalizationTable")]
pub enum Normalization {
    Single(NormalizationConfig),
    PerSubject(PerSubjectNormalization),
}

impl Default for Normalization {
    fn default() -> Self {
        Normalization::Single(NormalizationConfig::default())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum NormalizationMode {
    Single,
    PerSubject,
}

/// Flat form of a `[normalization]` table with an optional `mode` tag.
#[derive(Deserialize)]
struct NormalizationTable {
    #[serde(default)]
    mode: Option<NormalizationMode>,
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    is_locked: bool,
    #[serde(default)]
    subject: String,
    #[serde(default = "default_max_score")]
    max_score: f64,
    #[serde(default)]
    max_scores: Option<BTreeMap<String, f64>>,
}

impl From<NormalizationTable> for Normalization {
    fn from(table: NormalizationTable) -> Self {
        let mode = table.mode.unwrap_or(match table.max_scores {
            Some(_) => NormalizationMode::PerSubject,
            None => NormalizationMode::Single,
        });
        match mode {
            NormalizationMode::Single => Normalization::Single(NormalizationConfig {
                enabled: table.enabled,
                subject: table.subject,
                max_score: table.max_score,
                is_locked: table.is_locked,
            }),
            NormalizationMode::PerSubject => Normalization::PerSubject(PerSubjectNormalization {
                enabled: table.enabled,
                is_locked: table.is_locked,
                max_scores: table.max_scores.unwrap_or_default(),
            }),
        }
    }
}

impl Normalization {
    /// The positive maximum score to divide by, if `subject` is rescaled.
    pub fn max_score_for(&self, subject: &str) -> Option<f64> {
        let max = match self {
            Normalization::Single(slot) if slot.enabled && slot.subject == subject => {
                slot.max_score
            }
            Normalization::PerSubject(map) if map.enabled => *map.max_scores.get(subject)?,
            _ => return None,
        };
        (max > 0.0).then_some(max)
    }

    /// Subjects this configuration names, whether or not they are enabled.
    pub fn targets(&self) -> Vec<(&str, f64)> {
        match self {
            Normalization::Single(slot) if !slot.subject.is_empty() => {
                vec![(slot.subject.as_str(), slot.max_score)]
            }
            Normalization::Single(_) => Vec::new(),
            Normalization::PerSubject(map) => map
                .max_scores
                .iter()
                .map(|(s, m)| (s.as_str(), *m))
                .collect(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Normalization::Single(slot) => slot.enabled,
            Normalization::PerSubject(map) => map.enabled,
        }
    }
}

/// School-based assessment blending weights, as percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbaConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default = "default_sba_weight")]
    pub sba_weight: f64,
    #[serde(default = "default_exam_weight")]
    pub exam_weight: f64,
}

impl Default for SbaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            is_locked: false,
            sba_weight: default_sba_weight(),
            exam_weight: default_exam_weight(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_sba_weight() -> f64 {
    30.0
}
fn default_exam_weight() -> f64 {
    70.0
}

/// Minimum z-score for each band from `A1` down to `E8`.
///
/// Cut-offs left out of a settings table keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingThresholds {
    #[serde(rename = "A1")]
    pub a1: f64,
    #[serde(rename = "B2")]
    pub b2: f64,
    #[serde(rename = "B3")]
    pub b3: f64,
    #[serde(rename = "C4")]
    pub c4: f64,
    #[serde(rename = "C5")]
    pub c5: f64,
    #[serde(rename = "C6")]
    pub c6: f64,
    #[serde(rename = "D7")]
    pub d7: f64,
    #[serde(rename = "E8")]
    pub e8: f64,
}

impl Default for GradingThresholds {
    fn default() -> Self {
        Self {
            a1: 1.5,
            b2: 1.0,
            b3: 0.5,
            c4: 0.0,
            c5: -0.5,
            c6: -1.0,
            d7: -1.5,
            e8: -2.0,
        }
    }
}

impl GradingThresholds {
    /// Bands in the order they are evaluated, best first. `F9` is implied
    /// below the last cut-off.
    pub fn bands(&self) -> [(Grade, f64); 8] {
        [
            (Grade::A1, self.a1),
            (Grade::B2, self.b2),
            (Grade::B3, self.b3),
            (Grade::C4, self.c4),
            (Grade::C5, self.c5),
            (Grade::C6, self.c6),
            (Grade::D7, self.d7),
            (Grade::E8, self.e8),
        ]
    }

    /// True when every cut-off is no greater than the one above it.
    pub fn is_monotonic(&self) -> bool {
        self.bands().windows(2).all(|w| w[0].1 >= w[1].1)
    }
}

/// Inclusive aggregate range mapped to a performance category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryThreshold {
    pub label: String,
    pub min: u32,
    pub max: u32,
}

impl CategoryThreshold {
    pub fn new(label: &str, min: u32, max: u32) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, aggregate: u32) -> bool {
        self.min <= aggregate && aggregate <= self.max
    }
}

/// Everything the pipeline needs besides the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingSettings {
    /// Subjects graded for the cohort, in display order.
    #[serde(default = "default_subjects")]
    pub subjects: Vec<String>,
    /// Subjects counted in the core group of the best-six aggregate.
    #[serde(default = "default_core_subjects")]
    pub core_subjects: Vec<String>,
    #[serde(default)]
    pub normalization: Normalization,
    #[serde(default)]
    pub sba: SbaConfig,
    #[serde(default)]
    pub thresholds: GradingThresholds,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryThreshold>,
    #[serde(default = "default_category_label")]
    pub default_category: String,
    /// Use the sample (n-1) variance instead of the population variance.
    #[serde(default)]
    pub use_t_distribution: bool,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Active evaluation period; `None` grades default records.
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default = "default_best_core_count")]
    pub best_core_count: usize,
    #[serde(default = "default_best_elective_count")]
    pub best_elective_count: usize,
}

fn default_core_subjects() -> Vec<String> {
    [
        "English Language",
        "Mathematics",
        "Integrated Science",
        "Social Studies",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_subjects() -> Vec<String> {
    let mut subjects = default_core_subjects();
    subjects.extend(
        [
            "Religious and Moral Education",
            "Information and Communication Technology",
            "French",
            "Ghanaian Language",
            "Basic Design and Technology",
        ]
        .into_iter()
        .map(String::from),
    );
    subjects
}

fn default_categories() -> Vec<CategoryThreshold> {
    vec![
        CategoryThreshold::new("Distinction", 6, 12),
        CategoryThreshold::new("Merit", 13, 24),
        CategoryThreshold::new("Credit", 25, 36),
        CategoryThreshold::new("Pass", 37, 48),
        CategoryThreshold::new("Weak", 49, 54),
    ]
}

fn default_category_label() -> String {
    "Pass".to_string()
}
fn default_best_core_count() -> usize {
    4
}
fn default_best_elective_count() -> usize {
    2
}

impl Default for GradingSettings {
    fn default() -> Self {
        Self {
            subjects: default_subjects(),
            core_subjects: default_core_subjects(),
            normalization: Normalization::default(),
            sba: SbaConfig::default(),
            thresholds: GradingThresholds::default(),
            categories: default_categories(),
            default_category: default_category_label(),
            use_t_distribution: false,
            sort_order: SortOrder::default(),
            period: None,
            best_core_count: default_best_core_count(),
            best_elective_count: default_best_elective_count(),
        }
    }
}

impl GradingSettings {
    pub fn variance_mode(&self) -> VarianceMode {
        if self.use_t_distribution {
            VarianceMode::Sample
        } else {
            VarianceMode::Population
        }
    }

    pub fn is_core(&self, subject: &str) -> bool {
        self.core_subjects.iter().any(|c| c == subject)
    }
}

/// Load settings from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/settings.toml`
///
/// Environment variable overrides: `GRADEBOOK_PERIOD`,
/// `GRADEBOOK_SORT_ORDER`, `GRADEBOOK_USE_T_DISTRIBUTION`.
pub fn load_settings_from(path: Option<&Path>) -> Result<GradingSettings> {
    let settings_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("settings file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("settings.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut settings = match settings_path {
        Some(path) => {
            tracing::debug!("loading settings from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read settings: {}", path.display()))?;
            parse_settings_str(&content, &path)?
        }
        None => GradingSettings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

/// Apply `GRADEBOOK_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(settings: &mut GradingSettings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(period) = lookup("GRADEBOOK_PERIOD") {
        let period = period.trim();
        settings.period = (!period.is_empty()).then(|| period.to_string());
    }

    if let Some(order) = lookup("GRADEBOOK_SORT_ORDER") {
        settings.sort_order = order
            .parse()
            .context("invalid GRADEBOOK_SORT_ORDER")?;
    }

    if let Some(flag) = lookup("GRADEBOOK_USE_T_DISTRIBUTION") {
        settings.use_t_distribution = matches!(
            flag.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_settings() {
        let settings = GradingSettings::default();
        assert_eq!(settings.core_subjects.len(), 4);
        assert!(settings.sba.enabled);
        assert_eq!(settings.sort_order, SortOrder::ScoreDesc);
        assert_eq!(settings.default_category, "Pass");
        assert_eq!(settings.variance_mode(), VarianceMode::Population);
        assert!(settings.thresholds.is_monotonic());
    }

    #[test]
    fn single_slot_only_targets_one_subject() {
        let norm = Normalization::Single(NormalizationConfig {
            enabled: true,
            subject: "Mathematics".into(),
            max_score: 120.0,
            is_locked: true,
        });
        assert_eq!(norm.max_score_for("Mathematics"), Some(120.0));
        assert_eq!(norm.max_score_for("French"), None);
    }

    #[test]
    fn disabled_or_zero_max_never_normalizes() {
        let disabled = Normalization::Single(NormalizationConfig {
            enabled: false,
            subject: "Mathematics".into(),
            max_score: 120.0,
            is_locked: false,
        });
        assert_eq!(disabled.max_score_for("Mathematics"), None);

        let zero = Normalization::Single(NormalizationConfig {
            enabled: true,
            subject: "Mathematics".into(),
            max_score: 0.0,
            is_locked: false,
        });
        assert_eq!(zero.max_score_for("Mathematics"), None);
    }

    #[test]
    fn per_subject_map() {
        let mut max_scores = BTreeMap::new();
        max_scores.insert("Mathematics".to_string(), 120.0);
        max_scores.insert("French".to_string(), 80.0);
        let norm = Normalization::PerSubject(PerSubjectNormalization {
            enabled: true,
            is_locked: false,
            max_scores,
        });
        assert_eq!(norm.max_score_for("French"), Some(80.0));
        assert_eq!(norm.max_score_for("Social Studies"), None);
        assert_eq!(norm.targets().len(), 2);
    }

    #[test]
    fn parse_settings_toml() {
        let toml_str = r#"
subjects = ["Mathematics", "English Language", "French"]
core_subjects = ["Mathematics", "English Language"]
use_t_distribution = true
sort_order = "aggregate-asc"
period = "term-2"

[normalization]
mode = "single"
enabled = true
subject = "Mathematics"
max_score = 120

[sba]
enabled = true
sba_weight = 40
exam_weight = 60

[thresholds]
A1 = 2.0
B2 = 1.5
B3 = 1.0
C4 = 0.5
C5 = 0.0
C6 = -0.5
D7 = -1.0
E8 = -1.5

[[categories]]
label = "Top"
min = 6
max = 10
"#;
        let settings: GradingSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.subjects.len(), 3);
        assert_eq!(settings.sort_order, SortOrder::AggregateAsc);
        assert_eq!(settings.variance_mode(), VarianceMode::Sample);
        assert_eq!(settings.normalization.max_score_for("Mathematics"), Some(120.0));
        assert_eq!(settings.sba.sba_weight, 40.0);
        assert_eq!(settings.thresholds.a1, 2.0);
        assert_eq!(settings.categories.len(), 1);
        assert_eq!(settings.best_core_count, 4);
        assert_eq!(settings.period.as_deref(), Some("term-2"));
    }

    #[test]
    fn parse_per_subject_normalization() {
        let toml_str = r#"
[normalization]
mode = "per_subject"
enabled = true

[normalization.max_scores]
Mathematics = 120
French = 80
"#;
        let settings: GradingSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.normalization.max_score_for("French"), Some(80.0));
    }

    #[test]
    fn normalization_without_mode_is_single_slot() {
        let toml_str = r#"
[normalization]
enabled = true
subject = "Mathematics"
max_score = 120
"#;
        let settings: GradingSettings = toml::from_str(toml_str).unwrap();
        assert!(matches!(settings.normalization, Normalization::Single(_)));
        assert_eq!(settings.normalization.max_score_for("Mathematics"), Some(120.0));
        assert_eq!(settings.normalization.max_score_for("French"), None);
    }

    #[test]
    fn normalization_without_mode_but_with_map_is_per_subject() {
        let toml_str = r#"
[normalization]
enabled = true

[normalization.max_scores]
French = 80
"#;
        let settings: GradingSettings = toml::from_str(toml_str).unwrap();
        assert!(matches!(settings.normalization, Normalization::PerSubject(_)));
        assert_eq!(settings.normalization.max_score_for("French"), Some(80.0));
    }

    #[test]
    fn normalization_survives_json_roundtrip() {
        let norm = Normalization::Single(NormalizationConfig {
            enabled: true,
            subject: "Mathematics".into(),
            max_score: 50.0,
            is_locked: true,
        });
        let json = serde_json::to_string(&norm).unwrap();
        assert!(json.contains("\"mode\":\"single\""));
        let back: Normalization = serde_json::from_str(&json).unwrap();
        assert_eq!(back, norm);
    }

    #[test]
    fn partial_thresholds_keep_defaults() {
        let settings: GradingSettings = toml::from_str("[thresholds]\nA1 = 2.0\n").unwrap();
        let defaults = GradingThresholds::default();
        assert_eq!(settings.thresholds.a1, 2.0);
        assert_eq!(settings.thresholds.b2, defaults.b2);
        assert_eq!(settings.thresholds.e8, defaults.e8);
        assert!(settings.thresholds.is_monotonic());
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("GRADEBOOK_PERIOD", "term-3"),
            ("GRADEBOOK_SORT_ORDER", "name-desc"),
            ("GRADEBOOK_USE_T_DISTRIBUTION", "true"),
        ]
        .into_iter()
        .collect();
        let mut settings = GradingSettings::default();
        apply_env_overrides(&mut settings, |k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.period.as_deref(), Some("term-3"));
        assert_eq!(settings.sort_order, SortOrder::NameDesc);
        assert!(settings.use_t_distribution);
    }

    #[test]
    fn env_override_rejects_bad_sort_order() {
        let mut settings = GradingSettings::default();
        let result = apply_env_overrides(&mut settings, |k| {
            (k == "GRADEBOOK_SORT_ORDER").then(|| "sideways".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_settings_from(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradebook.toml");
        std::fs::write(&path, "subjects = [\"Mathematics\"]\n").unwrap();
        let settings = load_settings_from(Some(&path)).unwrap();
        assert_eq!(settings.subjects, vec!["Mathematics".to_string()]);
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "subjects = 3\n").unwrap();
        let err = load_settings_from(Some(&path)).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to parse settings"), "{message}");
        assert!(message.contains("broken.toml"), "{message}");
    }
}
