//! gradebook-core: norm-referenced grading, aggregation and ranking.
//!
//! This crate turns raw per-subject scores for a cohort into composite
//! scores, z-score grades, best-six aggregates, performance categories and
//! ranks. The pipeline is pure: it reads a roster and a settings value and
//! returns new values without touching any shared state.

pub mod access;
pub mod aggregate;
pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod ranking;
pub mod report;
pub mod scoring;
pub mod statistics;

pub use config::GradingSettings;
pub use engine::{compute_class_statistics, grade_cohort, process_students, GradingOutcome};
pub use error::InputError;
