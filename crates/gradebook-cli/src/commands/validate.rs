//! The `gradebook validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::config::load_settings_from;
use gradebook_core::parser::validate_settings;

pub fn execute(settings_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings_from(settings_path.as_deref())?;

    println!(
        "Settings: {} subjects ({} core), {} categories",
        settings.subjects.len(),
        settings.core_subjects.len(),
        settings.categories.len()
    );

    let warnings = validate_settings(&settings);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.section, w.message);
    }

    if warnings.is_empty() {
        println!("Settings valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
