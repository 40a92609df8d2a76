//! The `gradebook stats` command.

use std::path::PathBuf;

use anyhow::Result;

use gradebook_core::report::summarize_subjects;

use super::{grade_roster, resolve_settings};

pub fn execute(
    roster_path: PathBuf,
    settings_path: Option<PathBuf>,
    period: Option<String>,
) -> Result<()> {
    use comfy_table::{Cell, Table};

    let settings = resolve_settings(settings_path, period)?;
    let outcome = grade_roster(&roster_path, &settings)?;
    let summaries = summarize_subjects(&outcome.statistics, &outcome.students);

    let mut table = Table::new();
    table.set_header(vec![
        "Subject",
        "Mean",
        "Std Dev",
        "Sec A Mean",
        "Sec B Mean",
        "Grades",
    ]);

    for summary in &summaries {
        let Some(stats) = outcome.statistics.subject(&summary.subject) else {
            continue;
        };
        let grades = summary
            .grade_counts
            .iter()
            .map(|(g, n)| format!("{g}:{n}"))
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            Cell::new(&summary.subject),
            Cell::new(format!("{:.2}", stats.composite.mean)),
            Cell::new(format!("{:.2}", stats.composite.std_dev)),
            Cell::new(format!("{:.2}", stats.section_a.mean)),
            Cell::new(format!("{:.2}", stats.section_b.mean)),
            Cell::new(grades),
        ]);
    }

    println!(
        "Cohort: {} students, {} variance",
        outcome.students.len(),
        settings.variance_mode()
    );
    println!("{table}");
    Ok(())
}
