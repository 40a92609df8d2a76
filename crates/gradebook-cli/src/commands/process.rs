//! The `gradebook process` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradebook_core::ranking::SortOrder;
use gradebook_core::report::ResultsReport;

use super::{grade_roster, resolve_settings};

pub fn execute(
    roster_path: PathBuf,
    settings_path: Option<PathBuf>,
    period: Option<String>,
    sort: Option<String>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut settings = resolve_settings(settings_path, period)?;
    if let Some(order) = sort {
        settings.sort_order = order.parse::<SortOrder>().context("invalid --sort")?;
    }

    let outcome = grade_roster(&roster_path, &settings)?;
    let report = ResultsReport::new(outcome, settings.period.clone(), settings.sort_order);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report.students)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "table" => print_table(&report),
        other => anyhow::bail!("unknown format: {other} (expected table, json or markdown)"),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    Ok(())
}

fn print_table(report: &ResultsReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Rank",
        "ID",
        "Name",
        "Total",
        "Aggregate",
        "Category",
        "Best Six",
    ]);

    for student in &report.students {
        let best_six = student
            .best_core
            .iter()
            .chain(&student.best_electives)
            .map(|s| format!("{} {}", s.subject, s.grade))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(student.rank),
            Cell::new(&student.id),
            Cell::new(&student.name),
            Cell::new(format!("{:.1}", student.total_score)),
            Cell::new(student.best_six_aggregate),
            Cell::new(&student.category),
            Cell::new(best_six),
        ]);
    }

    println!("{table}");
}
