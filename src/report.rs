use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{BatchReport, SubmissionOutcome};

/// Render the batch report to the terminal.
pub fn render(report: &BatchReport, total_items: usize, quiet: bool) {
    let created = report.created_count();
    let existing = report
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, SubmissionOutcome::AlreadyExists(_)))
        .count();
    let skipped = report
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, SubmissionOutcome::Skipped(_)))
        .count();
    let failed = report
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, SubmissionOutcome::Failed(_)))
        .count();

    if quiet {
        println!(
            "Total: {}  Created: {}  Existing: {}  Skipped: {}  Failed: {}",
            total_items,
            created.to_string().green(),
            existing.to_string().cyan(),
            skipped.to_string().yellow(),
            failed.to_string().red(),
        );
        return;
    }

    println!(
        "\n {} v{}\n",
        "license-reviewr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Content").add_attribute(Attribute::Bold),
            Cell::new("Outcome").add_attribute(Attribute::Bold),
            Cell::new("Detail").add_attribute(Attribute::Bold),
        ]);

    for (id, outcome) in &report.outcomes {
        let (label, color, detail) = match outcome {
            SubmissionOutcome::Created(url) => ("created", Color::Green, url.clone()),
            SubmissionOutcome::AlreadyExists(url) => ("existing", Color::Cyan, url.clone()),
            SubmissionOutcome::Skipped(reason) => ("skipped", Color::Yellow, reason.clone()),
            SubmissionOutcome::Failed(error) => ("failed", Color::Red, error.clone()),
        };
        table.add_row(vec![
            Cell::new(id.to_string()),
            Cell::new(label).fg(color),
            Cell::new(detail),
        ]);
    }

    println!("{}", table);
    println!(
        "\n Total: {}  Created: {}  Existing: {}  Skipped: {}  Failed: {}\n",
        total_items,
        created.to_string().green(),
        existing.to_string().cyan(),
        skipped.to_string().yellow(),
        failed.to_string().red(),
    );
}
