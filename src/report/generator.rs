//! Console report generation.
//!
//! This module renders the entered assignments as a table and the
//! computed grade summary as a results block.

use crate::models::{AssignmentRecord, Category, GradeSummary};
use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

/// One row of the assignments table.
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Assignment")]
    name: String,
    #[tabled(rename = "Category")]
    category: Category,
    #[tabled(rename = "Grade")]
    grade: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

/// Render every record with its contribution.
pub fn render_records_table(records: &[AssignmentRecord]) -> String {
    let rows = records.iter().enumerate().map(|(i, r)| RecordRow {
        position: i + 1,
        name: r.name.clone(),
        category: r.category,
        grade: format!("{:.2}", r.grade),
        weight: format!("{:.2}", r.weight),
        contribution: format!("{:.2}", r.contribution()),
    });

    let mut table = Table::new(rows);
    table
        .with(Panel::header("Assignments"))
        .with(Style::modern());
    table.to_string()
}

/// Render the results block.
pub fn render_summary(summary: &GradeSummary) -> String {
    let mut output = String::new();

    output.push_str("\n--- RESULTS ---\n");
    for category in Category::ALL {
        output.push_str(&category_line(summary, category));
    }
    output.push_str("--------------------\n\n");

    output.push_str(&format!("Total Grade: {:.2} / 100\n", summary.final_score));
    output.push_str(&format!("GPA: {:.4}\n", summary.gpa));
    output.push_str(&format!("Status: {}\n", summary.status));
    output.push_str(&format!("Resubmission: {}\n", summary.resubmission_text()));

    output
}

fn category_line(summary: &GradeSummary, category: Category) -> String {
    let totals = summary.totals(category);
    let mut line = format!(
        "Total {}: {:.2} / {:.2}",
        category.label(),
        totals.contribution_total,
        totals.weight_total
    );

    if !totals.matched {
        line.push_str(&format!(" (expected {:.2})", totals.expected));
    }
    line.push('\n');

    line
}
