//! File export.
//!
//! Writes the records as CSV and, optionally, the grade summary as JSON.
//! A failed write never invalidates the computed results; callers report
//! the error and carry on.

use crate::models::{AssignmentRecord, GradeSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Columns written for every record.
const BASE_COLUMNS: [&str; 4] = ["Assignment", "Category", "Grade", "Weight"];

/// Optional contribution column.
const CONTRIBUTION_COLUMN: &str = "FinalWeight";

/// Failure to produce an output file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render the CSV document for the given records.
pub fn render_csv(records: &[AssignmentRecord], include_contribution: bool) -> String {
    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    if include_contribution {
        header.push(CONTRIBUTION_COLUMN);
    }

    let mut output = header.join(",");
    output.push('\n');

    for record in records {
        let mut fields = vec![
            escape_field(&record.name),
            record.category.to_string(),
            record.grade.to_string(),
            record.weight.to_string(),
        ];
        if include_contribution {
            fields.push(record.contribution().to_string());
        }
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}

/// Quote a field if it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write the records as CSV, replacing any existing file.
pub fn write_csv(
    records: &[AssignmentRecord],
    path: &Path,
    include_contribution: bool,
) -> Result<(), ExportError> {
    let content = render_csv(records, include_contribution);
    write_file(path, content.as_bytes())?;

    debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// JSON document wrapping a grade summary.
#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    generated_at: DateTime<Utc>,
    record_count: usize,
    summary: &'a GradeSummary,
}

/// Write the summary as pretty JSON, replacing any existing file.
pub fn write_summary_json(
    summary: &GradeSummary,
    record_count: usize,
    path: &Path,
) -> Result<(), ExportError> {
    let document = SummaryDocument {
        generated_at: Utc::now(),
        record_count,
        summary,
    };
    let content = serde_json::to_string_pretty(&document)?;
    write_file(path, content.as_bytes())?;

    debug!("Wrote summary to {}", path.display());
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), ExportError> {
    let io_error = |source: io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GradingPolicy;
    use crate::grading::summarize;
    use crate::models::Category;

    fn sample_records() -> Vec<AssignmentRecord> {
        vec![
            AssignmentRecord::new("Homework", Category::Formative, 80.0, 60.0),
            AssignmentRecord::new("Exam", Category::Summative, 40.0, 40.0),
        ]
    }

    #[test]
    fn test_render_csv_with_contribution() {
        let csv = render_csv(&sample_records(), true);
        assert_eq!(
            csv,
            "Assignment,Category,Grade,Weight,FinalWeight\n\
             Homework,FA,80,60,48\n\
             Exam,SA,40,40,16\n"
        );
    }

    #[test]
    fn test_render_csv_without_contribution() {
        let csv = render_csv(&sample_records(), false);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Assignment,Category,Grade,Weight"));
        assert_eq!(lines.next(), Some("Homework,FA,80,60"));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Quiz 1"), "Quiz 1");
        assert_eq!(escape_field("Lab, part 2"), "\"Lab, part 2\"");
        assert_eq!(escape_field("The \"big\" one"), "\"The \"\"big\"\" one\"");
    }

    #[test]
    fn test_write_csv_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grades.csv");
        std::fs::write(&path, "stale content that is longer than the new file\n".repeat(10))
            .unwrap();

        write_csv(&sample_records(), &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Assignment,Category,Grade,Weight,FinalWeight\n"));
        assert!(!content.contains("stale"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_write_csv_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grades.csv");

        let err = write_csv(&sample_records(), &path, true).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("grades.csv"));
    }

    #[test]
    fn test_write_summary_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let records = sample_records();
        let summary = summarize(&records, &GradingPolicy::default());

        write_summary_json(&summary, records.len(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["record_count"], 2);
        assert_eq!(value["summary"]["final_score"], 64.0);
        assert_eq!(value["summary"]["status"], "FAIL");
        assert_eq!(value["summary"]["resubmissions"][0], "Exam");
        assert!(value["generated_at"].is_string());
    }
}
