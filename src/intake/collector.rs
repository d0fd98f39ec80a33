//! Assignment collection.

use super::validation::{parse_category, parse_grade, parse_weight, validate_name};
use super::Console;
use crate::models::AssignmentRecord;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Typed at the name prompt to stop adding assignments.
pub const SENTINEL: &str = "done";

/// Prompt for assignments until the operator stops or input ends.
///
/// A record cut short by end of input is discarded.
pub fn collect_records<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Vec<AssignmentRecord>> {
    let mut records = Vec::new();

    console.say(format!(
        "Enter assignments (type '{}' as the name to finish).\n",
        SENTINEL
    ))?;

    while let Some(record) = read_record(console)? {
        info!(
            "Added '{}' ({}, grade {}, weight {})",
            record.name, record.category, record.grade, record.weight
        );
        records.push(record);

        if console.confirm("Add another assignment? (y/n): ")? != Some(true) {
            break;
        }
    }

    debug!("Collected {} assignments", records.len());
    Ok(records)
}

/// Read one full record. `None` on the sentinel or end of input.
fn read_record<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<AssignmentRecord>> {
    let name = console.prompt_until("Assignment name: ", |input| {
        if input.eq_ignore_ascii_case(SENTINEL) {
            Ok(None)
        } else {
            validate_name(input).map(Some)
        }
    })?;
    let Some(Some(name)) = name else {
        return Ok(None);
    };

    let Some(category) = console.prompt_until("Category (FA/SA): ", parse_category)? else {
        return Ok(None);
    };
    let Some(grade) = console.prompt_until("Grade (0-100): ", parse_grade)? else {
        return Ok(None);
    };
    let Some(weight) = console.prompt_until("Weight: ", parse_weight)? else {
        return Ok(None);
    };

    Ok(Some(AssignmentRecord::new(name, category, grade, weight)))
}
