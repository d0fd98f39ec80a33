//! Interactive resolution of weight totals that miss the policy targets.

use super::validation::parse_weight;
use super::Console;
use crate::config::GradingPolicy;
use crate::grading::{normalize, set_weight, weight_totals, NormalizeError, WeightTotals};
use crate::models::{AssignmentRecord, Category};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// How the weight check was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightResolution {
    /// Totals matched without any change.
    Matched,
    /// Totals match after edits or normalization.
    Adjusted,
    /// Operator chose to continue with mismatched totals.
    Overridden,
}

/// Loop until weights match the policy or the operator overrides.
///
/// With `auto_normalize` the first mismatch is normalized without asking;
/// if rounding still leaves a mismatch the menu is shown.
pub fn resolve_weights<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    records: &mut [AssignmentRecord],
    policy: &GradingPolicy,
    auto_normalize: bool,
) -> io::Result<WeightResolution> {
    let mut changed = false;
    let mut auto_pending = auto_normalize;

    loop {
        let totals = weight_totals(records);
        write_totals(console, &totals, policy)?;

        if totals.matches(policy) {
            console.say(format!(
                "Weights match expected distribution (FA={}, SA={}). Proceeding...\n",
                policy.formative_target, policy.summative_target
            ))?;
            return Ok(if changed {
                WeightResolution::Adjusted
            } else {
                WeightResolution::Matched
            });
        }

        if auto_pending {
            auto_pending = false;
            normalize(records, policy);
            changed = true;
            info!("Weights auto-normalized without prompting");
            console.say("Weights auto-normalized.\n")?;
            continue;
        }

        console.say("Weights do not match expected totals.")?;
        console.say("Options:")?;
        console.say("  1) Edit a weight")?;
        console.say("  2) Auto-normalize weights")?;
        console.say("  3) Proceed anyway (not recommended)")?;

        let Some(choice) = console.read_line("Choose an option (1/2/3): ")? else {
            warn!("Input ended while weights mismatch the policy; keeping them as entered");
            return Ok(WeightResolution::Overridden);
        };

        match choice.as_str() {
            "1" => match edit_weight(console, records)? {
                EditOutcome::Updated => changed = true,
                EditOutcome::Cancelled => {}
                EditOutcome::InputEnded => {
                    warn!("Input ended during weight edit; keeping weights as they are");
                    return Ok(WeightResolution::Overridden);
                }
            },
            "2" => {
                normalize(records, policy);
                changed = true;
                info!("Weights auto-normalized");
                console.say("Weights auto-normalized.\n")?;
            }
            "3" => {
                let confirmed = console
                    .confirm("Are you sure you want to proceed with incorrect totals? (y/n): ")?;
                if confirmed != Some(false) {
                    warn!(
                        "Proceeding with FA={:.2}, SA={:.2} (expected {}/{})",
                        totals.formative.total,
                        totals.summative.total,
                        policy.formative_target,
                        policy.summative_target
                    );
                    return Ok(WeightResolution::Overridden);
                }
            }
            _ => console.say("Invalid option.")?,
        }
    }
}

enum EditOutcome {
    Updated,
    Cancelled,
    InputEnded,
}

fn edit_weight<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    records: &mut [AssignmentRecord],
) -> io::Result<EditOutcome> {
    write_assignment_list(console, records)?;

    let Some(raw) = console.read_line("Enter assignment number to edit (or 'c' to cancel): ")?
    else {
        return Ok(EditOutcome::InputEnded);
    };
    if raw.eq_ignore_ascii_case("c") {
        return Ok(EditOutcome::Cancelled);
    }

    let Ok(position) = raw.parse::<usize>() else {
        console.say("Invalid entry.")?;
        return Ok(EditOutcome::Cancelled);
    };
    if !(1..=records.len()).contains(&position) {
        console.say(NormalizeError::PositionOutOfRange {
            position,
            len: records.len(),
        })?;
        return Ok(EditOutcome::Cancelled);
    }

    let Some(weight) = console.prompt_until("Weight: ", parse_weight)? else {
        return Ok(EditOutcome::InputEnded);
    };

    match set_weight(records, position, weight) {
        Ok(()) => {
            console.say(format!(
                "Weight for '{}' updated.\n",
                records[position - 1].name
            ))?;
            Ok(EditOutcome::Updated)
        }
        Err(e) => {
            console.say(e)?;
            Ok(EditOutcome::Cancelled)
        }
    }
}

fn write_totals<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    totals: &WeightTotals,
    policy: &GradingPolicy,
) -> io::Result<()> {
    console.say("\nCurrent weight totals:")?;
    for category in Category::ALL {
        console.say(format!(
            "  {} total: {:.2} (expected {:.2})",
            category.label(),
            totals.get(category).total,
            policy.target(category)
        ))?;
    }
    console.say(format!(
        "  Combined total: {:.2} (expected {:.2})\n",
        totals.combined(),
        policy.total_target()
    ))
}

fn write_assignment_list<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    records: &[AssignmentRecord],
) -> io::Result<()> {
    console.say("\nCurrent assignments:")?;
    for (i, record) in records.iter().enumerate() {
        console.say(format!(
            "{}. {} | {} | Grade: {} | Weight: {}",
            i + 1,
            record.name,
            record.category,
            record.grade,
            record.weight
        ))?;
    }
    console.say("")
}
