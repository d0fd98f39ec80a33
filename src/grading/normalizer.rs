//! Weight totals and normalization.
//!
//! This module checks category weight totals against the grading policy
//! and rebalances them when asked to. It never prompts; the interactive
//! resolution loop lives in `intake::weights`.

use crate::config::GradingPolicy;
use crate::models::{AssignmentRecord, Category};
use thiserror::Error;
use tracing::debug;

/// Weight sum and member count for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryWeight {
    /// Sum of member weights.
    pub total: f64,
    /// Number of records in the category.
    pub count: usize,
}

/// Current weight totals of both categories.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightTotals {
    pub formative: CategoryWeight,
    pub summative: CategoryWeight,
}

impl WeightTotals {
    /// Totals for the given category.
    pub fn get(&self, category: Category) -> CategoryWeight {
        match category {
            Category::Formative => self.formative,
            Category::Summative => self.summative,
        }
    }

    /// Combined weight of every record.
    pub fn combined(&self) -> f64 {
        self.formative.total + self.summative.total
    }

    /// Whether a single category satisfies its target.
    ///
    /// A category with no records counts as satisfied.
    pub fn category_matches(&self, category: Category, policy: &GradingPolicy) -> bool {
        let weight = self.get(category);
        weight.count == 0 || (weight.total - policy.target(category)).abs() < policy.tolerance
    }

    /// Whether every category satisfies its target.
    pub fn matches(&self, policy: &GradingPolicy) -> bool {
        Category::ALL
            .iter()
            .all(|&category| self.category_matches(category, policy))
    }
}

/// Errors from editing a weight directly.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("Invalid assignment number {position} (expected 1-{len}).")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Weight must be a positive number, got {0}.")]
    InvalidWeight(f64),
}

/// Sum the weights of each category.
pub fn weight_totals(records: &[AssignmentRecord]) -> WeightTotals {
    let mut totals = WeightTotals::default();

    for record in records {
        let entry = match record.category {
            Category::Formative => &mut totals.formative,
            Category::Summative => &mut totals.summative,
        };
        entry.total += record.weight;
        entry.count += 1;
    }

    totals
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rebalance one category so its weights sum to `target`.
///
/// A zero-sum category gets the target spread evenly; otherwise every
/// weight is scaled by `target / sum`. Results are rounded to 2 decimals.
pub fn normalize_category(records: &mut [AssignmentRecord], category: Category, target: f64) {
    let (sum, count) = records
        .iter()
        .filter(|r| r.category == category)
        .fold((0.0, 0usize), |(sum, count), r| (sum + r.weight, count + 1));

    if count == 0 {
        return;
    }

    if sum == 0.0 {
        let per_item = round2(target / count as f64);
        debug!(
            "{} weights sum to zero, spreading {} evenly ({} each)",
            category, target, per_item
        );
        for record in records.iter_mut().filter(|r| r.category == category) {
            record.weight = per_item;
        }
    } else {
        let scale = target / sum;
        debug!("Scaling {} weights by {:.4}", category, scale);
        for record in records.iter_mut().filter(|r| r.category == category) {
            record.weight = round2(record.weight * scale);
        }
    }
}

/// Rebalance every category to its policy target.
pub fn normalize(records: &mut [AssignmentRecord], policy: &GradingPolicy) {
    for category in Category::ALL {
        normalize_category(records, category, policy.target(category));
    }
}

/// Overwrite the weight of the record at a 1-based position.
pub fn set_weight(
    records: &mut [AssignmentRecord],
    position: usize,
    weight: f64,
) -> Result<(), NormalizeError> {
    if !(weight.is_finite() && weight > 0.0) {
        return Err(NormalizeError::InvalidWeight(weight));
    }

    let len = records.len();
    let record = position
        .checked_sub(1)
        .and_then(|index| records.get_mut(index))
        .ok_or(NormalizeError::PositionOutOfRange { position, len })?;

    debug!(
        "Weight of '{}' changed from {} to {}",
        record.name, record.weight, weight
    );
    record.weight = weight;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fa(name: &str, weight: f64) -> AssignmentRecord {
        AssignmentRecord::new(name, Category::Formative, 70.0, weight)
    }

    fn sa(name: &str, weight: f64) -> AssignmentRecord {
        AssignmentRecord::new(name, Category::Summative, 70.0, weight)
    }

    fn weights(records: &[AssignmentRecord]) -> Vec<f64> {
        records.iter().map(|r| r.weight).collect()
    }

    #[test]
    fn test_weight_totals() {
        let records = vec![fa("q1", 20.0), fa("q2", 25.0), sa("exam", 40.0)];
        let totals = weight_totals(&records);

        assert_eq!(totals.formative, CategoryWeight { total: 45.0, count: 2 });
        assert_eq!(totals.summative, CategoryWeight { total: 40.0, count: 1 });
        assert_eq!(totals.combined(), 85.0);
    }

    #[test]
    fn test_matches() {
        let policy = GradingPolicy::default();

        let records = vec![fa("q1", 30.0), fa("q2", 30.0), sa("exam", 40.0)];
        assert!(weight_totals(&records).matches(&policy));

        let records = vec![fa("q1", 30.0), sa("exam", 40.0)];
        assert!(!weight_totals(&records).matches(&policy));
    }

    #[test]
    fn test_matches_within_tolerance() {
        let policy = GradingPolicy::default();
        let records = vec![fa("q1", 20.1), fa("q2", 19.9), fa("q3", 20.0), sa("exam", 40.0)];
        assert!(weight_totals(&records).matches(&policy));
    }

    #[test]
    fn test_absent_category_is_satisfied() {
        let policy = GradingPolicy::default();
        let records = vec![fa("q1", 60.0)];
        let totals = weight_totals(&records);

        assert!(totals.category_matches(Category::Summative, &policy));
        assert!(totals.matches(&policy));
    }

    #[test]
    fn test_normalize_scales_to_target() {
        let policy = GradingPolicy::default();
        let mut records = vec![
            fa("q1", 10.0),
            fa("q2", 20.0),
            sa("exam", 10.0),
            sa("final", 10.0),
        ];

        normalize(&mut records, &policy);

        assert_eq!(weights(&records), vec![20.0, 40.0, 20.0, 20.0]);
        assert!(weight_totals(&records).matches(&policy));
    }

    #[test]
    fn test_normalize_preserves_ratios() {
        let mut records = vec![fa("q1", 1.0), fa("q2", 3.0)];
        normalize_category(&mut records, Category::Formative, 60.0);

        assert_eq!(weights(&records), vec![15.0, 45.0]);
        assert_eq!(records[1].weight / records[0].weight, 3.0);
    }

    #[test]
    fn test_normalize_rounds_to_two_decimals() {
        let mut records = vec![fa("q1", 1.0), fa("q2", 1.0), fa("q3", 1.0)];
        normalize_category(&mut records, Category::Formative, 50.0);

        assert_eq!(weights(&records), vec![16.67, 16.67, 16.67]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let policy = GradingPolicy::default();
        let mut records = vec![fa("q1", 12.5), fa("q2", 47.5), sa("exam", 40.0)];
        let before = records.clone();

        normalize(&mut records, &policy);
        assert_eq!(records, before);

        normalize(&mut records, &policy);
        assert_eq!(records, before);
    }

    #[test]
    fn test_normalize_zero_sum_spreads_evenly() {
        let mut records = vec![
            sa("a", 0.0),
            sa("b", 0.0),
            fa("q1", 60.0),
            sa("c", 0.0),
            sa("d", 0.0),
        ];
        normalize_category(&mut records, Category::Summative, 40.0);

        let summative: Vec<f64> = records
            .iter()
            .filter(|r| r.category == Category::Summative)
            .map(|r| r.weight)
            .collect();
        assert_eq!(summative, vec![10.0, 10.0, 10.0, 10.0]);
        assert_eq!(records[2].weight, 60.0);
    }

    #[test]
    fn test_normalize_absent_category_is_noop() {
        let mut records = vec![fa("q1", 60.0)];
        normalize_category(&mut records, Category::Summative, 40.0);
        assert_eq!(weights(&records), vec![60.0]);
    }

    #[test]
    fn test_set_weight() {
        let mut records = vec![fa("q1", 10.0), sa("exam", 40.0)];

        assert!(set_weight(&mut records, 1, 60.0).is_ok());
        assert_eq!(records[0].weight, 60.0);

        assert_eq!(
            set_weight(&mut records, 0, 5.0),
            Err(NormalizeError::PositionOutOfRange { position: 0, len: 2 })
        );
        assert_eq!(
            set_weight(&mut records, 3, 5.0),
            Err(NormalizeError::PositionOutOfRange { position: 3, len: 2 })
        );
        assert_eq!(
            set_weight(&mut records, 2, -1.0),
            Err(NormalizeError::InvalidWeight(-1.0))
        );
        assert_eq!(records[1].weight, 40.0);
    }
}
