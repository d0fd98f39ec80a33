//! Grade aggregation and statistics.
//!
//! This module turns a list of weighted assignment records into
//! category totals, a final score, a GPA and a pass/fail decision.

use crate::config::GradingPolicy;
use super::normalizer::weight_totals;
use crate::models::{AssignmentRecord, Category, CategoryTotals, GradeSummary, Status};
use tracing::debug;

/// Weight and contribution totals for one category.
pub fn category_totals(
    records: &[AssignmentRecord],
    category: Category,
    policy: &GradingPolicy,
) -> CategoryTotals {
    let (weight_total, contribution_total) = records
        .iter()
        .filter(|r| r.category == category)
        .fold((0.0, 0.0), |(weight, contribution), r| {
            (weight + r.weight, contribution + r.contribution())
        });

    CategoryTotals {
        category,
        weight_total,
        contribution_total,
        expected: policy.target(category),
        matched: weight_totals(records).category_matches(category, policy),
    }
}

/// Scale a final score (out of 100) onto the GPA range.
pub fn gpa(final_score: f64, policy: &GradingPolicy) -> f64 {
    (final_score / 100.0) * policy.gpa_scale
}

impl CategoryTotals {
    /// Whether this category clears its share threshold.
    ///
    /// Categories with no weight are vacuously satisfied.
    pub fn passed(&self, policy: &GradingPolicy) -> bool {
        if self.weight_total > 0.0 {
            self.contribution_total >= policy.category_pass_ratio * self.weight_total
        } else {
            true
        }
    }
}

/// Decide pass/fail from the final score and the category totals.
pub fn status(final_score: f64, categories: &[&CategoryTotals], policy: &GradingPolicy) -> Status {
    let overall = final_score >= policy.pass_mark;
    let per_category = categories.iter().all(|c| c.passed(policy));

    if overall && per_category {
        Status::Pass
    } else {
        Status::Fail
    }
}

/// Names of records whose raw grade is below the resubmission mark, in entry order.
pub fn resubmissions(records: &[AssignmentRecord], policy: &GradingPolicy) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.grade < policy.resubmit_below)
        .map(|r| r.name.clone())
        .collect()
}

/// Compute the complete grade summary.
pub fn summarize(records: &[AssignmentRecord], policy: &GradingPolicy) -> GradeSummary {
    let formative = category_totals(records, Category::Formative, policy);
    let summative = category_totals(records, Category::Summative, policy);

    let final_score = formative.contribution_total + summative.contribution_total;
    let gpa = gpa(final_score, policy);
    let status = status(final_score, &[&formative, &summative], policy);

    debug!(
        "FA {:.2}/{:.2}, SA {:.2}/{:.2}, final {:.2}, GPA {:.4}, {}",
        formative.contribution_total,
        formative.weight_total,
        summative.contribution_total,
        summative.weight_total,
        final_score,
        gpa,
        status
    );

    GradeSummary {
        formative,
        summative,
        final_score,
        gpa,
        status,
        resubmissions: resubmissions(records, policy),
    }
}
