//! Data models for the grade generator.
//!
//! This module contains the core data structures used throughout
//! the application for representing assignments, category totals,
//! and the final grade summary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Formative assessment (FA)
    Formative,
    /// Summative assessment (SA)
    Summative,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 2] = [Category::Formative, Category::Summative];

    /// Returns the short token used on input and in the CSV file.
    pub fn token(&self) -> &'static str {
        match self {
            Category::Formative => "FA",
            Category::Summative => "SA",
        }
    }

    /// Returns the long human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Formative => "Formative",
            Category::Summative => "Summative",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FA" => Ok(Category::Formative),
            "SA" => Ok(Category::Summative),
            other => Err(other.to_string()),
        }
    }
}

/// A single graded assignment entered by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Assignment name (never empty).
    pub name: String,
    /// Assessment category.
    pub category: Category,
    /// Raw grade, 0-100.
    pub grade: f64,
    /// Points this assignment carries within its category.
    pub weight: f64,
}

impl AssignmentRecord {
    /// Creates a new record. Values are expected to be validated already.
    pub fn new(name: impl Into<String>, category: Category, grade: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            category,
            grade,
            weight,
        }
    }

    /// Grade-scaled share of the weight.
    pub fn contribution(&self) -> f64 {
        (self.grade / 100.0) * self.weight
    }
}

/// Weight and contribution totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Category these totals belong to.
    pub category: Category,
    /// Sum of the weights of every record in the category.
    pub weight_total: f64,
    /// Sum of the contributions of every record in the category.
    pub contribution_total: f64,
    /// Policy target for the weight total.
    pub expected: f64,
    /// Whether the weight total met the target within the policy tolerance.
    pub matched: bool,
}

/// Overall outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// The computed result of one grading run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Formative category totals.
    pub formative: CategoryTotals,
    /// Summative category totals.
    pub summative: CategoryTotals,
    /// Sum of all contributions, nominally out of 100.
    pub final_score: f64,
    /// Final score scaled onto the GPA range.
    pub gpa: f64,
    /// Pass/fail decision.
    pub status: Status,
    /// Names of assignments to redo, in entry order.
    pub resubmissions: Vec<String>,
}

impl GradeSummary {
    /// Returns the totals for the given category.
    pub fn totals(&self, category: Category) -> &CategoryTotals {
        match category {
            Category::Formative => &self.formative,
            Category::Summative => &self.summative,
        }
    }

    /// Resubmission list as display text ("None" when empty).
    pub fn resubmission_text(&self) -> String {
        if self.resubmissions.is_empty() {
            "None".to_string()
        } else {
            self.resubmissions.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("FA".parse::<Category>(), Ok(Category::Formative));
        assert_eq!("sa".parse::<Category>(), Ok(Category::Summative));
        assert_eq!(" fa ".parse::<Category>(), Ok(Category::Formative));
        assert_eq!("formative".parse::<Category>(), Err("FORMATIVE".to_string()));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Formative.to_string(), "FA");
        assert_eq!(Category::Summative.to_string(), "SA");
        assert_eq!(Category::Summative.label(), "Summative");
    }

    #[test]
    fn test_contribution() {
        let record = AssignmentRecord::new("Quiz 1", Category::Formative, 80.0, 60.0);
        assert_eq!(record.contribution(), 48.0);

        let zero = AssignmentRecord::new("Quiz 2", Category::Formative, 0.0, 10.0);
        assert_eq!(zero.contribution(), 0.0);
    }

    #[test]
    fn test_resubmission_text() {
        let totals = CategoryTotals {
            category: Category::Formative,
            weight_total: 0.0,
            contribution_total: 0.0,
            expected: 60.0,
            matched: true,
        };
        let mut summary = GradeSummary {
            formative: totals.clone(),
            summative: CategoryTotals {
                category: Category::Summative,
                expected: 40.0,
                ..totals
            },
            final_score: 0.0,
            gpa: 0.0,
            status: Status::Fail,
            resubmissions: Vec::new(),
        };
        assert_eq!(summary.resubmission_text(), "None");

        summary.resubmissions = vec!["Essay".to_string(), "Lab".to_string()];
        assert_eq!(summary.resubmission_text(), "Essay, Lab");
        assert_eq!(summary.totals(Category::Summative).expected, 40.0);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&Status::Pass).unwrap(), "\"PASS\"");
        assert_eq!(Status::Fail.to_string(), "FAIL");
    }
}
