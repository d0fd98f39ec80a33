//! Validation of raw operator entries.
//!
//! Every function here is pure: it takes the trimmed text the operator
//! typed and either returns the typed value or the reason it was rejected.

use crate::models::Category;
use thiserror::Error;

/// Why an entry was rejected. Always recoverable by asking again.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Assignment name cannot be empty.")]
    EmptyName,

    #[error("Invalid category '{0}'. Enter FA or SA only.")]
    UnknownCategory(String),

    #[error("Enter a valid number for {field}.")]
    NotANumber { field: &'static str },

    #[error("Grade must be between 0 and 100, got {0}.")]
    GradeOutOfRange(f64),

    #[error("Weight must be a positive number, got {0}.")]
    NonPositiveWeight(f64),
}

/// Accept any name that is not blank.
pub fn validate_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name.to_string())
}

/// Accept `FA` or `SA`, case-insensitively.
pub fn parse_category(input: &str) -> Result<Category, InputError> {
    input.parse().map_err(InputError::UnknownCategory)
}

/// Accept a finite number in [0, 100].
pub fn parse_grade(input: &str) -> Result<f64, InputError> {
    let grade = parse_number("grade", input)?;
    if !(0.0..=100.0).contains(&grade) {
        return Err(InputError::GradeOutOfRange(grade));
    }
    Ok(grade)
}

/// Accept a finite number greater than zero.
pub fn parse_weight(input: &str) -> Result<f64, InputError> {
    let weight = parse_number("weight", input)?;
    if weight <= 0.0 {
        return Err(InputError::NonPositiveWeight(weight));
    }
    Ok(weight)
}

fn parse_number(field: &'static str, input: &str) -> Result<f64, InputError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(InputError::NotANumber { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Quiz 1 "), Ok("Quiz 1".to_string()));
        assert_eq!(validate_name(""), Err(InputError::EmptyName));
        assert_eq!(validate_name(" \t "), Err(InputError::EmptyName));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("fa"), Ok(Category::Formative));
        assert_eq!(parse_category("SA"), Ok(Category::Summative));
        assert_eq!(
            parse_category("XA"),
            Err(InputError::UnknownCategory("XA".to_string()))
        );
        assert!(parse_category("").is_err());
    }

    #[test]
    fn test_parse_grade_bounds() {
        assert_eq!(parse_grade("0"), Ok(0.0));
        assert_eq!(parse_grade("100"), Ok(100.0));
        assert_eq!(parse_grade(" 72.5 "), Ok(72.5));
        assert_eq!(parse_grade("-0.01"), Err(InputError::GradeOutOfRange(-0.01)));
        assert_eq!(parse_grade("100.5"), Err(InputError::GradeOutOfRange(100.5)));
    }

    #[test]
    fn test_parse_grade_rejects_non_numbers() {
        for input in ["", "abc", "NaN", "inf", "80%"] {
            assert_eq!(
                parse_grade(input),
                Err(InputError::NotANumber { field: "grade" }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("0.01"), Ok(0.01));
        assert_eq!(parse_weight("60"), Ok(60.0));
        assert_eq!(parse_weight("0"), Err(InputError::NonPositiveWeight(0.0)));
        assert_eq!(parse_weight("-5"), Err(InputError::NonPositiveWeight(-5.0)));
        assert_eq!(
            parse_weight("heavy"),
            Err(InputError::NotANumber { field: "weight" })
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InputError::UnknownCategory("X".to_string()).to_string(),
            "Invalid category 'X'. Enter FA or SA only."
        );
        assert_eq!(
            InputError::NotANumber { field: "grade" }.to_string(),
            "Enter a valid number for grade."
        );
    }
}
