//! Legality checks for raw cell entries.
//!
//! Validation never fails: an illegal entry is reported as `valid: false`
//! together with the value it should be corrected to. Committing a cell always
//! stores `normalized`, so a persisted sheet never holds an illegal value.

use crate::catalog::{Category, CategoryKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    /// `None` only when the entry was empty.
    pub normalized: Option<u32>,
}

impl Validation {
    fn accept(value: u32) -> Self {
        Self {
            valid: true,
            normalized: Some(value),
        }
    }

    fn correct(value: u32) -> Self {
        Self {
            valid: false,
            normalized: Some(value),
        }
    }
}

/// Checks `raw` against the rules of `category`.
///
/// `None` stands for an empty entry. Non-finite numbers are invalid and
/// fall back to `0`.
pub fn validate(category: Category, raw: Option<f64>) -> Validation {
    let n = match raw {
        None => {
            return Validation {
                valid: true,
                normalized: None,
            }
        }
        Some(n) if !n.is_finite() => return Validation::correct(0),
        Some(n) => n,
    };

    match category.kind() {
        CategoryKind::FixedMultiple { .. } | CategoryKind::FixedValue { .. } => {
            validate_discrete(category.kind(), n)
        }
        CategoryKind::RangeOrZero { min, max } => validate_range(n, min, max),
    }
}

/// Shorthand for integer entries, as typed into the sheet.
pub fn validate_int(category: Category, raw: Option<u32>) -> Validation {
    validate(category, raw.map(f64::from))
}

fn validate_discrete(kind: CategoryKind, n: f64) -> Validation {
    let legal = kind.legal_values().unwrap_or_default();

    if let Some(&hit) = legal.iter().find(|&&v| f64::from(v) == n) {
        return Validation::accept(hit);
    }

    // Strict `<` keeps the first (smallest) of two equidistant candidates.
    let mut nearest = legal.first().copied().unwrap_or(0);
    for &candidate in &legal {
        if (f64::from(candidate) - n).abs() < (f64::from(nearest) - n).abs() {
            nearest = candidate;
        }
    }
    Validation::correct(nearest)
}

fn validate_range(n: f64, min: u32, max: u32) -> Validation {
    if n == 0.0 {
        return Validation::accept(0);
    }
    if n < f64::from(min) {
        return Validation::correct(0);
    }
    if n > f64::from(max) {
        return Validation::correct(max);
    }
    if n.fract() == 0.0 {
        return Validation::accept(n as u32);
    }

    let rounded = (n + 0.5).floor().clamp(f64::from(min), f64::from(max));
    Validation::correct(rounded as u32)
}

/// Reads a typed entry the way the sheet's input does: every character that
/// is not an ASCII digit is dropped. No digits at all means an empty cell.
pub fn parse_entry(text: &str) -> Option<u32> {
    let mut digits = text.chars().filter(|c| c.is_ascii_digit()).peekable();
    digits.peek()?;

    Some(digits.fold(0u32, |acc, d| {
        acc.saturating_mul(10)
            .saturating_add(d.to_digit(10).unwrap_or(0))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_multiple_tie_prefers_smaller() {
        // 6 is equidistant from 4 and 8.
        let v = validate(Category::Fours, Some(6.0));
        assert!(!v.valid);
        assert_eq!(v.normalized, Some(4));
    }

    #[test]
    fn test_fixed_value_midpoint_goes_to_zero() {
        let v = validate(Category::Yahtzee, Some(25.0));
        assert!(!v.valid);
        assert_eq!(v.normalized, Some(0));
    }

    #[test]
    fn test_parse_entry_strips_noise() {
        assert_eq!(parse_entry(" 1a2 "), Some(12));
        assert_eq!(parse_entry("abc"), None);
        assert_eq!(parse_entry(""), None);
        assert_eq!(parse_entry("99999999999999"), Some(u32::MAX));
    }
}
