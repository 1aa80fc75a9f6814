//! Validation of user-supplied filter parameters.
//!
//! The `parse_*` functions turn one line of user input into a validated value;
//! the `check_*` functions apply the same range rules to values that are
//! already numeric (command-line flags, batch job files). None of them perform
//! any I/O, so a front end can call them in a retry loop until they succeed.

use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The input could not be parsed as a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// The number parsed but lies outside the accepted range.
    #[error("{value} is out of range, expected {expected}")]
    OutOfRange {
        value: String,
        expected: &'static str,
    },
}

const SCALE_RANGE: &str = "a number greater than 0 and at most 1";
const POSITIVE_INTEGER: &str = "an integer greater than 0";

/// First whitespace-separated token of a line, or the empty string.
fn first_token(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

fn parse_positive_integer(raw: &str) -> Result<u32, InvalidInputError> {
    let token = first_token(raw);
    let value: i64 = token
        .parse()
        .map_err(|_| InvalidInputError::NotANumber(token.to_string()))?;
    u32::try_from(value)
        .ok()
        .filter(|&v| v >= 1)
        .ok_or_else(|| InvalidInputError::OutOfRange {
            value: value.to_string(),
            expected: POSITIVE_INTEGER,
        })
}

/// Check that a scale factor lies in `(0, 1]`.
pub fn check_scale(scale: f64) -> Result<f64, InvalidInputError> {
    if scale > 0.0 && scale <= 1.0 {
        Ok(scale)
    } else {
        Err(InvalidInputError::OutOfRange {
            value: scale.to_string(),
            expected: SCALE_RANGE,
        })
    }
}

/// Parse a scale factor in `(0, 1]`.
pub fn parse_scale(raw: &str) -> Result<f64, InvalidInputError> {
    let token = first_token(raw);
    let scale: f64 = token
        .parse()
        .map_err(|_| InvalidInputError::NotANumber(token.to_string()))?;
    check_scale(scale)
}

/// Check that a rotation count is at least 1.
pub fn check_rotations(rotations: u32) -> Result<u32, InvalidInputError> {
    if rotations >= 1 {
        Ok(rotations)
    } else {
        Err(InvalidInputError::OutOfRange {
            value: rotations.to_string(),
            expected: POSITIVE_INTEGER,
        })
    }
}

/// Parse a number of 90 degree rotations (at least 1).
pub fn parse_rotations(raw: &str) -> Result<u32, InvalidInputError> {
    parse_positive_integer(raw)
}

/// Check that an enlargement factor is at least 1.
pub fn check_enlarge_factor(factor: u32) -> Result<u32, InvalidInputError> {
    if factor >= 1 {
        Ok(factor)
    } else {
        Err(InvalidInputError::OutOfRange {
            value: factor.to_string(),
            expected: POSITIVE_INTEGER,
        })
    }
}

/// Parse an enlargement factor (at least 1).
pub fn parse_enlarge_factor(raw: &str) -> Result<u32, InvalidInputError> {
    parse_positive_integer(raw)
}
