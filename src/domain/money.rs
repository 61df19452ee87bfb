use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Amounts are kept as exact decimals and only rounded when rendered.
/// `42.505` stays `42.505` in the ledger and prints as `42.51`.
pub type Amount = Decimal;

/// Longest integer part `parse_amount` accepts. Leaves room in the 96-bit
/// mantissa for the two display decimals.
pub const MAX_INTEGER_DIGITS: usize = 26;

/// Format an amount with exactly two fractional digits, rounding half away from zero.
/// Example: 100 -> "100.00", 42.505 -> "42.51", -1.005 -> "-1.01"
pub fn format_amount(amount: Amount) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // -0.001 rounds to a signed zero
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);

    // rescale leaves the scale untouched when the mantissa has no room left
    let mut text = rounded.to_string();
    match rounded.scale() {
        0 => text.push_str(".00"),
        1 => text.push('0'),
        _ => {}
    }
    text
}

/// Parse user input into an amount.
/// Example: "50" -> 50, " 12.5 " -> 12.5, "-3.25" -> -3.25, "+.5" -> 0.5
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let well_formed = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return Err(ParseAmountError::InvalidFormat(trimmed.to_string()));
    }

    let integer_part = digits.split('.').next().unwrap_or_default();
    if integer_part.trim_start_matches('0').len() > MAX_INTEGER_DIGITS {
        return Err(ParseAmountError::OutOfRange(trimmed.to_string()));
    }

    // "5." and ".5" are accepted as 5.0 and 0.5
    let mut normalized = String::with_capacity(digits.len() + 3);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits);
    if digits.ends_with('.') {
        normalized.push('0');
    }

    Decimal::from_str(&normalized)
        .map_err(|_| ParseAmountError::OutOfRange(trimmed.to_string()))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}'")]
    InvalidFormat(String),

    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}
