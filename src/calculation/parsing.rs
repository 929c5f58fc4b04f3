//! Numeric field parsing.
//!
//! User-entered amounts may carry grouping commas ("60,000"). This module
//! strips them, parses the remainder as a decimal, and range-checks it.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::FieldIssue;

/// Fractional digits kept from a parsed amount.
///
/// Amounts are capped at 10^9 and kept to this scale, so every share,
/// difference, and running total fits in a `Decimal` without rounding.
pub const AMOUNT_SCALE: u32 = 10;

/// Removes grouping commas and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::strip_grouping;
///
/// assert_eq!(strip_grouping(" 1,234,567.89 "), "1234567.89");
/// ```
pub fn strip_grouping(text: &str) -> String {
    text.chars()
        .filter(|c| *c != ',')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parses an amount field.
///
/// Returns `Ok(None)` for a blank field, `Ok(Some(value))` for a value in
/// `(0, max]` once rounded to [`AMOUNT_SCALE`] places, and the reason
/// otherwise. Text that is not a plain or
/// scientific decimal (including `NaN` and `Infinity`) is `NotANumber`;
/// digit strings too long to represent are `OutOfRange`.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::parse_amount;
/// use fair_share::error::FieldIssue;
/// use rust_decimal::Decimal;
///
/// let max = Decimal::new(1_000_000_000, 0);
/// assert_eq!(parse_amount("60,000", max), Ok(Some(Decimal::new(60_000, 0))));
/// assert_eq!(parse_amount("", max), Ok(None));
/// assert_eq!(parse_amount("-5", max), Err(FieldIssue::NotPositive));
/// ```
pub fn parse_amount(text: &str, max: Decimal) -> Result<Option<Decimal>, FieldIssue> {
    let cleaned = strip_grouping(text);
    if cleaned.is_empty() {
        return Ok(None);
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| {
            if looks_numeric(&cleaned) {
                FieldIssue::OutOfRange
            } else {
                FieldIssue::NotANumber
            }
        })?;

    let value = value.round_dp(AMOUNT_SCALE);
    if value <= Decimal::ZERO {
        return Err(FieldIssue::NotPositive);
    }
    if value > max {
        return Err(FieldIssue::OutOfRange);
    }

    Ok(Some(value))
}

/// True for unsigned digit strings with at most one decimal point.
fn looks_numeric(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.matches('.').count() <= 1
}
