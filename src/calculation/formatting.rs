//! Display formatting for amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with two decimal places and comma thousands separators.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(12345, 1)), "1,234.50");
/// assert_eq!(format_amount(Decimal::new(600, 0)), "600.00");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, insert_commas(integer), fraction)
}

/// Reformats typed numeric text: drops anything other than digits, `.` and
/// `,`, then regroups the integer part with commas.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::group_digits;
///
/// assert_eq!(group_digits("$1234567.5"), "1,234,567.5");
/// assert_eq!(group_digits("12,34"), "1,234");
/// ```
pub fn group_digits(text: &str) -> String {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match digits.split_once('.') {
        Some((integer, fraction)) => format!("{}.{}", insert_commas(integer), fraction),
        None => insert_commas(&digits),
    }
}

fn insert_commas(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_pads_to_two_places() {
        assert_eq!(format_amount(dec("1.5")), "1.50");
        assert_eq!(format_amount(dec("0")), "0.00");
    }

    #[test]
    fn test_format_rounds_half_up() {
        assert_eq!(format_amount(dec("0.125")), "0.13");
        assert_eq!(format_amount(dec("33.3333333333")), "33.33");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_amount(dec("1000000000")), "1,000,000,000.00");
        assert_eq!(format_amount(dec("999.999")), "1,000.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(dec("-1234.5")), "-1,234.50");
    }

    #[test]
    fn test_group_digits_keeps_fraction_untouched() {
        assert_eq!(group_digits("1234.5678"), "1,234.5678");
    }

    #[test]
    fn test_group_digits_empty() {
        assert_eq!(group_digits("abc"), "");
    }
}
