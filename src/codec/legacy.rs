//! Legacy self-contained share links.
//!
//! A legacy link carries the whole state in its query string:
//!
//! ```text
//! ?salary1=60000&salary2=40000&expenses=[{"amount":"1000","label":"Rent"}]
//! ```
//!
//! Older links used a bare array of amounts for `expenses`
//! (`expenses=[1000,250]`); those still decode, with empty labels. New
//! links are always written with `{amount, label}` objects.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::LimitsConfig;
use crate::error::DecodeError;
use crate::models::{ExpenseEntry, ShareInput};

use super::share_id::ShareId;

/// Query parameter holding party A's income.
pub const INCOME_A_PARAM: &str = "salary1";
/// Query parameter holding party B's income.
pub const INCOME_B_PARAM: &str = "salary2";
/// Query parameter holding the JSON expenses array.
pub const EXPENSES_PARAM: &str = "expenses";
/// Query parameter holding a share store id.
pub const SHARE_ID_PARAM: &str = "id";

/// Encodes an input as a legacy query string (without the leading `?`).
///
/// # Examples
///
/// ```
/// use fair_share::codec::encode_legacy;
/// use fair_share::models::{ExpenseEntry, ShareInput};
///
/// let input = ShareInput::new("50000", "30000", vec![ExpenseEntry::new("1000", "Rent")]);
/// assert_eq!(
///     encode_legacy(&input),
///     "salary1=50000&salary2=30000&expenses=%5B%7B%22amount%22%3A%221000%22%2C%22label%22%3A%22Rent%22%7D%5D"
/// );
/// ```
pub fn encode_legacy(input: &ShareInput) -> String {
    let expenses = Value::Array(
        input
            .expenses
            .iter()
            .map(|e| serde_json::json!({ "amount": e.amount, "label": e.label }))
            .collect(),
    );
    format!(
        "{}={}&{}={}&{}={}",
        INCOME_A_PARAM,
        urlencoding::encode(&input.income_a),
        INCOME_B_PARAM,
        urlencoding::encode(&input.income_b),
        EXPENSES_PARAM,
        urlencoding::encode(&expenses.to_string()),
    )
}

/// Builds a full legacy link on a page URL.
pub fn build_legacy_url(page_url: &str, input: &ShareInput) -> String {
    format!("{}?{}", strip_query(page_url), encode_legacy(input))
}

/// Builds a short link carrying only a share id.
///
/// # Examples
///
/// ```
/// use fair_share::codec::{ShareId, build_share_url};
///
/// let id = ShareId::parse("abc123").unwrap();
/// assert_eq!(
///     build_share_url("https://fairshare.example.com/?old=1#results", &id),
///     "https://fairshare.example.com/?id=abc123"
/// );
/// ```
pub fn build_share_url(page_url: &str, id: &ShareId) -> String {
    format!(
        "{}?{}={}",
        strip_query(page_url),
        SHARE_ID_PARAM,
        urlencoding::encode(id.as_str())
    )
}

/// Decodes a legacy query string using the default limits.
///
/// Accepts a bare query (`salary1=…`), a query with a leading `?`, or a
/// full URL. Returns `Ok(None)` when any of the three parameters is absent
/// or empty.
pub fn decode_legacy(reference: &str) -> Result<Option<ShareInput>, DecodeError> {
    decode_legacy_with_limits(reference, &LimitsConfig::default())
}

/// Decodes a legacy query string using the given limits.
pub fn decode_legacy_with_limits(
    reference: &str,
    limits: &LimitsConfig,
) -> Result<Option<ShareInput>, DecodeError> {
    let params = parse_query(reference);
    let present = |name: &str| params.get(name).filter(|value| !value.is_empty());

    let (Some(income_a), Some(income_b), Some(expenses)) = (
        present(INCOME_A_PARAM),
        present(INCOME_B_PARAM),
        present(EXPENSES_PARAM),
    ) else {
        return Ok(None);
    };

    check_field_len(INCOME_A_PARAM, income_a, limits.max_income_chars)?;
    check_field_len(INCOME_B_PARAM, income_b, limits.max_income_chars)?;
    let expenses = decode_expenses(expenses, limits)?;

    Ok(Some(ShareInput::new(income_a.as_str(), income_b.as_str(), expenses)))
}

/// Decodes a legacy query string, returning the default state on any
/// decode failure or when no legacy reference is present.
pub fn decode_legacy_or_default(reference: &str) -> ShareInput {
    match decode_legacy(reference) {
        Ok(Some(input)) => input,
        Ok(None) => ShareInput::default(),
        Err(error) => {
            warn!(error = %error, "Failed to decode legacy link, using default state");
            ShareInput::default()
        }
    }
}

/// Checks that an input fits within the size limits a decoded link is held
/// to. Used before storing a share.
pub fn check_input_limits(input: &ShareInput, limits: &LimitsConfig) -> Result<(), DecodeError> {
    check_field_len(INCOME_A_PARAM, &input.income_a, limits.max_income_chars)?;
    check_field_len(INCOME_B_PARAM, &input.income_b, limits.max_income_chars)?;
    if input.expenses.len() > limits.max_expenses {
        return Err(DecodeError::TooManyExpenses {
            count: input.expenses.len(),
            max: limits.max_expenses,
        });
    }
    for (index, entry) in input.expenses.iter().enumerate() {
        check_field_len(
            &format!("expenses[{}].amount", index),
            &entry.amount,
            limits.max_income_chars,
        )?;
        check_field_len(
            &format!("expenses[{}].label", index),
            &entry.label,
            limits.max_label_chars,
        )?;
    }
    Ok(())
}

/// Parses a JSON expenses array, in either object or bare-amount form.
///
/// Shared with the local cache, which stores the same JSON shape.
pub(crate) fn decode_expenses(
    payload: &str,
    limits: &LimitsConfig,
) -> Result<Vec<ExpenseEntry>, DecodeError> {
    let len = payload.chars().count();
    if len > limits.max_expenses_payload_chars {
        return Err(DecodeError::PayloadTooLong {
            len,
            max: limits.max_expenses_payload_chars,
        });
    }

    let value: Value = serde_json::from_str(payload).map_err(|e| DecodeError::InvalidJson {
        message: e.to_string(),
    })?;
    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };
    if items.len() > limits.max_expenses {
        return Err(DecodeError::TooManyExpenses {
            count: items.len(),
            max: limits.max_expenses,
        });
    }

    let entries: Vec<ExpenseEntry> = items.iter().filter_map(entry_from_value).collect();
    debug!(
        entries = entries.len(),
        skipped = items.len() - entries.len(),
        "Decoded expenses payload"
    );
    Ok(entries)
}

/// Reads one array element. Falsy elements (`null`, `false`, `0`, `""`) and
/// other scalars are skipped.
fn entry_from_value(value: &Value) -> Option<ExpenseEntry> {
    match value {
        Value::Object(fields) => Some(ExpenseEntry::new(
            fields.get("amount").map(scalar_text).unwrap_or_default(),
            fields.get("label").map(scalar_text).unwrap_or_default(),
        )),
        Value::Number(number) if number.as_f64() != Some(0.0) => {
            Some(ExpenseEntry::new(number.to_string(), ""))
        }
        Value::String(text) if !text.is_empty() => Some(ExpenseEntry::new(text.as_str(), "")),
        _ => None,
    }
}

/// Text of a string or number; empty for anything else.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn check_field_len(field: &str, value: &str, max: usize) -> Result<(), DecodeError> {
    let len = value.chars().count();
    if len > max {
        return Err(DecodeError::FieldTooLong {
            field: field.to_string(),
            len,
            max,
        });
    }
    Ok(())
}

/// Splits a query string into decoded parameters. The first occurrence of
/// a name wins; `+` decodes to a space.
pub(crate) fn parse_query(reference: &str) -> HashMap<String, String> {
    let query = query_part(reference);
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(key))
            .or_insert_with(|| decode_component(value));
    }
    params
}

fn decode_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

/// The query portion of a reference: text after the first `?` (or the
/// whole reference if it has none), without any `#fragment`.
fn query_part(reference: &str) -> &str {
    let without_fragment = reference.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    }
}

fn strip_query(page_url: &str) -> &str {
    page_url
        .split(['?', '#'])
        .next()
        .unwrap_or(page_url)
}
