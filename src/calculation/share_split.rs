//! Proportional share calculation.
//!
//! This module turns a [`ShareInput`] into a [`ShareResult`]: each party
//! pays a share of every expense proportional to their income.
//!
//! # Rules
//!
//! - Both incomes and every non-blank expense must be in `(0, max_amount]`.
//! - Blank expense rows are skipped; at least one valid expense is required.
//! - `share_a = amount * income_a / (income_a + income_b)` and
//!   `share_b = amount - share_a`, so the two always add back to the amount.
//! - Percentages are rounded half away from zero and are not forced to
//!   sum to 100.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::LimitsConfig;
use crate::error::{FieldError, FieldIssue, ValidationError};
use crate::models::{Expense, ExpenseShare, ShareInput, ShareResult, ShareTotals, ValidatedInput};

use super::parsing::{AMOUNT_SCALE, parse_amount};

/// Label given to expenses entered without one.
pub const DEFAULT_EXPENSE_LABEL: &str = "Expense";

/// Computes the share breakdown using the default limits.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::compute;
/// use fair_share::models::{ExpenseEntry, ShareInput};
/// use rust_decimal::Decimal;
///
/// let input = ShareInput::new("60000", "40000", vec![ExpenseEntry::new("1000", "Rent")]);
/// let result = compute(&input).unwrap();
///
/// assert_eq!(result.expenses[0].share_a, Decimal::new(600, 0));
/// assert_eq!(result.expenses[0].share_b, Decimal::new(400, 0));
/// assert_eq!(result.totals.percent_a, 60);
/// assert_eq!(result.totals.percent_b, 40);
/// ```
pub fn compute(input: &ShareInput) -> Result<ShareResult, ValidationError> {
    compute_with_limits(input, &LimitsConfig::default())
}

/// Computes the share breakdown using the given limits.
pub fn compute_with_limits(
    input: &ShareInput,
    limits: &LimitsConfig,
) -> Result<ShareResult, ValidationError> {
    let validated = validate(input, limits)?;
    Ok(split_shares(&validated))
}

/// Parses and range-checks every field, collecting all failures.
pub fn validate(input: &ShareInput, limits: &LimitsConfig) -> Result<ValidatedInput, ValidationError> {
    let mut fields = Vec::new();

    let income_a = parse_income(&input.income_a, limits)
        .map_err(|issue| fields.push(FieldError::IncomeA { issue }))
        .ok();
    let income_b = parse_income(&input.income_b, limits)
        .map_err(|issue| fields.push(FieldError::IncomeB { issue }))
        .ok();

    let mut expenses = Vec::new();
    for (index, entry) in input.expenses.iter().enumerate() {
        match parse_amount(&entry.amount, limits.max_amount) {
            Ok(None) => {}
            Ok(Some(amount)) => expenses.push(Expense {
                row: index,
                amount,
                label: normalize_label(&entry.label, limits.max_label_chars),
            }),
            Err(issue) => fields.push(FieldError::Expense { index, issue }),
        }
    }

    if expenses.is_empty() {
        fields.push(FieldError::NoExpenses);
    }

    match (income_a, income_b) {
        (Some(income_a), Some(income_b)) if fields.is_empty() => Ok(ValidatedInput {
            income_a,
            income_b,
            expenses,
        }),
        _ => Err(ValidationError::new(fields)),
    }
}

/// Splits every expense between the two parties.
///
/// The proportional weight is computed once and reused for every expense.
/// A zero income sum, which validation never produces, splits evenly.
pub fn split_shares(input: &ValidatedInput) -> ShareResult {
    let weight_a = input
        .income_a
        .checked_div(input.income_a + input.income_b)
        .unwrap_or(Decimal::new(5, 1));

    let mut total_a = Decimal::ZERO;
    let mut total_b = Decimal::ZERO;
    let expenses: Vec<ExpenseShare> = input
        .expenses
        .iter()
        .map(|expense| {
            let share_a = (expense.amount * weight_a).round_dp(AMOUNT_SCALE);
            let share_b = expense.amount - share_a;
            total_a += share_a;
            total_b += share_b;
            ExpenseShare {
                amount: expense.amount,
                label: expense.label.clone(),
                share_a,
                share_b,
            }
        })
        .collect();

    let total = total_a + total_b;

    ShareResult {
        expenses,
        totals: ShareTotals {
            total_a,
            total_b,
            total,
            percent_a: whole_percent(total_a, total),
            percent_b: whole_percent(total_b, total),
        },
    }
}

/// Quick check that an input has enough to compute a result: both incomes
/// positive and at least one positive expense. Invalid non-blank rows are
/// not considered here.
pub fn has_computable_values(input: &ShareInput, limits: &LimitsConfig) -> bool {
    let positive = |text: &str| matches!(parse_amount(text, limits.max_amount), Ok(Some(_)));
    positive(&input.income_a)
        && positive(&input.income_b)
        && input.expenses.iter().any(|e| positive(&e.amount))
}

fn parse_income(text: &str, limits: &LimitsConfig) -> Result<Decimal, FieldIssue> {
    parse_amount(text, limits.max_amount)?.ok_or(FieldIssue::Missing)
}

fn normalize_label(label: &str, max_chars: usize) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return DEFAULT_EXPENSE_LABEL.to_string();
    }
    trimmed.chars().take(max_chars).collect()
}

fn whole_percent(part: Decimal, total: Decimal) -> u32 {
    if total.is_zero() {
        return 0;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or_default()
}
