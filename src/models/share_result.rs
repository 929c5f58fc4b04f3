//! Share result models.
//!
//! This module contains the validated, parsed form of a [`ShareInput`]
//! and the [`ShareResult`] breakdown computed from it.
//!
//! [`ShareInput`]: super::ShareInput

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed, range-checked expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Position of the source row in the submitted row list.
    pub row: usize,
    /// The shared cost, always positive.
    pub amount: Decimal,
    /// Trimmed label, defaulted to `"Expense"` when empty.
    pub label: String,
}

/// The parsed form of a share input, guaranteed to satisfy every
/// validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    /// Income of party A, always positive.
    pub income_a: Decimal,
    /// Income of party B, always positive.
    pub income_b: Decimal,
    /// At least one expense, in row order.
    pub expenses: Vec<Expense>,
}

/// One expense split between the two parties.
///
/// # Example
///
/// ```
/// use fair_share::models::ExpenseShare;
/// use rust_decimal::Decimal;
///
/// let share = ExpenseShare {
///     amount: Decimal::new(1000, 0),
///     label: "Rent".to_string(),
///     share_a: Decimal::new(600, 0),
///     share_b: Decimal::new(400, 0),
/// };
/// assert_eq!(share.share_a + share.share_b, share.amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseShare {
    /// The shared cost.
    pub amount: Decimal,
    /// The expense label.
    pub label: String,
    /// Party A's portion.
    pub share_a: Decimal,
    /// Party B's portion, `amount - share_a`.
    pub share_b: Decimal,
}

/// Aggregate figures across all expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareTotals {
    /// Sum of party A's shares.
    pub total_a: Decimal,
    /// Sum of party B's shares.
    pub total_b: Decimal,
    /// `total_a + total_b`.
    pub total: Decimal,
    /// Party A's share of the total, rounded to a whole percent.
    pub percent_a: u32,
    /// Party B's share of the total, rounded to a whole percent.
    pub percent_b: u32,
}

/// The complete breakdown for one share input.
///
/// A result is never mutated; a new input produces a new result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    /// Per-expense splits, in row order. Blank rows do not appear.
    pub expenses: Vec<ExpenseShare>,
    /// Aggregate totals.
    pub totals: ShareTotals,
}
