//! Core data models for the Fair Share Calculator.
//!
//! This module contains the input state as entered, its validated form,
//! the computed breakdown, and the editable expense row list.

mod expense_rows;
mod share_input;
mod share_result;

pub use expense_rows::{ExpenseRows, RowId};
pub use share_input::{ExpenseEntry, ShareInput};
pub use share_result::{Expense, ExpenseShare, ShareResult, ShareTotals, ValidatedInput};
