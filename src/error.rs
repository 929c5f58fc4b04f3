//! Error types for the Fair Share Calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Every error in this crate is recoverable: validation errors are shown
//! inline, decode errors fall back to a default state, and store errors fall
//! back to a legacy link.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The summary shown to the user when any field fails validation.
pub const VALIDATION_SUMMARY: &str = "Oops! Looks like some numbers are missing. Please enter both salaries and at least one expense to calculate your fair shares.";

/// Why a single numeric field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldIssue {
    /// The field was blank.
    Missing,
    /// The field did not parse as a number.
    NotANumber,
    /// The field parsed to zero or a negative value.
    NotPositive,
    /// The field exceeded the configured upper bound.
    OutOfRange,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FieldIssue::Missing => "is required",
            FieldIssue::NotANumber => "is not a number",
            FieldIssue::NotPositive => "must be greater than zero",
            FieldIssue::OutOfRange => "is too large",
        };
        f.write_str(text)
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldError {
    /// Income of party A was invalid.
    IncomeA {
        /// What was wrong with it.
        issue: FieldIssue,
    },
    /// Income of party B was invalid.
    IncomeB {
        /// What was wrong with it.
        issue: FieldIssue,
    },
    /// An expense row was invalid.
    Expense {
        /// Position of the row in the submitted row list, blank rows included.
        index: usize,
        /// What was wrong with it.
        issue: FieldIssue,
    },
    /// No row produced a valid expense.
    NoExpenses,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::IncomeA { issue } => write!(f, "income A {}", issue),
            FieldError::IncomeB { issue } => write!(f, "income B {}", issue),
            FieldError::Expense { index, issue } => write!(f, "expense {} {}", index + 1, issue),
            FieldError::NoExpenses => f.write_str("at least one expense is required"),
        }
    }
}

/// Validation failure for a calculation request.
///
/// Every invalid field is listed, so a caller can flag each one rather
/// than only the first.
///
/// # Example
///
/// ```
/// use fair_share::error::{FieldError, FieldIssue, ValidationError};
///
/// let error = ValidationError::new(vec![FieldError::IncomeA {
///     issue: FieldIssue::NotPositive,
/// }]);
/// assert!(error.flags_income_a());
/// assert!(!error.flags_income_b());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    /// The fields that failed.
    pub fields: Vec<FieldError>,
    /// Human-readable summary.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error with the standard summary message.
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            message: VALIDATION_SUMMARY.to_string(),
        }
    }

    /// Returns true if income A was flagged.
    pub fn flags_income_a(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f, FieldError::IncomeA { .. }))
    }

    /// Returns true if income B was flagged.
    pub fn flags_income_b(&self) -> bool {
        self.fields
            .iter()
            .any(|f| matches!(f, FieldError::IncomeB { .. }))
    }

    /// Returns true if the failure includes the lack of any valid expense.
    pub fn flags_no_expenses(&self) -> bool {
        self.fields.contains(&FieldError::NoExpenses)
    }

    /// Returns the row indices of the flagged expenses, in row order.
    pub fn invalid_expense_rows(&self) -> Vec<usize> {
        self.fields
            .iter()
            .filter_map(|f| match f {
                FieldError::Expense { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }
}

/// Failure to decode a legacy query-string state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The expenses payload was longer than allowed.
    #[error("Expenses payload is too long: {len} characters (max {max})")]
    PayloadTooLong {
        /// Length of the payload.
        len: usize,
        /// The configured maximum.
        max: usize,
    },

    /// A scalar field was longer than allowed.
    #[error("Field '{field}' is too long: {len} characters (max {max})")]
    FieldTooLong {
        /// The query parameter name.
        field: String,
        /// Length of the value.
        len: usize,
        /// The configured maximum.
        max: usize,
    },

    /// The expenses payload was not valid JSON.
    #[error("Expenses payload is not valid JSON: {message}")]
    InvalidJson {
        /// The parser's description of the problem.
        message: String,
    },

    /// The expenses payload was JSON, but not an array.
    #[error("Expenses payload must be an array")]
    NotAnArray,

    /// The expenses array had too many entries.
    #[error("Too many expenses: {count} (max {max})")]
    TooManyExpenses {
        /// Number of entries in the array.
        count: usize,
        /// The configured maximum.
        max: usize,
    },
}

/// Failure talking to the opaque share store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Share store unreachable: {message}")]
    Unreachable {
        /// Transport-level description.
        message: String,
    },

    /// The store has no state for the identifier.
    #[error("Share not found: {id}")]
    NotFound {
        /// The identifier that was requested.
        id: String,
    },

    /// The store answered with a body that is not a valid share state.
    #[error("Malformed share body: {message}")]
    MalformedBody {
        /// What was missing or wrong.
        message: String,
    },

    /// The store answered with a non-success status.
    #[error("Share store rejected request (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response, or a generic message.
        message: String,
    },

    /// The identifier is not a well-formed share id.
    #[error("Invalid share id: {id}")]
    InvalidId {
        /// The rejected identifier (possibly truncated).
        id: String,
    },
}

/// The main error type for the Fair Share Calculator.
#[derive(Debug, Error)]
pub enum FairShareError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A legacy link could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The share store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A calculation arrived too soon after the previous one and was ignored.
    #[error("Calculation ignored: requested too soon after the previous one")]
    RateLimited,

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return FairShareError.
pub type FairShareResult<T> = Result<T, FairShareError>;
