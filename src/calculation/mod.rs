//! Calculation logic for the Fair Share Calculator.
//!
//! This module contains amount parsing, input validation, the proportional
//! share split, display formatting, and the rate-limited [`Calculator`].

mod calculator;
mod formatting;
mod parsing;
mod rate_limit;
mod share_split;

pub use calculator::Calculator;
pub use formatting::{format_amount, group_digits};
pub use parsing::{AMOUNT_SCALE, parse_amount, strip_grouping};
pub use rate_limit::{
    DEFAULT_MAX_TRACKED_CALLERS, DEFAULT_MIN_INTERVAL, KeyedRateLimiter, RateLimiter,
};
pub use share_split::{
    DEFAULT_EXPENSE_LABEL, compute, compute_with_limits, has_computable_values, split_shares,
    validate,
};
