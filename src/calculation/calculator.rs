//! Rate-limited calculator.
//!
//! [`Calculator`] bundles the configured limits with rate limiting so a
//! caller can hand it raw input on every request. In-process callers share
//! one [`RateLimiter`] window; the HTTP server uses a [`KeyedRateLimiter`]
//! window per client address.

use std::net::IpAddr;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::{AppConfig, LimitsConfig};
use crate::error::{FairShareError, FairShareResult};
use crate::models::{ShareInput, ShareResult};

use super::rate_limit::{KeyedRateLimiter, RateLimiter};
use super::share_split::compute_with_limits;

/// Computes shares under the configured limits and rate limit.
///
/// # Example
///
/// ```
/// use fair_share::calculation::Calculator;
/// use fair_share::config::AppConfig;
/// use fair_share::models::{ExpenseEntry, ShareInput};
///
/// let calculator = Calculator::new(&AppConfig::default());
/// let input = ShareInput::new("1", "1", vec![ExpenseEntry::new("3", "")]);
/// assert!(calculator.compute(&input).is_ok());
/// ```
#[derive(Debug)]
pub struct Calculator {
    limits: LimitsConfig,
    limiter: RateLimiter,
    callers: KeyedRateLimiter<IpAddr>,
}

impl Calculator {
    /// Creates a calculator from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        let min_interval = Duration::from_millis(config.rate_limit.min_interval_ms);
        Self {
            limits: config.limits.clone(),
            limiter: RateLimiter::new(min_interval),
            callers: KeyedRateLimiter::new(min_interval, config.rate_limit.max_tracked_callers),
        }
    }

    /// The limits this calculator validates against.
    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Computes a share breakdown.
    ///
    /// Returns `RateLimited` when called again within the rate-limit window;
    /// the input is not examined in that case.
    pub fn compute(&self, input: &ShareInput) -> FairShareResult<ShareResult> {
        if !self.limiter.try_acquire() {
            debug!("Calculation rate limited");
            return Err(FairShareError::RateLimited);
        }
        self.compute_unlimited(input)
    }

    /// Computes a share breakdown for one caller.
    ///
    /// Only that caller's previous request counts toward the rate-limit
    /// window.
    pub fn compute_for(&self, caller: IpAddr, input: &ShareInput) -> FairShareResult<ShareResult> {
        if !self.callers.try_acquire(caller) {
            debug!(caller = %caller, "Calculation rate limited");
            return Err(FairShareError::RateLimited);
        }
        self.compute_unlimited(input)
    }

    fn compute_unlimited(&self, input: &ShareInput) -> FairShareResult<ShareResult> {
        let start = Instant::now();
        let result = compute_with_limits(input, &self.limits)?;
        debug!(
            expense_count = result.expenses.len(),
            total = %result.totals.total,
            duration_us = start.elapsed().as_micros() as u64,
            "Calculation completed"
        );
        Ok(result)
    }
}
