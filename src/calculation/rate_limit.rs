//! Rapid-fire calculation guard.
//!
//! A calculation request arriving within a short window of the previous
//! accepted one is dropped. Dropping is a no-op for the caller, not a
//! failure.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default minimum interval between accepted calculations.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Default number of callers a [`KeyedRateLimiter`] tracks at once.
pub const DEFAULT_MAX_TRACKED_CALLERS: usize = 10_000;

/// Accepts at most one request per interval.
///
/// # Examples
///
/// ```
/// use fair_share::calculation::RateLimiter;
/// use std::time::{Duration, Instant};
///
/// let limiter = RateLimiter::new(Duration::from_millis(100));
/// let start = Instant::now();
/// assert!(limiter.try_acquire_at(start));
/// assert!(!limiter.try_acquire_at(start + Duration::from_millis(50)));
/// assert!(limiter.try_acquire_at(start + Duration::from_millis(150)));
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_accepted: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter. A zero interval accepts everything.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: Mutex::new(None),
        }
    }

    /// The configured interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Tries to accept a request now.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Tries to accept a request at `now`. Rejected requests do not move
    /// the window.
    pub fn try_acquire_at(&self, now: Instant) -> bool {
        if self.min_interval.is_zero() {
            return true;
        }
        let mut last = match self.last_accepted.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let too_soon = last
            .map(|previous| now.saturating_duration_since(previous) < self.min_interval)
            .unwrap_or(false);
        if too_soon {
            return false;
        }
        *last = Some(now);
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

/// A [`RateLimiter`] window per caller.
///
/// Each key gets its own interval, so one caller's bursts never delay
/// another. At most `max_keys` callers are tracked; entries whose window
/// has passed are dropped when the map fills, and a caller arriving while
/// every tracked window is still open is accepted untracked.
#[derive(Debug)]
pub struct KeyedRateLimiter<K> {
    min_interval: Duration,
    max_keys: usize,
    last_accepted: Mutex<HashMap<K, Instant>>,
}

impl<K: Eq + Hash> KeyedRateLimiter<K> {
    /// Creates a limiter. A zero interval accepts everything.
    pub fn new(min_interval: Duration, max_keys: usize) -> Self {
        Self {
            min_interval,
            max_keys,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    /// Tries to accept a request from `key` now.
    pub fn try_acquire(&self, key: K) -> bool {
        self.try_acquire_at(key, Instant::now())
    }

    /// Tries to accept a request from `key` at `now`.
    pub fn try_acquire_at(&self, key: K, now: Instant) -> bool {
        if self.min_interval.is_zero() {
            return true;
        }
        let mut last = match self.last_accepted.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let open = |previous: &Instant| now.saturating_duration_since(*previous) < self.min_interval;

        if last.get(&key).is_some_and(open) {
            return false;
        }
        if !last.contains_key(&key) && last.len() >= self.max_keys {
            last.retain(|_, previous| open(&*previous));
            if last.len() >= self.max_keys {
                return true;
            }
        }
        last.insert(key, now);
        true
    }

    /// Number of callers currently tracked.
    pub fn tracked(&self) -> usize {
        match self.last_accepted.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}
