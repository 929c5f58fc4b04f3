//! Local form cache.
//!
//! The last-entered incomes and expenses are kept under fixed keys in a
//! key-value capability provided by the host (browser storage, a file, or
//! memory). [`FormCache`] reads and writes that shape; saving is an explicit
//! step the caller takes after a calculation.

use std::collections::HashMap;

use tracing::warn;

use crate::calculation::DEFAULT_EXPENSE_LABEL;
use crate::config::LimitsConfig;
use crate::models::{ExpenseEntry, ShareInput};

use super::legacy::{check_field_len, decode_expenses};

/// Cache key for party A's income.
pub const INCOME_A_KEY: &str = "salary1";
/// Cache key for party B's income.
pub const INCOME_B_KEY: &str = "salary2";
/// Cache key for the JSON expenses array.
pub const EXPENSES_KEY: &str = "expenses";
/// Cache key for the number of rows on screen.
pub const EXPENSE_COUNT_KEY: &str = "expenseCount";

/// A string key-value store.
pub trait KeyValueCache {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes a value.
    fn set(&mut self, key: &str, value: String);
    /// Deletes a value.
    fn remove(&mut self, key: &str);
}

/// A [`KeyValueCache`] held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Reads and writes calculator state in a [`KeyValueCache`].
#[derive(Debug, Clone, Default)]
pub struct FormCache<C> {
    cache: C,
    limits: LimitsConfig,
}

impl<C: KeyValueCache> FormCache<C> {
    /// Wraps a cache with the default limits.
    pub fn new(cache: C) -> Self {
        Self::with_limits(cache, LimitsConfig::default())
    }

    /// Wraps a cache with the given limits.
    pub fn with_limits(cache: C, limits: LimitsConfig) -> Self {
        Self { cache, limits }
    }

    /// The underlying cache.
    pub fn inner(&self) -> &C {
        &self.cache
    }

    /// Saves the incomes and non-blank expenses. Rows the calculator treats
    /// as blank are skipped and empty labels are stored as `"Expense"`.
    pub fn save(&mut self, input: &ShareInput) {
        self.cache.set(INCOME_A_KEY, input.income_a.clone());
        self.cache.set(INCOME_B_KEY, input.income_b.clone());

        let expenses: Vec<ExpenseEntry> = input
            .expenses
            .iter()
            .filter(|e| !e.is_blank())
            .map(|e| {
                let label = e.label.trim();
                ExpenseEntry::new(
                    e.amount.trim(),
                    if label.is_empty() {
                        DEFAULT_EXPENSE_LABEL
                    } else {
                        label
                    },
                )
            })
            .collect();

        match serde_json::to_string(&expenses) {
            Ok(json) => self.cache.set(EXPENSES_KEY, json),
            Err(error) => warn!(error = %error, "Failed to serialize expenses for cache"),
        }
        self.cache
            .set(EXPENSE_COUNT_KEY, input.expenses.len().max(1).to_string());
    }

    /// Loads the cached state, or `None` if nothing was cached.
    ///
    /// A corrupted expenses entry is removed from the cache and replaced by
    /// a single blank row; the cached incomes are kept.
    pub fn load(&mut self) -> Option<ShareInput> {
        let income_a = self.cached_income(INCOME_A_KEY);
        let income_b = self.cached_income(INCOME_B_KEY);
        let saved_expenses = self.cache.get(EXPENSES_KEY);

        if income_a.is_none() && income_b.is_none() && saved_expenses.is_none() {
            return None;
        }

        let expenses = match saved_expenses {
            Some(json) => match decode_expenses(&json, &self.limits) {
                Ok(entries) if !entries.is_empty() => entries,
                Ok(_) => vec![ExpenseEntry::default()],
                Err(error) => {
                    warn!(error = %error, "Discarding corrupted cached expenses");
                    self.cache.remove(EXPENSES_KEY);
                    vec![ExpenseEntry::default()]
                }
            },
            None => vec![ExpenseEntry::default()],
        };

        Some(ShareInput::new(
            income_a.unwrap_or_default(),
            income_b.unwrap_or_default(),
            expenses,
        ))
    }

    /// Reads a cached income. An overlong value is removed from the cache
    /// and read as empty.
    fn cached_income(&mut self, key: &str) -> Option<String> {
        let income = self.cache.get(key)?;
        match check_field_len(key, &income, self.limits.max_income_chars) {
            Ok(()) => Some(income),
            Err(error) => {
                warn!(error = %error, "Discarding oversized cached income");
                self.cache.remove(key);
                Some(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_loads_nothing() {
        let mut cache = FormCache::new(MemoryCache::new());
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_save_keeps_only_filled_rows_and_defaults_labels() {
        let mut cache = FormCache::new(MemoryCache::new());
        cache.save(&ShareInput::new(
            "60,000",
            "40,000",
            vec![
                ExpenseEntry::new(" 1,000 ", " Rent "),
                ExpenseEntry::new("", "Unused"),
                ExpenseEntry::new("50", ""),
            ],
        ));

        assert_eq!(
            cache.inner().get(EXPENSES_KEY).as_deref(),
            Some(r#"[{"amount":"1,000","label":"Rent"},{"amount":"50","label":"Expense"}]"#)
        );
        assert_eq!(cache.inner().get(EXPENSE_COUNT_KEY).as_deref(), Some("3"));

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.income_a, "60,000");
        assert_eq!(loaded.expenses.len(), 2);
        assert_eq!(loaded.expenses[1], ExpenseEntry::new("50", "Expense"));
    }

    #[test]
    fn test_comma_only_rows_are_not_saved() {
        let mut cache = FormCache::new(MemoryCache::new());
        cache.save(&ShareInput::new(
            "1",
            "1",
            vec![ExpenseEntry::new(",,", "Typo"), ExpenseEntry::new("5", "Tea")],
        ));
        assert_eq!(
            cache.inner().get(EXPENSES_KEY).as_deref(),
            Some(r#"[{"amount":"5","label":"Tea"}]"#)
        );
    }

    #[test]
    fn test_oversized_cached_income_is_discarded() {
        let limits = LimitsConfig::default();
        let mut inner = MemoryCache::new();
        inner.set(INCOME_A_KEY, "9".repeat(limits.max_income_chars + 1));
        inner.set(INCOME_B_KEY, "40000".to_string());
        let mut cache = FormCache::with_limits(inner, limits);

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.income_a, "");
        assert_eq!(loaded.income_b, "40000");
        assert_eq!(cache.inner().get(INCOME_A_KEY), None);
    }

    #[test]
    fn test_corrupted_expenses_are_removed() {
        let mut inner = MemoryCache::new();
        inner.set(INCOME_A_KEY, "100".to_string());
        inner.set(EXPENSES_KEY, "[1,2".to_string());
        let mut cache = FormCache::new(inner);

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.income_a, "100");
        assert_eq!(loaded.expenses, vec![ExpenseEntry::default()]);
        assert_eq!(cache.inner().get(EXPENSES_KEY), None);
    }

    #[test]
    fn test_too_many_cached_expenses_are_removed() {
        let mut inner = MemoryCache::new();
        inner.set(EXPENSES_KEY, format!("[{}]", vec!["1"; 51].join(",")));
        let mut cache = FormCache::new(inner);

        let loaded = cache.load().unwrap();
        assert_eq!(loaded.expenses, vec![ExpenseEntry::default()]);
        assert_eq!(cache.inner().get(EXPENSES_KEY), None);
    }

    #[test]
    fn test_empty_cached_list_yields_blank_row() {
        let mut inner = MemoryCache::new();
        inner.set(EXPENSES_KEY, "[]".to_string());
        let mut cache = FormCache::new(inner);
        assert_eq!(cache.load().unwrap().expenses, vec![ExpenseEntry::default()]);
    }
}
