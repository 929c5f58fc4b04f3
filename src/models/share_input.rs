//! Share input model.
//!
//! A [`ShareInput`] is the calculator's state exactly as the user entered
//! it: two income fields and an ordered list of expense rows. It is the unit
//! of both computation and serialization.

use serde::{Deserialize, Deserializer, Serialize};

/// One expense row as entered.
///
/// The amount is kept as text; parsing and range checks happen in
/// [`crate::calculation::compute`]. When deserializing, the amount may be
/// a JSON string or number, and a missing or `null` label reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// The amount text, possibly with grouping commas.
    #[serde(deserialize_with = "text_or_number")]
    pub amount: String,
    /// Free-text description; may be empty.
    #[serde(default, deserialize_with = "text_or_number")]
    pub label: String,
}

impl ExpenseEntry {
    /// Creates an expense row from amount and label text.
    pub fn new(amount: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            label: label.into(),
        }
    }

    /// Returns true when the amount is blank once grouping commas and
    /// whitespace are removed. Such rows are ignored by the calculator.
    pub fn is_blank(&self) -> bool {
        self.amount.chars().all(|c| c == ',' || c.is_whitespace())
    }
}

/// The full calculator input.
///
/// Field names on the wire follow the share store's format (`salary1`,
/// `salary2`), with `incomeA`/`incomeB` accepted as aliases when reading.
///
/// # Example
///
/// ```
/// use fair_share::models::{ExpenseEntry, ShareInput};
///
/// let input = ShareInput::new("60,000", "40,000", vec![ExpenseEntry::new("1,000", "Rent")]);
/// let json = serde_json::to_value(&input).unwrap();
/// assert_eq!(json["salary1"], "60,000");
/// assert_eq!(json["expenses"][0]["label"], "Rent");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareInput {
    /// Income of party A, as entered.
    #[serde(rename = "salary1", alias = "incomeA", deserialize_with = "text_or_number")]
    pub income_a: String,
    /// Income of party B, as entered.
    #[serde(rename = "salary2", alias = "incomeB", deserialize_with = "text_or_number")]
    pub income_b: String,
    /// Expense rows in display order, blank rows included.
    pub expenses: Vec<ExpenseEntry>,
}

impl ShareInput {
    /// Creates an input from its parts.
    pub fn new(
        income_a: impl Into<String>,
        income_b: impl Into<String>,
        expenses: Vec<ExpenseEntry>,
    ) -> Self {
        Self {
            income_a: income_a.into(),
            income_b: income_b.into(),
            expenses,
        }
    }

    /// Number of rows whose amount is not blank.
    pub fn filled_expense_count(&self) -> usize {
        self.expenses.iter().filter(|e| !e.is_blank()).count()
    }
}

impl Default for ShareInput {
    /// The empty state: no incomes and a single blank expense row.
    fn default() -> Self {
        Self {
            income_a: String::new(),
            income_b: String::new(),
            expenses: vec![ExpenseEntry::default()],
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
}

/// Reads a string, a number (kept in its JSON spelling), or `null` as text.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(TextValue::Text(text)) => text,
        Some(TextValue::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_one_blank_row() {
        let input = ShareInput::default();
        assert_eq!(input.expenses.len(), 1);
        assert!(input.expenses[0].is_blank());
        assert!(input.income_a.is_empty());
    }

    #[test]
    fn test_is_blank_ignores_commas_and_whitespace() {
        assert!(ExpenseEntry::new("", "Rent").is_blank());
        assert!(ExpenseEntry::new("  , ", "").is_blank());
        assert!(!ExpenseEntry::new("0", "").is_blank());
    }

    #[test]
    fn test_filled_expense_count() {
        let input = ShareInput::new(
            "1",
            "1",
            vec![
                ExpenseEntry::new("10", "a"),
                ExpenseEntry::new("", "b"),
                ExpenseEntry::new("abc", "c"),
            ],
        );
        assert_eq!(input.filled_expense_count(), 2);
    }

    #[test]
    fn test_serializes_with_store_field_names() {
        let input = ShareInput::new("50000", "30000", vec![ExpenseEntry::new("1000", "Rent")]);
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(
            json,
            r#"{"salary1":"50000","salary2":"30000","expenses":[{"amount":"1000","label":"Rent"}]}"#
        );
    }

    #[test]
    fn test_deserializes_numbers_and_aliases() {
        let json = r#"{
            "incomeA": 60000,
            "incomeB": "40,000",
            "expenses": [{"amount": 1000.5}, {"amount": "20", "label": null}]
        }"#;
        let input: ShareInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.income_a, "60000");
        assert_eq!(input.income_b, "40,000");
        assert_eq!(input.expenses[0], ExpenseEntry::new("1000.5", ""));
        assert_eq!(input.expenses[1], ExpenseEntry::new("20", ""));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let json = r#"{"salary1": "1", "expenses": []}"#;
        let result: Result<ShareInput, _> = serde_json::from_str(json);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("salary2"));
    }
}
