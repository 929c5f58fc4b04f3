//! Editable expense row list.
//!
//! [`ExpenseRows`] manages the ordered list of expense rows a user is
//! editing. Each row gets a [`RowId`] from an explicit sequence owned by the
//! list, so ids stay unique across additions and deletions.

use serde::{Deserialize, Serialize};

use super::{ExpenseEntry, ShareInput};

/// Stable identifier of an expense row within one [`ExpenseRows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u32);

/// An ordered list of expense rows with its own id sequence.
///
/// The list always holds at least one row, and the first row can never be
/// removed.
///
/// # Example
///
/// ```
/// use fair_share::models::ExpenseRows;
///
/// let mut rows = ExpenseRows::new();
/// let second = rows.add_row();
/// assert_eq!(rows.len(), 2);
/// assert!(rows.remove_row(second));
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRows {
    rows: Vec<(RowId, ExpenseEntry)>,
    next_id: u32,
}

impl ExpenseRows {
    /// Creates a list with one blank row.
    pub fn new() -> Self {
        Self {
            rows: vec![(RowId(1), ExpenseEntry::default())],
            next_id: 2,
        }
    }

    /// Rebuilds a list from saved entries, numbering rows from 1.
    ///
    /// An empty slice yields a single blank row.
    pub fn from_entries(entries: &[ExpenseEntry]) -> Self {
        if entries.is_empty() {
            return Self::new();
        }
        let rows: Vec<(RowId, ExpenseEntry)> = entries
            .iter()
            .cloned()
            .zip(1u32..)
            .map(|(entry, id)| (RowId(id), entry))
            .collect();
        let next_id = rows
            .last()
            .map_or(1, |(RowId(last), _)| last.saturating_add(1));
        Self { rows, next_id }
    }

    /// Appends a blank row and returns its id. Ids saturate at `u32::MAX`.
    pub fn add_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.rows.push((id, ExpenseEntry::default()));
        id
    }

    /// Removes a row. The first row and the last remaining row are kept.
    ///
    /// Returns true if a row was removed.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        match self.rows.iter().position(|(row_id, _)| *row_id == id) {
            Some(0) | None => false,
            Some(position) => {
                self.rows.remove(position);
                true
            }
        }
    }

    /// Returns a mutable reference to a row's entry.
    pub fn entry_mut(&mut self, id: RowId) -> Option<&mut ExpenseEntry> {
        self.rows
            .iter_mut()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, entry)| entry)
    }

    /// Row ids in display order.
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; the list keeps at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds a share input from this list and the two income fields.
    pub fn to_share_input(&self, income_a: &str, income_b: &str) -> ShareInput {
        ShareInput::new(
            income_a,
            income_b,
            self.rows.iter().map(|(_, entry)| entry.clone()).collect(),
        )
    }
}

impl Default for ExpenseRows {
    fn default() -> Self {
        Self::new()
    }
}
