//! The in-memory row array behind a grid.
//!
//! Mutated only by a full replacement (initial fetch, refetch) or by
//! replacing one row with the backend's authoritative copy. Replacement is
//! keyed by id against the current rows, so a refetch that lands between
//! confirm and settle is never overwritten by a stale snapshot.

use crate::models::row::{EditableRow, RowId};
use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct RowStore {
    rows: Vec<EditableRow>,
    revision: u64,
}

impl RowStore {
    pub fn new(rows: Vec<EditableRow>) -> Self {
        let mut store = Self::default();
        store.replace_all(rows);
        store
    }

    pub fn rows(&self) -> &[EditableRow] {
        &self.rows
    }

    pub fn get(&self, id: &RowId) -> Option<&EditableRow> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn replace_all(&mut self, rows: Vec<EditableRow>) {
        let mut seen = BTreeSet::new();
        for r in &rows {
            if !seen.insert(r.id().clone()) {
                log::warn!("duplicate row id {} in dataset", r.id());
            }
        }

        self.rows = rows;
        self.revision += 1;
    }

    /// Swap in `row` wherever its id currently is. `false` if the id is gone.
    pub fn replace_row(&mut self, row: EditableRow) -> bool {
        match self.rows.iter_mut().find(|r| r.id() == row.id()) {
            Some(slot) => {
                *slot = row;
                self.revision += 1;
                true
            }
            None => false,
        }
    }
}
