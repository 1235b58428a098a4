//! Client-side search, pagination and column visibility over a fetched dataset.
//!
//! All three work on borrowed rows, so a row on page 3 of a filtered view is
//! still the same `EditableRow` (same id) as in the full dataset.

use crate::errors::{AppError, AppResult};
use crate::grid::adapter::GridAdapter;
use crate::models::column::ColumnDescriptor;
use crate::models::row::EditableRow;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct ColumnVisibility {
    hidden: BTreeSet<String>,
}

impl ColumnVisibility {
    /// Hide `fields`; every name must be a known column.
    pub fn hiding(columns: &[ColumnDescriptor], fields: &[String]) -> AppResult<Self> {
        let mut hidden = BTreeSet::new();
        for f in fields {
            let f = f.trim();
            if f.is_empty() {
                continue;
            }
            if !columns.iter().any(|c| c.field == f) {
                return Err(AppError::UnknownField(f.to_string()));
            }
            hidden.insert(f.to_string());
        }
        Ok(Self { hidden })
    }

    pub fn is_visible(&self, field: &str) -> bool {
        !self.hidden.contains(field)
    }

    pub fn visible<'c>(
        &self,
        columns: &'c [ColumnDescriptor],
    ) -> impl Iterator<Item = &'c ColumnDescriptor> {
        columns.iter().filter(|c| self.is_visible(&c.field))
    }
}

/// Rows where any visible, displayed value contains `term`, ignoring case.
pub fn filter_by_search<'r>(
    rows: &'r [EditableRow],
    adapter: &GridAdapter<'_>,
    visibility: &ColumnVisibility,
    term: &str,
) -> Vec<&'r EditableRow> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            adapter
                .display_row(row, visibility)
                .iter()
                .any(|cell| cell.to_lowercase().contains(&term))
        })
        .collect()
}

#[derive(Debug)]
pub struct Page<'r> {
    pub rows: Vec<&'r EditableRow>,
    /// Zero-based, clamped to the last page.
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

/// One page of `filtered`. A page past the end is clamped to the last page;
/// an empty `filtered` gives one empty page.
pub fn paginate<'r>(filtered: &[&'r EditableRow], page: usize, page_size: usize) -> Page<'r> {
    let page_size = page_size.max(1);
    let total_rows = filtered.len();
    let total_pages = total_rows.div_ceil(page_size).max(1);
    let page = page.min(total_pages - 1);

    let start = (page * page_size).min(total_rows);
    let end = (start + page_size).min(total_rows);

    Page {
        rows: filtered[start..end].to_vec(),
        page,
        page_size,
        total_rows,
        total_pages,
    }
}
