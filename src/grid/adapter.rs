//! Binds rows and column descriptors to a text grid.
//!
//! The adapter never writes to its rows. An edit comes out as a `CellEdit`
//! and is applied only after the persistence gate succeeds.

use crate::errors::{AppError, AppResult};
use crate::grid::search::ColumnVisibility;
use crate::models::change::CellEdit;
use crate::models::column::ColumnDescriptor;
use crate::models::row::EditableRow;
use crate::models::value::parse_input;
use crate::utils::formatting::Formatter;
use crate::utils::table::Table;

pub struct GridAdapter<'a> {
    columns: &'a [ColumnDescriptor],
    formatter: &'a Formatter,
}

impl<'a> GridAdapter<'a> {
    pub fn new(columns: &'a [ColumnDescriptor], formatter: &'a Formatter) -> Self {
        Self { columns, formatter }
    }

    pub fn columns(&self) -> &'a [ColumnDescriptor] {
        self.columns
    }

    pub fn formatter(&self) -> &'a Formatter {
        self.formatter
    }

    pub fn column(&self, field: &str) -> AppResult<&'a ColumnDescriptor> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .ok_or_else(|| AppError::UnknownField(field.to_string()))
    }

    /// Display string for one cell.
    pub fn display(&self, row: &EditableRow, column: &ColumnDescriptor) -> String {
        self.formatter.display(column.kind, row.get(&column.field))
    }

    pub fn display_cell(&self, row: &EditableRow, field: &str) -> AppResult<String> {
        Ok(self.display(row, self.column(field)?))
    }

    /// Display strings for the visible columns of `row`, in column order.
    pub fn display_row(&self, row: &EditableRow, visibility: &ColumnVisibility) -> Vec<String> {
        visibility
            .visible(self.columns)
            .map(|c| self.display(row, c))
            .collect()
    }

    pub fn render<'r, I>(&self, rows: I, visibility: &ColumnVisibility) -> Table
    where
        I: IntoIterator<Item = &'r EditableRow>,
    {
        let headers: Vec<&str> = visibility
            .visible(self.columns)
            .map(|c| c.title.as_str())
            .collect();
        let mut table = Table::new(&headers);

        for row in rows {
            table.add_row(self.display_row(row, visibility));
        }

        table
    }

    /// Turn typed input on a cell into a `CellEdit`.
    ///
    /// Read-only columns never produce one. Whether the edit changes
    /// anything is the interceptor's call, not ours.
    pub fn cell_edit(&self, row: &EditableRow, field: &str, raw: &str) -> AppResult<CellEdit> {
        let column = self.column(field)?;
        if !column.editable {
            return Err(AppError::NotEditable(field.to_string()));
        }

        let new_value = parse_input(column.kind, field, raw, self.formatter)?;

        Ok(CellEdit {
            row_id: row.id().clone(),
            field: column.field.clone(),
            kind: column.kind,
            old_value: row.get(field).clone(),
            new_value,
        })
    }
}
