// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::grid::adapter::GridAdapter;
use crate::grid::search::ColumnVisibility;
use crate::models::row::EditableRow;
use crate::ui::messages::warning;
use std::path::Path;

/// A grid view flattened to display strings, as it would appear on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridExport {
    pub fields: Vec<String>,
    pub titles: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl GridExport {
    pub fn build(
        adapter: &GridAdapter<'_>,
        rows: &[&EditableRow],
        visibility: &ColumnVisibility,
    ) -> Self {
        let visible: Vec<_> = visibility.visible(adapter.columns()).collect();

        Self {
            fields: visible.iter().map(|c| c.field.clone()).collect(),
            titles: visible.iter().map(|c| c.title.clone()).collect(),
            rows: rows
                .iter()
                .map(|r| adapter.display_row(r, visibility))
                .collect(),
        }
    }
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `data` to `file` (absolute path) in `format`.
    pub fn export(data: &GridExport, format: ExportFormat, file: &str, force: bool) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        if data.rows.is_empty() {
            warning("No rows match; writing an empty export.");
        }

        match format {
            ExportFormat::Csv => export_csv(data, path),
            ExportFormat::Json => export_json(data, path),
        }
    }
}
