// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::logic::GridExport;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed: one object per row, keyed by field name.
pub(crate) fn export_json(data: &GridExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let rows: Vec<Value> = data
        .rows
        .iter()
        .map(|cells| {
            let obj: Map<String, Value> = data
                .fields
                .iter()
                .cloned()
                .zip(cells.iter().cloned().map(Value::String))
                .collect();
            Value::Object(obj)
        })
        .collect();

    let json_data = serde_json::to_string_pretty(&rows)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with column titles as header.
pub(crate) fn export_csv(data: &GridExport, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&data.titles)?;

    for cells in &data.rows {
        wtr.write_record(cells)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
