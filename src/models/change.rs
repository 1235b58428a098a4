use crate::api::error::RemoteError;
use crate::models::row::{EditableRow, RowId};
use crate::models::value::FieldKind;
use serde_json::Value;

/// What the grid adapter emits instead of committing an edit itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row_id: RowId,
    pub field: String,
    pub kind: FieldKind,
    pub old_value: Value,
    pub new_value: Value,
}

/// An uncommitted single-field edit awaiting confirmation.
/// Lives for one dialog only and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub row_id: RowId,
    pub field: String,
    pub kind: FieldKind,
    pub old_value: Value,
    pub new_value: Value,
}

impl From<CellEdit> for PendingChange {
    fn from(e: CellEdit) -> Self {
        Self {
            row_id: e.row_id,
            field: e.field,
            kind: e.kind,
            old_value: e.old_value,
            new_value: e.new_value,
        }
    }
}

/// A confirmed change whose request has not settled yet.
///
/// Handed out by `confirm()`, consumed by `settle()`. Not `Clone`, so a
/// ticket settles at most once.
#[derive(Debug, PartialEq)]
pub struct UpdateTicket {
    pub(crate) id: u64,
    pub(crate) change: PendingChange,
}

impl UpdateTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn change(&self) -> &PendingChange {
        &self.change
    }
}

/// The authoritative row, or why there is none.
pub type RemoteUpdateResult = Result<EditableRow, RemoteError>;
