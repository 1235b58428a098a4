//! Whole-form submission: many fields, one request, one notification.
//!
//! Separate from the confirm-per-cell cycle. There is no dialog and no
//! per-field diff; the form is validated, sent, and the authoritative row
//! replaces the local one.

use crate::api::client::Backend;
use crate::api::error::RemoteError;
use crate::core::events::GridEvent;
use crate::core::session::GridSession;
use crate::errors::{AppError, AppResult};
use crate::models::row::{EditableRow, RowId};
use crate::ui::messages::Notification;
use serde_json::Value;

pub const FORM_SUBMITTED: &str = "Form submitted successfully!";

#[derive(Debug)]
pub enum FormOutcome {
    Submitted(EditableRow),
    Failed(RemoteError),
}

/// `field=value` pairs typed into a form for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub row_id: RowId,
    pub values: Vec<(String, String)>,
}

impl FormSubmission {
    pub fn new(row_id: RowId, values: Vec<(String, String)>) -> Self {
        Self { row_id, values }
    }

    /// Validate every field, then send them all in one request.
    ///
    /// Rejected locally (no request) when a field is unknown, read-only or
    /// unparsable, or when the row is locked by the confirm-per-cell cycle.
    pub fn submit<B: Backend + ?Sized>(
        &self,
        session: &mut GridSession,
        backend: &B,
    ) -> AppResult<FormOutcome> {
        if self.values.is_empty() {
            return Err(AppError::Other("Nothing to submit".into()));
        }
        if session.is_row_locked(&self.row_id) {
            return Err(AppError::RowBusy(self.row_id.to_string()));
        }

        let parsed: Vec<(String, Value)> = {
            let row = session.row(&self.row_id)?;
            let adapter = session.adapter();
            self.values
                .iter()
                .map(|(field, raw)| {
                    adapter
                        .cell_edit(row, field, raw)
                        .map(|edit| (edit.field, edit.new_value))
                })
                .collect::<AppResult<_>>()?
        };

        let fields: Vec<(&str, &Value)> = parsed.iter().map(|(f, v)| (f.as_str(), v)).collect();
        let resource = session.resource();

        match session.gate().persist_fields(backend, &self.row_id, &fields) {
            Ok(row) => {
                if !session.apply_authoritative(row.clone()) {
                    log::warn!("row {} disappeared before the form settled", row.id());
                }
                session.notify(Notification::success(FORM_SUBMITTED));
                session.bus().publish(&GridEvent::FormSubmitted {
                    resource,
                    row_id: self.row_id.clone(),
                    fields: parsed.iter().map(|(f, _)| f.clone()).collect(),
                });
                Ok(FormOutcome::Submitted(row))
            }
            Err(error) => {
                let message = error.user_message();
                session.notify(Notification::error(message.clone()));
                session.bus().publish(&GridEvent::FormFailed {
                    resource,
                    row_id: self.row_id.clone(),
                    message,
                });
                Ok(FormOutcome::Failed(error))
            }
        }
    }
}
