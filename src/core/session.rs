//! One editable grid: rows, columns, the interceptor and the gate.
//!
//! The edit cycle is split so it can be driven without blocking:
//!
//! ```text
//! begin_edit ─► Unchanged                      (nothing happens)
//!            └► Pending ─► cancel()            (no request, old value stays)
//!                       └► confirm() ─► ticket ─► settle(ticket, result)
//! ```
//!
//! `commit(&backend)` runs confirm, request and settle in one step. Rows only
//! change in `settle` (authoritative row on success) and `replace_rows`.

use crate::api::client::{Backend, fetch_rows};
use crate::api::error::RemoteError;
use crate::core::events::{EventBus, GridEvent};
use crate::core::gate::PersistenceGate;
use crate::core::interceptor::{Capture, ChangeInterceptor, EditState};
use crate::core::store::RowStore;
use crate::errors::{AppError, AppResult};
use crate::grid::adapter::GridAdapter;
use crate::models::change::{PendingChange, RemoteUpdateResult, UpdateTicket};
use crate::models::column::ColumnDescriptor;
use crate::models::resource::Resource;
use crate::models::row::{EditableRow, RowId};
use crate::ui::dialog::ConfirmDialog;
use crate::ui::messages::Notification;
use crate::utils::formatting::Formatter;

pub const CELL_UPDATED: &str = "Cell updated successfully!";

/// How a confirmed edit ended.
#[derive(Debug)]
pub enum EditOutcome {
    /// The row now holds the backend's copy.
    Committed {
        change: PendingChange,
        row: EditableRow,
    },
    /// The row still holds the old value.
    Failed {
        change: PendingChange,
        error: RemoteError,
    },
}

pub struct GridSession {
    resource: Resource,
    columns: Vec<ColumnDescriptor>,
    formatter: Formatter,
    store: RowStore,
    interceptor: ChangeInterceptor,
    gate: PersistenceGate,
    bus: EventBus,
    notifications: Vec<Notification>,
}

impl GridSession {
    pub fn new(resource: Resource, formatter: Formatter, rows: Vec<EditableRow>) -> Self {
        Self {
            resource,
            columns: resource.columns(),
            formatter,
            store: RowStore::new(rows),
            interceptor: ChangeInterceptor::new(),
            gate: PersistenceGate::new(resource),
            bus: EventBus::new(),
            notifications: Vec::new(),
        }
    }

    /// Fetch `resource` and open a session on it.
    pub fn load<B: Backend + ?Sized>(
        resource: Resource,
        formatter: Formatter,
        backend: &B,
    ) -> AppResult<Self> {
        let rows = fetch_rows(backend, resource)?;
        log::debug!("loaded {} {} rows", rows.len(), resource.name());
        Ok(Self::new(resource, formatter, rows))
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn adapter(&self) -> GridAdapter<'_> {
        GridAdapter::new(&self.columns, &self.formatter)
    }

    pub fn gate(&self) -> PersistenceGate {
        self.gate
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn rows(&self) -> &[EditableRow] {
        self.store.rows()
    }

    pub fn row(&self, id: &RowId) -> AppResult<&EditableRow> {
        self.store
            .get(id)
            .ok_or_else(|| AppError::UnknownRow(id.to_string()))
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// What the grid shows for a cell right now.
    pub fn display_cell(&self, id: &RowId, field: &str) -> AppResult<String> {
        self.adapter().display_cell(self.row(id)?, field)
    }

    pub fn state(&self) -> EditState<'_> {
        self.interceptor.state()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.interceptor.pending()
    }

    pub fn in_flight(&self) -> usize {
        self.interceptor.in_flight()
    }

    /// `true` while `id` has a pending change or an unsettled request.
    pub fn is_row_locked(&self, id: &RowId) -> bool {
        self.interceptor.is_locked(id)
    }

    /// A user typed `raw` into `field` of row `id`.
    pub fn begin_edit(&mut self, id: &RowId, field: &str, raw: &str) -> AppResult<Capture> {
        let edit = self.adapter().cell_edit(self.row(id)?, field, raw)?;
        let capture = self.interceptor.capture(edit)?;

        if let Some(change) = self.interceptor.pending()
            && capture == Capture::Pending
        {
            self.bus.publish(&GridEvent::EditCaptured {
                resource: self.resource,
                change: change.clone(),
            });
        }

        Ok(capture)
    }

    /// The dialog for the pending change, if any.
    pub fn dialog(&self) -> Option<ConfirmDialog> {
        let change = self.interceptor.pending()?;
        let column = self.columns.iter().find(|c| c.field == change.field)?;
        Some(ConfirmDialog::for_change(change, column, &self.formatter))
    }

    pub fn cancel(&mut self) -> Option<PendingChange> {
        let change = self.interceptor.cancel()?;
        self.bus.publish(&GridEvent::EditCancelled {
            resource: self.resource,
            change: change.clone(),
        });
        Some(change)
    }

    pub fn confirm(&mut self) -> AppResult<UpdateTicket> {
        self.interceptor.confirm()
    }

    /// Reconcile the result of a confirmed change.
    pub fn settle(&mut self, ticket: UpdateTicket, result: RemoteUpdateResult) -> AppResult<EditOutcome> {
        let change = self.interceptor.settle(ticket)?;

        match result {
            Ok(row) => {
                if !self.store.replace_row(row.clone()) {
                    log::warn!("row {} disappeared before its update settled", row.id());
                }
                self.notifications.push(Notification::success(CELL_UPDATED));
                self.bus.publish(&GridEvent::EditCommitted {
                    resource: self.resource,
                    change: change.clone(),
                    row: row.clone(),
                });
                Ok(EditOutcome::Committed { change, row })
            }
            Err(error) => {
                let message = error.user_message();
                log::warn!("update of row {} failed: {error}", change.row_id);
                self.notifications.push(Notification::error(message.clone()));
                self.bus.publish(&GridEvent::EditFailed {
                    resource: self.resource,
                    change: change.clone(),
                    message,
                });
                Ok(EditOutcome::Failed { change, error })
            }
        }
    }

    /// Confirm the pending change, send it and settle it.
    pub fn commit<B: Backend + ?Sized>(&mut self, backend: &B) -> AppResult<EditOutcome> {
        let ticket = self.confirm()?;
        let result = self.gate.persist(backend, ticket.change());
        self.settle(ticket, result)
    }

    /// Full refetch. Pending and in-flight edits are kept; they settle by id.
    pub fn replace_rows(&mut self, rows: Vec<EditableRow>) {
        let count = rows.len();
        self.store.replace_all(rows);
        self.bus.publish(&GridEvent::Refreshed {
            resource: self.resource,
            rows: count,
        });
    }

    pub fn refresh<B: Backend + ?Sized>(&mut self, backend: &B) -> AppResult<()> {
        let rows = fetch_rows(backend, self.resource)?;
        self.replace_rows(rows);
        Ok(())
    }

    /// Drain the notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub(crate) fn apply_authoritative(&mut self, row: EditableRow) -> bool {
        self.store.replace_row(row)
    }
}
