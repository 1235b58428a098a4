//! Gates grid edits behind confirmation.
//!
//! States: `Idle` or `PendingConfirmation(change)`. At most one change is
//! pending per grid. Confirming turns the pending change into an
//! `UpdateTicket` and marks its row in flight; no edit on that row is
//! captured until the ticket is settled. Other rows stay editable.

use crate::errors::{AppError, AppResult};
use crate::models::change::{CellEdit, PendingChange, UpdateTicket};
use crate::models::row::RowId;
use crate::models::value::values_equal;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// New value normalizes equal to the old one. Nothing to confirm.
    Unchanged,
    /// A `PendingChange` now waits for confirmation.
    Pending,
}

#[derive(Debug, PartialEq)]
pub enum EditState<'a> {
    Idle,
    PendingConfirmation(&'a PendingChange),
}

#[derive(Debug, Default)]
pub struct ChangeInterceptor {
    pending: Option<PendingChange>,
    in_flight: BTreeMap<u64, PendingChange>,
    next_ticket: u64,
}

impl ChangeInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState<'_> {
        match &self.pending {
            Some(change) => EditState::PendingConfirmation(change),
            None => EditState::Idle,
        }
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    /// `true` while a confirmed request for `row_id` has not settled.
    pub fn is_busy(&self, row_id: &RowId) -> bool {
        self.in_flight.values().any(|c| &c.row_id == row_id)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Rows that may not take an edit right now.
    pub fn is_locked(&self, row_id: &RowId) -> bool {
        self.is_busy(row_id) || self.pending.as_ref().is_some_and(|p| &p.row_id == row_id)
    }

    pub fn capture(&mut self, edit: CellEdit) -> AppResult<Capture> {
        if let Some(p) = &self.pending {
            return Err(AppError::EditInProgress(p.row_id.to_string()));
        }
        if self.is_busy(&edit.row_id) {
            return Err(AppError::RowBusy(edit.row_id.to_string()));
        }
        if values_equal(edit.kind, &edit.old_value, &edit.new_value) {
            return Ok(Capture::Unchanged);
        }

        self.pending = Some(edit.into());
        Ok(Capture::Pending)
    }

    /// Discard the pending change. No request is made.
    pub fn cancel(&mut self) -> Option<PendingChange> {
        self.pending.take()
    }

    pub fn confirm(&mut self) -> AppResult<UpdateTicket> {
        let change = self.pending.take().ok_or(AppError::NoPendingChange)?;

        self.next_ticket += 1;
        let id = self.next_ticket;
        self.in_flight.insert(id, change.clone());

        Ok(UpdateTicket { id, change })
    }

    /// Release the row held by `ticket`.
    pub fn settle(&mut self, ticket: UpdateTicket) -> AppResult<PendingChange> {
        match self.in_flight.remove(&ticket.id) {
            Some(_) => Ok(ticket.change),
            None => Err(AppError::UnknownTicket(ticket.id)),
        }
    }
}
