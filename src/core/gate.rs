//! Turns a confirmed change into exactly one update request and reads back
//! the authoritative row.

use crate::api::client::{Backend, UpdateRequest, fetch_rows};
use crate::api::error::RemoteError;
use crate::models::change::{PendingChange, RemoteUpdateResult};
use crate::models::resource::{FieldMapping, Resource};
use crate::models::row::RowId;
use crate::models::value::{FieldKind, Normalized, normalize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct PersistenceGate {
    resource: Resource,
}

impl PersistenceGate {
    pub fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Build the request body for `fields`, resolving lookup mappings
    /// through the backend.
    pub fn payload<B: Backend + ?Sized>(
        &self,
        backend: &B,
        fields: &[(&str, &Value)],
    ) -> Result<Map<String, Value>, RemoteError> {
        let mut payload = Map::new();

        for (field, value) in fields {
            match self.resource.mapping(field) {
                FieldMapping::Direct => {
                    payload.insert(field.to_string(), (*value).clone());
                }
                FieldMapping::Lookup {
                    send_as,
                    resource,
                    match_field,
                } => {
                    let id = resolve_lookup(backend, field, resource, match_field, value)?;
                    payload.insert(send_as.to_string(), id);
                }
            }
        }

        Ok(payload)
    }

    pub fn request_for<B: Backend + ?Sized>(
        &self,
        backend: &B,
        change: &PendingChange,
    ) -> Result<UpdateRequest, RemoteError> {
        let payload = self.payload(backend, &[(change.field.as_str(), &change.new_value)])?;

        Ok(UpdateRequest {
            resource: self.resource,
            row_id: change.row_id.clone(),
            method: self.resource.update_method(),
            payload,
        })
    }

    /// Send one request and unwrap the entity it returns.
    pub fn send<B: Backend + ?Sized>(&self, backend: &B, request: &UpdateRequest) -> RemoteUpdateResult {
        let body = backend.update(request)?;
        let row = self.resource.item_envelope().unwrap_entity(body)?;

        if row.id() != &request.row_id {
            return Err(RemoteError::Envelope(format!(
                "response is for row {}, expected {}",
                row.id(),
                request.row_id
            )));
        }

        Ok(row)
    }

    /// Build and send the request for a confirmed change.
    pub fn persist<B: Backend + ?Sized>(&self, backend: &B, change: &PendingChange) -> RemoteUpdateResult {
        let request = self.request_for(backend, change)?;
        self.send(backend, &request)
    }

    pub fn persist_fields<B: Backend + ?Sized>(
        &self,
        backend: &B,
        row_id: &RowId,
        fields: &[(&str, &Value)],
    ) -> RemoteUpdateResult {
        let request = UpdateRequest {
            resource: self.resource,
            row_id: row_id.clone(),
            method: self.resource.update_method(),
            payload: self.payload(backend, fields)?,
        };
        self.send(backend, &request)
    }
}

/// Find the id of the `resource` row whose `match_field` reads `value`.
fn resolve_lookup<B: Backend + ?Sized>(
    backend: &B,
    field: &str,
    resource: Resource,
    match_field: &str,
    value: &Value,
) -> Result<Value, RemoteError> {
    let needle = match normalize(FieldKind::Text, value) {
        Normalized::Empty => return Ok(Value::Null),
        Normalized::Text(s) => s,
        other => format!("{other:?}"),
    };

    let rows = fetch_rows(backend, resource)?;
    let found = rows.iter().find(|row| {
        matches!(
            normalize(FieldKind::Text, row.get(match_field)),
            Normalized::Text(ref s) if s.trim().eq_ignore_ascii_case(needle.trim())
        )
    });

    match found {
        Some(row) => Ok(row.get("id").clone()),
        None => {
            let mut errors = BTreeMap::new();
            errors.insert(
                field.to_string(),
                vec![format!("No {} entry named '{}'", resource.name(), needle)],
            );
            Err(RemoteError::ValidationRejected {
                message: None,
                errors,
            })
        }
    }
}
