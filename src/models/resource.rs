//! Backend resources the console knows how to show and edit.
//!
//! Each resource declares its endpoint, where the entity sits in list and
//! item responses, which verb updates it, its columns, and how an edited
//! display field maps onto the request payload.

use crate::api::envelope::Envelope;
use crate::models::column::ColumnDescriptor;
use crate::models::value::FieldKind;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Categories,
    Projects,
    Quotations,
    ScopeOfWork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    Put,
    Patch,
}

/// How an edited field is sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMapping {
    /// `{ field: new_value }`
    Direct,
    /// Resolve the typed display value to an id in another resource,
    /// then send it under a different key.
    Lookup {
        send_as: &'static str,
        resource: Resource,
        match_field: &'static str,
    },
}

impl Resource {
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::Projects => "projects",
            Resource::Quotations => "quotations",
            Resource::ScopeOfWork => "scope-of-work",
        }
    }

    /// Path under the API base url.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::Projects => "projects",
            Resource::Quotations => "quotations",
            Resource::ScopeOfWork => "scope-of-works",
        }
    }

    pub fn list_envelope(&self) -> Envelope {
        Envelope::Key("data")
    }

    pub fn item_envelope(&self) -> Envelope {
        match self {
            Resource::Categories => Envelope::Root,
            Resource::Projects | Resource::ScopeOfWork => Envelope::Key("data"),
            Resource::Quotations => Envelope::Key("quotation"),
        }
    }

    pub fn update_method(&self) -> UpdateMethod {
        match self {
            Resource::Quotations => UpdateMethod::Patch,
            _ => UpdateMethod::Put,
        }
    }

    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        use FieldKind::*;

        match self {
            Resource::Categories => vec![
                ColumnDescriptor::new("id", "ID", Number),
                ColumnDescriptor::new("name", "Name", Text).editable(),
                ColumnDescriptor::new("description", "Description", Text).editable(),
                ColumnDescriptor::new("created_at", "Created", Date),
            ],
            Resource::Projects => vec![
                ColumnDescriptor::new("id", "ID", Number),
                ColumnDescriptor::new("project_code", "Code", Text),
                ColumnDescriptor::new("name", "Project", Text).editable(),
                ColumnDescriptor::new("client", "Client", Reference),
                ColumnDescriptor::new("category_name", "Category", Text).editable(),
                ColumnDescriptor::new("start_date", "Start", Date).editable(),
                ColumnDescriptor::new("budget", "Budget", Currency).editable(),
                ColumnDescriptor::new("status", "Status", Status),
            ],
            Resource::Quotations => vec![
                ColumnDescriptor::new("id", "ID", Number),
                ColumnDescriptor::new("quotation_no", "Quotation", Text),
                ColumnDescriptor::new("project", "Project", Reference),
                ColumnDescriptor::new("amount", "Amount", Currency).editable(),
                ColumnDescriptor::new("valid_until", "Valid until", Date).editable(),
                ColumnDescriptor::new("status", "Status", Status),
            ],
            Resource::ScopeOfWork => vec![
                ColumnDescriptor::new("id", "ID", Number),
                ColumnDescriptor::new("description", "Description", Text).editable(),
                ColumnDescriptor::new("quantity", "Qty", Number).editable(),
                ColumnDescriptor::new("unit", "Unit", Text).editable(),
                ColumnDescriptor::new("unit_price", "Unit price", Currency).editable(),
            ],
        }
    }

    pub fn mapping(&self, field: &str) -> FieldMapping {
        match (self, field) {
            (Resource::Projects, "category_name") => FieldMapping::Lookup {
                send_as: "category_id",
                resource: Resource::Categories,
                match_field: "name",
            },
            _ => FieldMapping::Direct,
        }
    }
}
