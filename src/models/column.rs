use crate::models::value::FieldKind;

/// One grid column: which field it shows, how, and whether it takes edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub field: String,
    pub title: String,
    pub kind: FieldKind,
    pub editable: bool,
}

impl ColumnDescriptor {
    pub fn new(field: &str, title: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            title: title.to_string(),
            kind,
            editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}
