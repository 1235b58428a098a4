pub mod change;
pub mod column;
pub mod resource;
pub mod row;
pub mod value;

pub use change::{CellEdit, PendingChange, RemoteUpdateResult, UpdateTicket};
pub use column::ColumnDescriptor;
pub use resource::{FieldMapping, Resource, UpdateMethod};
pub use row::{EditableRow, RowId};
pub use value::FieldKind;
