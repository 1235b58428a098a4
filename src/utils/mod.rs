pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::Formatter;
pub use table::Table;
