pub mod adapter;
pub mod search;

pub use adapter::GridAdapter;
pub use search::{ColumnVisibility, Page, filter_by_search, paginate};
