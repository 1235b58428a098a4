pub mod audit;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod models;
pub mod pool;

pub use audit::AuditLog;
pub use pool::DbPool;
