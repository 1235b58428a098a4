pub mod client;
pub mod envelope;
pub mod error;

pub use client::{Backend, HttpBackend, UpdateRequest, fetch_rows};
pub use envelope::Envelope;
pub use error::RemoteError;
