pub mod config;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod submit;

use crate::api::client::HttpBackend;
use crate::config::Config;
use crate::core::session::GridSession;
use crate::db::{AuditLog, DbPool};
use crate::errors::AppResult;
use crate::models::resource::Resource;
use crate::utils::formatting::Formatter;

/// Backend + freshly loaded session for `resource`.
pub(crate) fn open_session(cfg: &Config, resource: Resource) -> AppResult<(HttpBackend, GridSession)> {
    let backend = HttpBackend::from_config(cfg)?;
    let session = GridSession::load(resource, Formatter::from_config(cfg), &backend)?;
    Ok((backend, session))
}

pub(crate) fn open_audit(cfg: &Config) -> AppResult<AuditLog> {
    Ok(AuditLog::new(DbPool::new(&cfg.database_path())?))
}
