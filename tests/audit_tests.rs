mod common;
use common::{MockBackend, open};
use opsgrid::api::error::RemoteError;
use opsgrid::db::log::load_log;
use opsgrid::db::{AuditLog, DbPool};
use opsgrid::models::resource::Resource;
use opsgrid::models::row::RowId;
use serde_json::json;
use std::rc::Rc;

#[test]
fn test_edit_outcomes_are_logged() {
    let backend = MockBackend::new();
    backend.reply(Ok(json!({ "id": 7, "name": "Electric", "description": "Wiring and panels" })));
    backend.reply(Err(RemoteError::Network("reset".into())));

    let mut session = open(Resource::Categories, &backend);
    let audit = Rc::new(AuditLog::new(DbPool::in_memory().expect("db")));
    let sink = Rc::clone(&audit);
    let _sub = session.bus().subscribe(move |ev| sink.handle(ev));

    let id = RowId::from(7);
    session.begin_edit(&id, "name", "Electric").expect("begin edit");
    session.commit(&backend).expect("commit");

    session.begin_edit(&id, "description", "").expect("begin edit");
    session.cancel();

    session.begin_edit(&id, "description", "Panels").expect("begin edit");
    session.commit(&backend).expect("commit");

    let entries = load_log(&audit.pool().conn, None).expect("log");
    let ops: Vec<&str> = entries.iter().map(|e| e.operation.as_str()).collect();
    assert_eq!(ops, vec!["edit", "cancel", "edit_failed"]);

    assert_eq!(entries[0].resource, "categories");
    assert_eq!(entries[0].target, "#7.name");
    assert_eq!(entries[0].message, "'Electrical' → 'Electric'");
    assert_eq!(entries[1].message, "'Wiring and panels' → null");
    assert!(entries[2].message.ends_with("(Failed to update cell.)"));
}

#[test]
fn test_log_filter_by_resource() {
    let pool = DbPool::in_memory().expect("db");
    opsgrid::db::log::write_log(&pool.conn, "edit", "projects", "#1.name", "a").expect("write");
    opsgrid::db::log::write_log(&pool.conn, "edit", "quotations", "#Q-1.amount", "b")
        .expect("write");

    let only = load_log(&pool.conn, Some("quotations")).expect("log");
    assert_eq!(only.len(), 1);
    assert_eq!(only[0].target, "#Q-1.amount");
    assert_eq!(load_log(&pool.conn, None).expect("log").len(), 2);
}
