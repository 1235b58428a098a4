mod common;
use common::{MockBackend, open};
use opsgrid::api::error::{GENERIC_FAILURE, RemoteError};
use opsgrid::core::bulk::{FORM_SUBMITTED, FormOutcome, FormSubmission};
use opsgrid::core::events::GridEvent;
use opsgrid::core::interceptor::{Capture, EditState};
use opsgrid::core::session::{CELL_UPDATED, EditOutcome};
use opsgrid::errors::AppError;
use opsgrid::models::resource::{Resource, UpdateMethod};
use opsgrid::models::row::{EditableRow, RowId};
use opsgrid::ui::messages::Level;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

fn project_101(name: &str) -> Value {
    json!({
        "id": 101,
        "project_code": "PRJ-0101",
        "name": name,
        "client": { "id": 3, "name": "Acme Logistics" },
        "category_name": "Electrical",
        "category_id": 7,
        "start_date": "2024-01-05",
        "budget": 1500,
        "status": "in_progress",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

fn validation(field: &str, msg: &str) -> RemoteError {
    let mut errors = BTreeMap::new();
    errors.insert(field.to_string(), vec![msg.to_string()]);
    RemoteError::ValidationRejected {
        message: Some("The given data was invalid.".into()),
        errors,
    }
}

#[test]
fn test_commit_replaces_row_with_backend_copy() {
    let backend = MockBackend::new();
    backend.reply(Ok(json!({ "data": project_101("Warehouse retrofit II") })));
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "name", "Warehouse retrofit II").expect("begin edit");
    let outcome = session.commit(&backend).expect("commit");

    assert!(matches!(outcome, EditOutcome::Committed { .. }));

    let requests = backend.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, UpdateMethod::Put);
    assert_eq!(requests[0].row_id, id);
    assert_eq!(Value::Object(requests[0].payload.clone()), json!({ "name": "Warehouse retrofit II" }));

    // whole row replaced, including fields the edit did not touch
    let row = session.row(&id).expect("row");
    assert_eq!(row.get("updated_at"), &json!("2024-05-01T10:00:00Z"));
    assert_eq!(session.display_cell(&id, "name").expect("cell"), "Warehouse retrofit II");

    let notes = session.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Success);
    assert_eq!(notes[0].message, CELL_UPDATED);
    assert!(!session.is_row_locked(&id));
}

#[test]
fn test_backend_normalized_value_wins() {
    let backend = MockBackend::new();
    // backend trims and title-cases the name
    backend.reply(Ok(json!({ "data": project_101("Warehouse Retrofit") })));
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "name", "  warehouse retrofit  ").expect("begin edit");
    session.commit(&backend).expect("commit");

    assert_eq!(session.row(&id).expect("row").get("name"), &json!("Warehouse Retrofit"));
}

#[test]
fn test_validation_failure_keeps_old_value() {
    let backend = MockBackend::new();
    backend.reply(Err(validation("name", "The name has already been taken.")));
    let mut session = open(Resource::Categories, &backend);
    let id = RowId::from(7);
    let before = session.row(&id).expect("row").clone();

    session.begin_edit(&id, "name", "Plumbing").expect("begin edit");
    let outcome = session.commit(&backend).expect("commit");

    match outcome {
        EditOutcome::Failed { error, change } => {
            assert!(matches!(error, RemoteError::ValidationRejected { .. }));
            assert_eq!(change.new_value, json!("Plumbing"));
        }
        EditOutcome::Committed { .. } => panic!("expected a failure"),
    }

    assert_eq!(session.row(&id).expect("row"), &before);
    let notes = session.take_notifications();
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].message, "name: The name has already been taken.");
    assert_eq!(session.state(), EditState::Idle);
    assert!(!session.is_row_locked(&id));
}

#[test]
fn test_failure_messages() {
    let cases = [
        (
            RemoteError::Server {
                status: 500,
                message: Some("Database unavailable".into()),
            },
            "Database unavailable",
        ),
        (
            RemoteError::Server {
                status: 502,
                message: None,
            },
            GENERIC_FAILURE,
        ),
        (RemoteError::Network("connection refused".into()), GENERIC_FAILURE),
        (RemoteError::AuthExpired, "Session expired, please log in again."),
    ];

    for (error, expected) in cases {
        let backend = MockBackend::new();
        backend.reply(Err(error));
        let mut session = open(Resource::Categories, &backend);

        session
            .begin_edit(&RowId::from(8), "description", "Pipes")
            .expect("begin edit");
        session.commit(&backend).expect("commit");

        let notes = session.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].message, expected);
        assert_eq!(session.row(&RowId::from(8)).expect("row").get("description"), &Value::Null);
    }
}

#[test]
fn test_quotation_uses_patch_and_its_own_envelope() {
    let backend = MockBackend::new();
    backend.reply(Ok(json!({
        "message": "Quotation updated",
        "quotation": {
            "id": "Q-17",
            "quotation_no": "QT/2024/017",
            "project": { "id": 101, "name": "Warehouse retrofit" },
            "amount": 99500,
            "valid_until": "2024-06-30",
            "status": "pending_approval"
        }
    })));
    let mut session = open(Resource::Quotations, &backend);
    let id = RowId::from("Q-17");

    session.begin_edit(&id, "amount", "99,500").expect("begin edit");
    let outcome = session.commit(&backend).expect("commit");

    assert!(matches!(outcome, EditOutcome::Committed { .. }));
    assert_eq!(backend.requests.borrow()[0].method, UpdateMethod::Patch);
    assert_eq!(
        Value::Object(backend.requests.borrow()[0].payload.clone()),
        json!({ "amount": 99500 })
    );
    assert_eq!(session.display_cell(&id, "amount").expect("cell"), "$99,500.00");
}

#[test]
fn test_category_entity_at_root() {
    let backend = MockBackend::new();
    backend.reply(Ok(json!({ "id": 8, "name": "Plumbing", "description": "Pipes" })));
    let mut session = open(Resource::Categories, &backend);

    session
        .begin_edit(&RowId::from(8), "description", "Pipes")
        .expect("begin edit");
    session.commit(&backend).expect("commit");

    assert_eq!(
        session.display_cell(&RowId::from(8), "description").expect("cell"),
        "Pipes"
    );
}

#[test]
fn test_wrong_envelope_or_row_is_a_failure() {
    let bodies = [
        // project entity not under `data`
        project_101("Other"),
        // entity for another row
        json!({ "data": { "id": 102, "name": "Other" } }),
    ];

    for body in bodies {
        let backend = MockBackend::new();
        backend.reply(Ok(body));
        let mut session = open(Resource::Projects, &backend);
        let id = RowId::from(101);

        session.begin_edit(&id, "name", "Other").expect("begin edit");
        let outcome = session.commit(&backend).expect("commit");

        assert!(matches!(
            outcome,
            EditOutcome::Failed {
                error: RemoteError::Envelope(_),
                ..
            }
        ));
        assert_eq!(
            session.display_cell(&id, "name").expect("cell"),
            "Warehouse retrofit"
        );
        assert_eq!(session.take_notifications()[0].message, GENERIC_FAILURE);
    }
}

#[test]
fn test_category_name_is_sent_as_category_id() {
    let backend = MockBackend::new();
    let mut updated = project_101("Warehouse retrofit");
    updated["category_name"] = json!("Plumbing");
    updated["category_id"] = json!(8);
    backend.reply(Ok(json!({ "data": updated })));

    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "category_name", "plumbing").expect("begin edit");
    session.commit(&backend).expect("commit");

    assert_eq!(
        Value::Object(backend.requests.borrow()[0].payload.clone()),
        json!({ "category_id": 8 })
    );
    assert_eq!(session.display_cell(&id, "category_name").expect("cell"), "Plumbing");
}

#[test]
fn test_unknown_category_fails_without_update_request() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "category_name", "Roofing").expect("begin edit");
    let outcome = session.commit(&backend).expect("commit");

    assert!(matches!(
        outcome,
        EditOutcome::Failed {
            error: RemoteError::ValidationRejected { .. },
            ..
        }
    ));
    assert_eq!(backend.request_count(), 0);
    assert_eq!(
        session.take_notifications()[0].message,
        "category_name: No categories entry named 'Roofing'"
    );
}

#[test]
fn test_refetch_between_confirm_and_settle() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "name", "Renamed").expect("begin edit");
    let ticket = session.confirm().expect("ticket");
    assert!(session.is_row_locked(&id));
    assert_eq!(session.in_flight(), 1);

    // the dataset comes back reordered while the request is out
    backend.set_list(
        Resource::Projects,
        json!({ "data": [
            { "id": 102, "name": "Office fit-out" },
            { "id": 101, "name": "Warehouse retrofit", "budget": 1750 }
        ]}),
    );
    session.refresh(&backend).expect("refresh");

    let row = EditableRow::from_json(json!({ "id": 101, "name": "Renamed", "budget": 1750 }))
        .expect("row");
    session.settle(ticket, Ok(row)).expect("settle");

    assert_eq!(session.rows().len(), 2);
    assert_eq!(session.rows()[0].id(), &RowId::from(102));
    assert_eq!(session.rows()[1].get("name"), &json!("Renamed"));
    assert!(!session.is_row_locked(&id));
}

#[test]
fn test_settle_for_vanished_row_changes_nothing() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    session.begin_edit(&id, "name", "Renamed").expect("begin edit");
    let ticket = session.confirm().expect("ticket");

    session.replace_rows(Vec::new());
    let row = EditableRow::from_json(json!({ "id": 101, "name": "Renamed" })).expect("row");
    let outcome = session.settle(ticket, Ok(row)).expect("settle");

    assert!(matches!(outcome, EditOutcome::Committed { .. }));
    assert!(session.rows().is_empty());
}

#[test]
fn test_events_reach_subscribers_until_dropped() {
    let backend = MockBackend::new();
    backend.reply(Ok(json!({ "id": 7, "name": "Electric", "description": "Wiring and panels" })));
    let mut session = open(Resource::Categories, &backend);
    let id = RowId::from(7);

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = session.bus().subscribe(move |ev| {
        let tag = match ev {
            GridEvent::EditCaptured { .. } => "captured",
            GridEvent::EditCancelled { .. } => "cancelled",
            GridEvent::EditCommitted { .. } => "committed",
            GridEvent::EditFailed { .. } => "failed",
            GridEvent::FormSubmitted { .. } => "submitted",
            GridEvent::FormFailed { .. } => "form_failed",
            GridEvent::Refreshed { .. } => "refreshed",
        };
        sink.borrow_mut().push(tag.to_string());
    });

    session.begin_edit(&id, "name", "Elec").expect("begin edit");
    session.cancel();
    session.begin_edit(&id, "name", "Electric").expect("begin edit");
    session.commit(&backend).expect("commit");

    assert_eq!(*seen.borrow(), vec!["captured", "cancelled", "captured", "committed"]);
    assert_eq!(session.bus().subscriber_count(), 1);

    drop(sub);
    assert_eq!(session.bus().subscriber_count(), 0);
    session.refresh(&backend).expect("refresh");
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn test_later_subscriber_does_not_replace_earlier_one() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Categories, &backend);

    let count = Rc::new(RefCell::new((0, 0)));
    let (a, b) = (Rc::clone(&count), Rc::clone(&count));
    let _first = session.bus().subscribe(move |_| a.borrow_mut().0 += 1);
    let _second = session.bus().subscribe(move |_| b.borrow_mut().1 += 1);

    session.refresh(&backend).expect("refresh");
    assert_eq!(*count.borrow(), (1, 1));
}

#[test]
fn test_edit_budget_scenario() {
    // 1500 shown as $1,500.00; typed 1,500.00 is no change, 2000 is
    let backend = MockBackend::new();
    let mut updated = project_101("Warehouse retrofit");
    updated["budget"] = json!("2000.00");
    backend.reply(Ok(json!({ "data": updated })));

    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    assert_eq!(session.display_cell(&id, "budget").expect("cell"), "$1,500.00");
    assert_eq!(
        session.begin_edit(&id, "budget", "1,500.00").expect("begin edit"),
        Capture::Unchanged
    );
    assert_eq!(
        session.begin_edit(&id, "budget", "2000").expect("begin edit"),
        Capture::Pending
    );

    let dialog = session.dialog().expect("dialog");
    assert_eq!(dialog.title, "Budget");
    assert_eq!(dialog.old_display, "$1,500.00");
    assert_eq!(dialog.new_display, "$2,000.00");
    assert_eq!(dialog.prompt(), "Update Budget of row #101?");

    session.commit(&backend).expect("commit");
    assert_eq!(
        Value::Object(backend.requests.borrow()[0].payload.clone()),
        json!({ "budget": 2000 })
    );
    assert_eq!(session.display_cell(&id, "budget").expect("cell"), "$2,000.00");
}

#[test]
fn test_concurrent_edits_on_two_rows() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Projects, &backend);

    session.begin_edit(&RowId::from(101), "name", "A").expect("begin edit");
    let first = session.confirm().expect("ticket");
    session.begin_edit(&RowId::from(102), "name", "B").expect("begin edit");
    let second = session.confirm().expect("ticket");
    assert_eq!(session.in_flight(), 2);

    // settle out of order
    let row_b = EditableRow::from_json(json!({ "id": 102, "name": "B" })).expect("row");
    session.settle(second, Ok(row_b)).expect("settle");
    session
        .settle(first, Err(RemoteError::Network("timeout".into())))
        .expect("settle");

    assert_eq!(session.display_cell(&RowId::from(102), "name").expect("cell"), "B");
    assert_eq!(
        session.display_cell(&RowId::from(101), "name").expect("cell"),
        "Warehouse retrofit"
    );
    assert_eq!(session.in_flight(), 0);
}

#[test]
fn test_form_submission_sends_one_request() {
    let backend = MockBackend::new();
    let mut updated = project_101("Warehouse retrofit");
    updated["budget"] = json!(1800);
    updated["start_date"] = json!("2024-02-01");
    backend.reply(Ok(json!({ "data": updated })));

    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    let form = FormSubmission::new(
        id.clone(),
        vec![
            ("budget".into(), "1800".into()),
            ("start_date".into(), "01-02-2024".into()),
        ],
    );
    let outcome = form.submit(&mut session, &backend).expect("submit");

    assert!(matches!(outcome, FormOutcome::Submitted(_)));
    assert_eq!(backend.request_count(), 1);
    assert_eq!(
        Value::Object(backend.requests.borrow()[0].payload.clone()),
        json!({ "budget": 1800, "start_date": "2024-02-01" })
    );
    assert_eq!(session.display_cell(&id, "start_date").expect("cell"), "01-02-2024");
    assert_eq!(session.take_notifications()[0].message, FORM_SUBMITTED);
}

#[test]
fn test_form_submission_rejects_bad_fields_locally() {
    let backend = MockBackend::new();
    let mut session = open(Resource::Projects, &backend);
    let id = RowId::from(101);

    let form = FormSubmission::new(
        id.clone(),
        vec![("name".into(), "X".into()), ("status".into(), "done".into())],
    );
    assert!(matches!(
        form.submit(&mut session, &backend),
        Err(AppError::NotEditable(_))
    ));

    session.begin_edit(&id, "name", "Y").expect("begin edit");
    let form = FormSubmission::new(id, vec![("budget".into(), "10".into())]);
    assert!(matches!(
        form.submit(&mut session, &backend),
        Err(AppError::RowBusy(_))
    ));
    assert_eq!(backend.request_count(), 0);
}
