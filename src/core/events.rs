//! Scoped publish/subscribe for grid events.
//!
//! Components that need to react to an edit elsewhere (refresh a parent
//! listing, write the audit log) subscribe here. A subscription lives as long
//! as the `Subscription` guard it returns; a later subscriber never replaces
//! an earlier one.

use crate::models::change::PendingChange;
use crate::models::resource::Resource;
use crate::models::row::{EditableRow, RowId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
pub enum GridEvent {
    EditCaptured {
        resource: Resource,
        change: PendingChange,
    },
    EditCancelled {
        resource: Resource,
        change: PendingChange,
    },
    EditCommitted {
        resource: Resource,
        change: PendingChange,
        row: EditableRow,
    },
    EditFailed {
        resource: Resource,
        change: PendingChange,
        message: String,
    },
    FormSubmitted {
        resource: Resource,
        row_id: RowId,
        fields: Vec<String>,
    },
    FormFailed {
        resource: Resource,
        row_id: RowId,
        message: String,
    },
    Refreshed {
        resource: Resource,
        rows: usize,
    },
}

type Handler = Rc<RefCell<dyn FnMut(&GridEvent)>>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Cheap to clone; clones share subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

/// Drop to unsubscribe.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: FnMut(&GridEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        let handler: Handler = Rc::new(RefCell::new(handler));
        inner.handlers.push((id, handler));

        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: &GridEvent) {
        // snapshot: handlers may subscribe or drop subscriptions while running
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();

        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(event),
                Err(_) => log::warn!("skipping re-entrant event handler for {event:?}"),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}
