//! Document listener registrations for open dialogs.
//!
//! Every open dialog owns one registration covering its Escape, Tab and capture-phase click
//! handling. Starting returns a [`ListenerGuard`]; the registration lives exactly as long as the
//! guard.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::document::NodeId;
use crate::runtime::dialog::DialogId;
use crate::runtime::registry::DismissCallback;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What one open dialog listens for.
#[derive(Clone, Debug)]
pub struct DialogListeners {
    pub dialog: DialogId,
    pub root: NodeId,
    pub dismiss: DismissCallback,
    pub close_on_click_outside: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    entries: Vec<(ListenerId, DialogListeners)>,
}

impl ListenerTable {
    pub(crate) fn insert(&mut self, listeners: DialogListeners) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listeners));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        before != self.entries.len()
    }

    /// Registrations in attach order. Dispatch works on a copy so handlers may start or stop
    /// listeners while an event is being routed.
    pub(crate) fn snapshot(&self) -> Vec<DialogListeners> {
        self.entries
            .iter()
            .map(|(_, listeners)| listeners.clone())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Keeps a dialog's listeners attached. Released by [`ListenerGuard::stop`] or on drop.
#[must_use = "dropping the guard detaches the listeners immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    table: Weak<RefCell<ListenerTable>>,
    released: bool,
}

impl ListenerGuard {
    pub(crate) fn start(table: &Rc<RefCell<ListenerTable>>, listeners: DialogListeners) -> Self {
        let id = table.borrow_mut().insert(listeners);
        Self {
            id,
            table: Rc::downgrade(table),
            released: false,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().remove(self.id);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}
