//! Dialog registry: the ordered record of mounted dialogs.
//!
//! Invariants:
//! - The last entry whose root is still attached and that has not been closed is the topmost
//!   dialog.
//! - Entries are never removed explicitly. Detached roots are pruned on the next registration
//!   and skipped by lookups until then.

use std::fmt;
use std::rc::Rc;

use crate::core::document::{Document, NodeId};

/// Caller-supplied request to close a dialog.
///
/// Compared by identity: two handles are the same callback only when they were cloned from one
/// another.
#[derive(Clone)]
pub struct DismissCallback(Rc<dyn Fn()>);

impl DismissCallback {
    pub fn new(callback: impl Fn() + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn invoke(&self) {
        (self.0)();
    }

    pub fn same_as(&self, other: &DismissCallback) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for DismissCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DismissCallback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Identifies one mount of a dialog root. A root that is detached and attached again gets a new
/// mount id.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MountId(u64);

impl MountId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Clone, Debug)]
pub struct DialogEntry {
    root: NodeId,
    dismiss: DismissCallback,
    prior_active: Option<NodeId>,
    mount: MountId,
    closed: bool,
}

impl DialogEntry {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn dismiss(&self) -> &DismissCallback {
        &self.dismiss
    }

    /// Element that held focus when this mount first registered.
    pub fn prior_active(&self) -> Option<NodeId> {
        self.prior_active
    }

    pub fn mount(&self) -> MountId {
        self.mount
    }

    /// Set once the mount stops being open while its root stays attached.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[derive(Debug, Default)]
pub struct DialogStack {
    entries: Vec<DialogEntry>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `root` as the topmost dialog, then prunes detached entries.
    ///
    /// A fresh mount captures the document's active element as the prior focus. Registering the
    /// same mount again (a re-render) only refreshes the callback and the ordering. Returns
    /// `None` when `root` itself is detached, in which case nothing is recorded.
    pub fn register(
        &mut self,
        document: &dyn Document,
        root: NodeId,
        dismiss: &DismissCallback,
        mount: MountId,
    ) -> Option<&DialogEntry> {
        let previous = self
            .entries
            .iter()
            .position(|entry| entry.root == root)
            .map(|index| self.entries.remove(index));

        let prior_active = match previous {
            Some(entry) if entry.mount == mount => entry.prior_active,
            _ => document
                .active_element()
                .filter(|active| *active != document.body()),
        };

        self.entries.push(DialogEntry {
            root,
            dismiss: dismiss.clone(),
            prior_active,
            mount,
            closed: false,
        });
        self.prune(document);
        self.entry(root)
    }

    /// Drops every entry whose root is no longer attached. Returns how many were removed.
    pub fn prune(&mut self, document: &dyn Document) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| document.is_connected(entry.root));
        before - self.entries.len()
    }

    /// Marks the entry for `root` as closed if it still belongs to `mount`. The entry stays in
    /// the stack until its root is detached or registered again.
    pub fn deactivate(&mut self, root: NodeId, mount: MountId) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.root == root && entry.mount == mount)
        {
            Some(entry) => {
                entry.closed = true;
                true
            }
            None => false,
        }
    }

    /// Last attached, open entry in registration order.
    pub fn topmost(&self, document: &dyn Document) -> Option<&DialogEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| !entry.closed && document.is_connected(entry.root))
    }

    pub fn entry(&self, root: NodeId) -> Option<&DialogEntry> {
        self.entries.iter().find(|entry| entry.root == root)
    }

    /// Nearest attached, registered root that contains `node` (inclusive).
    pub fn containing(&self, document: &dyn Document, node: NodeId) -> Option<&DialogEntry> {
        if !document.is_connected(node) {
            return None;
        }
        let mut current = Some(node);
        while let Some(candidate) = current {
            if let Some(entry) = self.entry(candidate) {
                return Some(entry);
            }
            current = document.parent(candidate);
        }
        None
    }

    /// Roots in registration order, including entries not yet pruned.
    pub fn roots(&self) -> Vec<NodeId> {
        self.entries.iter().map(|entry| entry.root).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
