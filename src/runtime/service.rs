//! The dialog service: one per document.
//!
//! Owns the registry and the listener table shared by every dialog instance of a document, and
//! routes document-level events to them. Cloning the service clones a handle; all clones see the
//! same state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::ModalConfig;
use crate::core::document::{Document, NodeId};
use crate::core::input_event::{ClickEvent, Key, KeyEvent};
use crate::error::DialogError;
use crate::logging::{self, Diagnostic, RUNTIME_TARGET};
use crate::runtime::dialog::{DialogContext, DialogId};
use crate::runtime::dismiss;
use crate::runtime::listeners::{DialogListeners, ListenerGuard, ListenerTable};
use crate::runtime::registry::{DialogEntry, DialogStack, DismissCallback, MountId};
use crate::runtime::trap;

type DiagnosticsHook = Box<dyn FnMut(&Diagnostic)>;

/// Result of routing one document event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host must suppress its default action (native focus advancement for Tab).
    pub prevent_default: bool,
    /// Dialogs whose dismiss callback was invoked, in invocation order.
    pub dismissed: Vec<DialogId>,
}

impl DispatchOutcome {
    pub fn is_handled(&self) -> bool {
        self.prevent_default || !self.dismissed.is_empty()
    }
}

struct ServiceInner {
    document: Rc<dyn Document>,
    config: ModalConfig,
    stack: RefCell<DialogStack>,
    listeners: Rc<RefCell<ListenerTable>>,
    diagnostics_hook: RefCell<Option<DiagnosticsHook>>,
    next_dialog: Cell<u64>,
    next_mount: Cell<u64>,
}

#[derive(Clone)]
pub struct DialogService {
    inner: Rc<ServiceInner>,
}

impl fmt::Debug for DialogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogService")
            .field("config", &self.inner.config)
            .field("stack", &self.inner.stack.borrow().roots())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl DialogService {
    pub fn new(document: Rc<dyn Document>) -> Self {
        Self::with_config(document, ModalConfig::default())
    }

    pub fn with_config(document: Rc<dyn Document>, config: ModalConfig) -> Self {
        Self {
            inner: Rc::new(ServiceInner {
                document,
                config,
                stack: RefCell::new(DialogStack::new()),
                listeners: Rc::new(RefCell::new(ListenerTable::default())),
                diagnostics_hook: RefCell::new(None),
                next_dialog: Cell::new(1),
                next_mount: Cell::new(1),
            }),
        }
    }

    pub fn document(&self) -> &dyn Document {
        self.inner.document.as_ref()
    }

    pub fn config(&self) -> &ModalConfig {
        &self.inner.config
    }

    /// Whether two handles share one service.
    pub fn same_service(&self, other: &DialogService) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Records `root` as the topmost dialog. See [`DialogStack::register`].
    pub fn register(
        &self,
        root: NodeId,
        dismiss: &DismissCallback,
        mount: MountId,
    ) -> Option<DialogEntry> {
        let entry = self
            .inner
            .stack
            .borrow_mut()
            .register(self.document(), root, dismiss, mount)
            .cloned();
        if self.inner.config.trace_routing {
            tracing::debug!(
                target: RUNTIME_TARGET,
                root = root.raw(),
                mount = mount.raw(),
                prior = ?entry.as_ref().and_then(DialogEntry::prior_active),
                registered = entry.is_some(),
                "dialog registered"
            );
        }
        entry
    }

    /// Marks the entry for `root` closed so it no longer counts as topmost. See
    /// [`DialogStack::deactivate`].
    pub fn deactivate(&self, root: NodeId, mount: MountId) -> bool {
        let closed = self.inner.stack.borrow_mut().deactivate(root, mount);
        if self.inner.config.trace_routing {
            tracing::debug!(
                target: RUNTIME_TARGET,
                root = root.raw(),
                mount = mount.raw(),
                closed,
                "dialog deactivated"
            );
        }
        closed
    }

    pub fn topmost(&self) -> Option<DialogEntry> {
        self.inner
            .stack
            .borrow()
            .topmost(self.document())
            .cloned()
    }

    /// Registered roots in order, including detached ones not yet pruned.
    pub fn stack_roots(&self) -> Vec<NodeId> {
        self.inner.stack.borrow().roots()
    }

    /// Registered roots that are still attached and not closed, bottom to top.
    pub fn open_roots(&self) -> Vec<NodeId> {
        let document = self.document();
        let stack = self.inner.stack.borrow();
        stack
            .roots()
            .into_iter()
            .filter(|root| {
                document.is_connected(*root)
                    && stack.entry(*root).is_some_and(|entry| !entry.is_closed())
            })
            .collect()
    }

    /// Number of dialogs currently listening for document events.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Resolves the dialog that `node` is rendered in.
    ///
    /// Dialog parts (close buttons, bodies) call this to reach their dialog. A node outside every
    /// registered dialog is a structural mistake and is reported as an error.
    pub fn context_of(&self, node: NodeId) -> Result<DialogContext, DialogError> {
        self.inner
            .stack
            .borrow()
            .containing(self.document(), node)
            .map(|entry| DialogContext::new(entry.root(), entry.dismiss().clone()))
            .ok_or(DialogError::OutsideDialogContext { node })
    }

    /// Routes a document-level keydown: Escape to the topmost dialog, Tab to its focus trap.
    pub fn dispatch_keydown(&self, event: &KeyEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let listeners = self.inner.listeners.borrow().snapshot();
        if listeners.is_empty() {
            return outcome;
        }

        let topmost = self.topmost();
        match &event.key {
            Key::Escape => {
                let routed = dismiss::route_escape(&listeners, topmost.as_ref());
                self.invoke(routed, &mut outcome);
            }
            Key::Tab => {
                let backward = event.modifiers.shift;
                for listener in &listeners {
                    if !dismiss::is_topmost(topmost.as_ref(), &listener.dismiss) {
                        continue;
                    }
                    let action = trap::handle_tab(self.document(), listener.root, backward);
                    if self.inner.config.trace_routing {
                        tracing::debug!(
                            target: RUNTIME_TARGET,
                            dialog = listener.dialog.raw(),
                            key = %event,
                            ?action,
                            "focus trap"
                        );
                    }
                    outcome.prevent_default |= action.prevents_default();
                }
            }
            Key::Other(_) => {}
        }
        outcome
    }

    /// Routes a click observed in the capture phase, before inner handlers can stop it.
    pub fn dispatch_click(&self, event: &ClickEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let listeners = self.inner.listeners.borrow().snapshot();
        if listeners.is_empty() {
            return outcome;
        }

        let topmost = self.topmost();
        let routed = dismiss::route_click(
            self.document(),
            &listeners,
            topmost.as_ref(),
            event.target,
        );
        self.invoke(routed, &mut outcome);
        outcome
    }

    pub fn set_diagnostics_hook(&self, hook: impl FnMut(&Diagnostic) + 'static) {
        *self.inner.diagnostics_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn clear_diagnostics_hook(&self) {
        self.inner.diagnostics_hook.borrow_mut().take();
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        if self.inner.config.silence_diagnostics {
            return;
        }
        logging::emit(&diagnostic);

        let hook = self.inner.diagnostics_hook.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook(&diagnostic);
            let mut slot = self.inner.diagnostics_hook.borrow_mut();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }

    pub(crate) fn start_listeners(&self, listeners: DialogListeners) -> ListenerGuard {
        ListenerGuard::start(&self.inner.listeners, listeners)
    }

    pub(crate) fn next_dialog_id(&self) -> DialogId {
        let raw = self.inner.next_dialog.get();
        self.inner.next_dialog.set(raw + 1);
        DialogId::from_raw(raw)
    }

    pub(crate) fn next_mount_id(&self) -> MountId {
        let raw = self.inner.next_mount.get();
        self.inner.next_mount.set(raw + 1);
        MountId::from_raw(raw)
    }

    // Callbacks run after every internal borrow is released: a dismiss handler typically closes
    // its dialog, which stops listeners and restores focus through this same service.
    fn invoke(&self, routed: Vec<&DialogListeners>, outcome: &mut DispatchOutcome) {
        let callbacks: Vec<(DialogId, DismissCallback)> = routed
            .into_iter()
            .map(|listener| (listener.dialog, listener.dismiss.clone()))
            .collect();
        for (dialog, callback) in callbacks {
            if self.inner.config.trace_routing {
                tracing::debug!(target: RUNTIME_TARGET, dialog = dialog.raw(), "dismissing dialog");
            }
            outcome.dismissed.push(dialog);
            callback.invoke();
        }
    }
}
