//! Per-instance dialog controller.
//!
//! The View Shell drives one [`Dialog`] per rendered dialog:
//! - [`Dialog::attach`] once the root element is in the document, [`Dialog::detach`] before it
//!   is removed;
//! - [`Dialog::set_opened`] whenever the caller's open flag changes;
//! - [`Dialog::render`] on every render while open, which makes the dialog topmost again.
//!
//! Opening while attached registers the root, places initial focus and starts the document
//! listeners. Closing, detaching or dropping the controller stops the listeners and restores
//! focus. Calls made before the root is attached are remembered and applied once it is.

use crate::core::document::NodeId;
use crate::logging::{Diagnostic, RUNTIME_TARGET};
use crate::runtime::listeners::{DialogListeners, ListenerGuard};
use crate::runtime::placement::{self, InitialFocus};
use crate::runtime::registry::{DismissCallback, MountId};
use crate::runtime::service::DialogService;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DialogId(u64);

impl DialogId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Where the View Shell should mount the dialog markup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MountContainer {
    #[default]
    Body,
    Selector(String),
    Node(NodeId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogOptions {
    /// `None` uses [`crate::ModalConfig::close_on_click_outside`].
    pub close_on_click_outside: Option<bool>,
    /// Focused on close instead of the element focused before the dialog opened.
    pub final_focus: Option<NodeId>,
    pub container: MountContainer,
    pub aria_label: Option<String>,
    pub aria_labelledby: Option<String>,
    pub aria_describedby: Option<String>,
}

impl DialogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_on_click_outside(mut self, enabled: bool) -> Self {
        self.close_on_click_outside = Some(enabled);
        self
    }

    pub fn final_focus(mut self, node: NodeId) -> Self {
        self.final_focus = Some(node);
        self
    }

    pub fn container(mut self, container: MountContainer) -> Self {
        self.container = container;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn labelled_by(mut self, id: impl Into<String>) -> Self {
        self.aria_labelledby = Some(id.into());
        self
    }

    pub fn described_by(mut self, id: impl Into<String>) -> Self {
        self.aria_describedby = Some(id.into());
        self
    }
}

/// What the View Shell needs to paint the dialog container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogHandle {
    id: DialogId,
    root: Option<NodeId>,
    container: Option<NodeId>,
    attributes: Vec<(&'static str, String)>,
}

impl DialogHandle {
    pub fn id(&self) -> DialogId {
        self.id
    }

    /// The root the core is currently observing.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolved mount container; `None` while a selector or node is not in the document yet.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Attributes the root element must carry: role, aria-modal, tabindex and labels.
    pub fn aria_attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The dialog a node is rendered in; see [`DialogService::context_of`].
#[derive(Clone, Debug)]
pub struct DialogContext {
    root: NodeId,
    dismiss: DismissCallback,
}

impl DialogContext {
    pub(crate) fn new(root: NodeId, dismiss: DismissCallback) -> Self {
        Self { root, dismiss }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Requests the dialog to close through its caller-supplied callback.
    pub fn dismiss(&self) {
        self.dismiss.invoke();
    }

    pub fn dismiss_callback(&self) -> &DismissCallback {
        &self.dismiss
    }
}

pub struct Dialog {
    service: DialogService,
    id: DialogId,
    dismiss: DismissCallback,
    options: DialogOptions,
    opened: bool,
    root: Option<NodeId>,
    mount: Option<MountId>,
    listeners: Option<ListenerGuard>,
}

impl Dialog {
    pub fn new(service: &DialogService, dismiss: DismissCallback, options: DialogOptions) -> Self {
        Self {
            id: service.next_dialog_id(),
            service: service.clone(),
            dismiss,
            options,
            opened: false,
            root: None,
            mount: None,
            listeners: None,
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    /// The caller's open flag.
    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Open and attached: registered, listening, focus managed.
    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn options(&self) -> &DialogOptions {
        &self.options
    }

    pub fn dismiss_callback(&self) -> &DismissCallback {
        &self.dismiss
    }

    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            id: self.id,
            root: self.root,
            container: self.container(),
            attributes: self.aria_attributes(),
        }
    }

    /// Resolves the mount container. `None` means "not ready yet"; retry on the next render.
    pub fn container(&self) -> Option<NodeId> {
        let document = self.service.document();
        match &self.options.container {
            MountContainer::Body => Some(document.body()),
            MountContainer::Selector(selector) => document.query_selector(selector),
            MountContainer::Node(node) => Some(*node).filter(|node| document.is_connected(*node)),
        }
    }

    pub fn set_opened(&mut self, opened: bool) {
        self.opened = opened;
        if opened {
            self.activate();
        } else {
            self.deactivate();
        }
    }

    /// The View Shell mounted (or replaced) the root element.
    pub fn attach(&mut self, root: NodeId) {
        if self.root != Some(root) {
            self.deactivate();
            self.root = Some(root);
        }
        self.activate();
    }

    /// The View Shell is about to remove the root element.
    pub fn detach(&mut self) {
        self.deactivate();
        self.root = None;
    }

    /// Re-registers an open dialog so it becomes topmost again.
    ///
    /// Also picks up an open request that could not be applied earlier, and tears down a dialog
    /// whose root disappeared without a `detach`.
    pub fn render(&mut self) {
        if !self.is_active() {
            self.activate();
            return;
        }
        let (Some(root), Some(mount)) = (self.root, self.mount) else {
            return;
        };
        if self.service.register(root, &self.dismiss, mount).is_none() {
            tracing::debug!(
                target: RUNTIME_TARGET,
                dialog = self.id.raw(),
                root = root.raw(),
                "dialog root vanished without detach"
            );
            self.deactivate();
        }
    }

    pub fn set_dismiss(&mut self, dismiss: DismissCallback) {
        self.dismiss = dismiss;
        if let (Some(root), Some(mount)) = (self.root, self.mount) {
            if self.is_active() {
                self.service.register(root, &self.dismiss, mount);
                self.restart_listeners(root);
            }
        }
    }

    pub fn set_options(&mut self, options: DialogOptions) {
        self.options = options;
        if let (Some(root), true) = (self.root, self.is_active()) {
            self.restart_listeners(root);
        }
    }

    fn activate(&mut self) {
        if self.is_active() || !self.opened {
            return;
        }
        let Some(root) = self.root else {
            return;
        };

        let mount = self.service.next_mount_id();
        if self.service.register(root, &self.dismiss, mount).is_none() {
            return;
        }
        self.mount = Some(mount);
        self.restart_listeners(root);
        self.warn_if_unlabelled(root);

        let placement = placement::place_initial_focus(
            self.service.document(),
            root,
            &self.service.config().autofocus_attribute,
        );
        if placement == InitialFocus::Missing {
            self.service.report(Diagnostic::NoFocusableElement {
                dialog: self.id,
                root,
            });
        }
        tracing::debug!(
            target: RUNTIME_TARGET,
            dialog = self.id.raw(),
            root = root.raw(),
            ?placement,
            "dialog opened"
        );
    }

    fn deactivate(&mut self) {
        let Some(listeners) = self.listeners.take() else {
            return;
        };
        listeners.stop();

        // Read the restore target while the closing entry can still be topmost.
        let topmost_prior = self
            .service
            .topmost()
            .and_then(|entry| entry.prior_active());
        if let (Some(root), Some(mount)) = (self.root, self.mount.take()) {
            self.service.deactivate(root, mount);
        }
        let restored = placement::restore_final_focus(
            self.service.document(),
            self.options.final_focus,
            topmost_prior,
        );
        tracing::debug!(
            target: RUNTIME_TARGET,
            dialog = self.id.raw(),
            restored = ?restored,
            "dialog closed"
        );
    }

    fn restart_listeners(&mut self, root: NodeId) {
        let close_on_click_outside = self
            .options
            .close_on_click_outside
            .unwrap_or(self.service.config().close_on_click_outside);
        self.listeners = Some(self.service.start_listeners(DialogListeners {
            dialog: self.id,
            root,
            dismiss: self.dismiss.clone(),
            close_on_click_outside,
        }));
    }

    fn warn_if_unlabelled(&self, root: NodeId) {
        let document = self.service.document();
        let labelled = ["aria-label", "aria-labelledby"].iter().any(|name| {
            document
                .attribute(root, name)
                .is_some_and(|value| !value.trim().is_empty())
        });
        if !labelled {
            self.service.report(Diagnostic::MissingAccessibleLabel {
                dialog: self.id,
                root,
            });
        }
    }

    fn aria_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("role", "dialog".to_string()),
            ("aria-modal", "true".to_string()),
            ("tabindex", "-1".to_string()),
        ];
        let labels = [
            ("aria-label", &self.options.aria_label),
            ("aria-labelledby", &self.options.aria_labelledby),
            ("aria-describedby", &self.options.aria_describedby),
        ];
        for (name, value) in labels {
            if let Some(value) = value {
                attributes.push((name, value.clone()));
            }
        }
        attributes
    }
}

impl Drop for Dialog {
    fn drop(&mut self) {
        self.deactivate();
    }
}
