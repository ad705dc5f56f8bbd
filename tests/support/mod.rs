#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use modal_stack::{
    ClickEvent, Diagnostic, Dialog, DialogOptions, DialogService, DismissCallback,
    DispatchOutcome, Document, KeyEvent, MemoryDocument, ModalConfig, NodeId,
};

/// Memory document plus the bits of a View Shell the tests need.
pub struct Host {
    pub doc: Rc<MemoryDocument>,
    pub service: DialogService,
    dismissed: Rc<RefCell<Vec<String>>>,
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl Host {
    pub fn new() -> Self {
        Self::with_config(ModalConfig::default())
    }

    pub fn with_config(config: ModalConfig) -> Self {
        let doc = Rc::new(MemoryDocument::new());
        let service = DialogService::with_config(doc.clone(), config);
        let diagnostics = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&diagnostics);
        service.set_diagnostics_hook(move |diagnostic| sink.borrow_mut().push(diagnostic.clone()));
        Self {
            doc,
            service,
            dismissed: Rc::new(RefCell::new(Vec::new())),
            diagnostics,
        }
    }

    pub fn body(&self) -> NodeId {
        self.doc.body()
    }

    pub fn button(&self, parent: NodeId, id: &str) -> NodeId {
        self.doc
            .append_new(parent, "button", &[("id", id)])
            .unwrap_or_else(|err| panic!("append button #{id}: {err}"))
    }

    pub fn by_id(&self, id: &str) -> NodeId {
        self.doc
            .get_element_by_id(id)
            .unwrap_or_else(|| panic!("no element #{id}"))
    }

    pub fn focus(&self, id: &str) {
        self.doc.focus(self.by_id(id));
    }

    pub fn focused(&self) -> Option<String> {
        self.doc
            .active_element()
            .and_then(|node| self.doc.attribute(node, "id"))
    }

    pub fn press(&self, key_id: &str) -> DispatchOutcome {
        let event = KeyEvent::parse(key_id).unwrap_or_else(|| panic!("bad key id {key_id:?}"));
        self.service.dispatch_keydown(&event)
    }

    /// Pointer down focuses the target (when it can take focus), then the click is dispatched.
    pub fn click(&self, node: NodeId) -> DispatchOutcome {
        self.doc.focus(node);
        self.service.dispatch_click(&ClickEvent::on(node))
    }

    pub fn take_dismissed(&self) -> Vec<String> {
        std::mem::take(&mut *self.dismissed.borrow_mut())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn dismiss_recorder(&self, name: &str) -> DismissCallback {
        let dismissed = Rc::clone(&self.dismissed);
        let name = name.to_string();
        DismissCallback::new(move || dismissed.borrow_mut().push(name.clone()))
    }

    /// Renders a labelled dialog root with `id = name`, fills it, mounts it and opens it.
    pub fn open_dialog(
        &self,
        name: &str,
        options: DialogOptions,
        build: impl FnOnce(&MemoryDocument, NodeId),
    ) -> MountedDialog {
        let mut dialog = Dialog::new(&self.service, self.dismiss_recorder(name), options);
        dialog.set_opened(true);

        let handle = dialog.handle();
        let root = self.doc.create_element_with("div", &[("id", name)]);
        for (attribute, value) in handle.aria_attributes() {
            self.doc
                .set_attribute(root, attribute, value)
                .unwrap_or_else(|err| panic!("set {attribute}: {err}"));
        }
        build(&self.doc, root);

        let container = handle.container().expect("mount container resolves");
        self.doc
            .append_child(container, root)
            .unwrap_or_else(|err| panic!("mount #{name}: {err}"));
        dialog.attach(root);

        MountedDialog {
            dialog,
            root,
            doc: Rc::clone(&self.doc),
        }
    }

    /// A labelled dialog with one button per id.
    pub fn open_with_buttons(&self, name: &str, buttons: &[&str]) -> MountedDialog {
        self.open_dialog(name, DialogOptions::new().label(name), |doc, root| {
            for id in buttons {
                doc.append_new(root, "button", &[("id", id)])
                    .unwrap_or_else(|err| panic!("append #{id}: {err}"));
            }
        })
    }
}

pub struct MountedDialog {
    pub dialog: Dialog,
    pub root: NodeId,
    doc: Rc<MemoryDocument>,
}

impl MountedDialog {
    /// The caller flips its open flag, then the View Shell unmounts the markup.
    pub fn close(mut self) {
        self.dialog.set_opened(false);
        self.dialog.detach();
        self.doc
            .remove(self.root)
            .unwrap_or_else(|err| panic!("unmount dialog: {err}"));
    }
}
