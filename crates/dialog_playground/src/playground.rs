//! A scripted host: owns the page, mounts dialogs on request and forwards events to the service.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use modal_stack::{
    focusable_descendants, ClickEvent, Dialog, DialogService, DismissCallback, Document,
    MemoryDocument, ModalConfig, NodeId,
};

use crate::page::{self, DialogKind, CLOSE_ATTRIBUTE, OUTSIDE_ID};
use crate::script::{Command, ScriptError};

/// State of the page after one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub command: Command,
    /// Id of the focused element, if any.
    pub focused: Option<String>,
    /// Ids of the mounted dialog roots, bottom to top.
    pub open: Vec<String>,
    /// Dialogs closed by this step.
    pub closed: Vec<DialogKind>,
    /// Whether the dialog layer suppressed the key's default action.
    pub prevented: bool,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<14} focus={:<10} open=[{}]",
            self.command.to_string(),
            self.focused.as_deref().unwrap_or("-"),
            self.open.join(", ")
        )?;
        if !self.closed.is_empty() {
            let closed: Vec<String> = self.closed.iter().map(ToString::to_string).collect();
            write!(f, " closed=[{}]", closed.join(", "))?;
        }
        if self.prevented {
            f.write_str(" (default prevented)")?;
        }
        Ok(())
    }
}

struct MountedDialog {
    kind: DialogKind,
    dialog: Dialog,
    root: NodeId,
}

pub struct Playground {
    doc: Rc<MemoryDocument>,
    service: DialogService,
    close_requests: Rc<RefCell<Vec<DialogKind>>>,
    mounted: Vec<MountedDialog>,
}

impl Playground {
    pub fn new(config: ModalConfig) -> Result<Self, ScriptError> {
        let doc = Rc::new(MemoryDocument::new());
        page::build(&doc)?;
        let service = DialogService::with_config(doc.clone(), config);
        Ok(Self {
            doc,
            service,
            close_requests: Rc::new(RefCell::new(Vec::new())),
            mounted: Vec::new(),
        })
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn service(&self) -> &DialogService {
        &self.service
    }

    pub fn run(&mut self, commands: &[Command]) -> Result<Vec<StepReport>, ScriptError> {
        commands.iter().map(|command| self.apply(command)).collect()
    }

    pub fn apply(&mut self, command: &Command) -> Result<StepReport, ScriptError> {
        let mut prevented = false;
        match command {
            Command::Open(kind) => self.click(kind.trigger_id())?,
            Command::Key(event) => {
                let outcome = self.service.dispatch_keydown(event);
                prevented = outcome.prevent_default;
                if event.is_tab() && !prevented {
                    self.advance_focus(event.modifiers.shift);
                }
            }
            Command::ClickOutside => self.click(OUTSIDE_ID)?,
            Command::Click(id) => self.click(id)?,
        }
        let closed = self.apply_close_requests()?;
        tracing::debug!(%command, ?closed, "step applied");

        Ok(StepReport {
            command: command.clone(),
            focused: self.focused_id(),
            open: self.open_dialog_ids(),
            closed,
            prevented,
        })
    }

    /// Pointer down focuses the target, the dialog layer sees the click in the capture phase,
    /// then the page's own click handlers run.
    fn click(&mut self, id: &str) -> Result<(), ScriptError> {
        let target = self
            .doc
            .get_element_by_id(id)
            .ok_or_else(|| ScriptError::UnknownElement { id: id.to_string() })?;
        self.doc.focus(target);
        self.service.dispatch_click(&ClickEvent::on(target));

        if self.doc.has_attribute(target, CLOSE_ATTRIBUTE) {
            self.service.context_of(target)?.dismiss();
        } else if let Some(kind) = DialogKind::opened_by(id) {
            self.open(kind)?;
        }
        Ok(())
    }

    fn open(&mut self, kind: DialogKind) -> Result<(), ScriptError> {
        if self.mounted.iter().any(|mounted| mounted.kind == kind) {
            return Ok(());
        }
        let requests = Rc::clone(&self.close_requests);
        let dismiss = DismissCallback::new(move || requests.borrow_mut().push(kind));
        let mut dialog = Dialog::new(&self.service, dismiss, kind.options());
        dialog.set_opened(true);

        let handle = dialog.handle();
        let container = handle
            .container()
            .ok_or(ScriptError::MissingContainer { kind })?;
        let root = self.doc.create_element_with("div", &[("id", kind.root_id())]);
        for (name, value) in handle.aria_attributes() {
            self.doc.set_attribute(root, name, value)?;
        }
        kind.fill(&self.doc, root, &self.service.config().autofocus_attribute)?;
        self.doc.append_child(container, root)?;
        dialog.attach(root);

        self.mounted.push(MountedDialog { kind, dialog, root });
        Ok(())
    }

    /// Dismiss callbacks only record the request, like a state setter; the page re-renders here.
    fn apply_close_requests(&mut self) -> Result<Vec<DialogKind>, ScriptError> {
        let requests: Vec<DialogKind> = self.close_requests.borrow_mut().drain(..).collect();
        let mut closed = Vec::new();
        for kind in requests {
            let Some(index) = self.mounted.iter().position(|mounted| mounted.kind == kind) else {
                continue;
            };
            let mut mounted = self.mounted.remove(index);
            mounted.dialog.set_opened(false);
            mounted.dialog.detach();
            self.doc.remove(mounted.root)?;
            closed.push(kind);
        }
        Ok(closed)
    }

    /// Native tab order across the whole page, used when the dialog layer lets Tab through.
    fn advance_focus(&self, backward: bool) {
        let order = focusable_descendants(&*self.doc, self.doc.document_element());
        if order.is_empty() {
            return;
        }
        let current = self
            .doc
            .active_element()
            .and_then(|active| order.iter().position(|node| *node == active));
        let next = match (current, backward) {
            (None, false) => 0,
            (None, true) => order.len() - 1,
            (Some(index), false) => (index + 1) % order.len(),
            (Some(index), true) => (index + order.len() - 1) % order.len(),
        };
        self.doc.focus(order[next]);
    }

    fn focused_id(&self) -> Option<String> {
        let active = self.doc.active_element()?;
        Some(
            self.doc
                .attribute(active, "id")
                .unwrap_or_else(|| active.to_string()),
        )
    }

    fn open_dialog_ids(&self) -> Vec<String> {
        self.service
            .open_roots()
            .into_iter()
            .filter_map(|root| self.doc.attribute(root, "id"))
            .collect()
    }
}
