//! The demo page: a trigger, a settings dialog, and a confirmation dialog opened from inside it.

use modal_stack::{DialogError, DialogOptions, Document, MemoryDocument, MountContainer, NodeId};

/// Attribute the page uses for buttons that close their own dialog.
pub const CLOSE_ATTRIBUTE: &str = "data-dialog-close";
pub const OUTSIDE_ID: &str = "outside";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    /// Dialog A, mounted at the end of the body.
    Settings,
    /// Dialog B, mounted into `#portal` and ignoring outside clicks.
    Confirm,
}

impl DialogKind {
    pub fn root_id(self) -> &'static str {
        match self {
            Self::Settings => "dialog-a",
            Self::Confirm => "dialog-b",
        }
    }

    /// Id of the button whose click opens this dialog.
    pub fn trigger_id(self) -> &'static str {
        match self {
            Self::Settings => "open-a",
            Self::Confirm => "open-b",
        }
    }

    pub fn opened_by(id: &str) -> Option<Self> {
        [Self::Settings, Self::Confirm]
            .into_iter()
            .find(|kind| kind.trigger_id() == id)
    }

    pub fn options(self) -> DialogOptions {
        match self {
            Self::Settings => DialogOptions::new().labelled_by("dialog-a-title"),
            Self::Confirm => DialogOptions::new()
                .label("Discard changes?")
                .close_on_click_outside(false)
                .container(MountContainer::Selector("#portal".to_string())),
        }
    }

    /// Builds the dialog's content. `autofocus` is the attribute that marks the initial focus
    /// target.
    pub(crate) fn fill(
        self,
        doc: &MemoryDocument,
        root: NodeId,
        autofocus: &str,
    ) -> Result<(), DialogError> {
        match self {
            Self::Settings => {
                doc.append_new(root, "h2", &[("id", "dialog-a-title")])?;
                doc.append_new(root, "input", &[("id", "name"), ("type", "text")])?;
                doc.append_new(root, "button", &[("id", "open-b")])?;
                doc.append_new(root, "button", &[("id", "close-a"), (CLOSE_ATTRIBUTE, "")])?;
            }
            Self::Confirm => {
                doc.append_new(root, "p", &[])?;
                doc.append_new(root, "button", &[("id", "cancel"), (CLOSE_ATTRIBUTE, "")])?;
                doc.append_new(
                    root,
                    "button",
                    &[("id", "confirm"), (autofocus, ""), (CLOSE_ATTRIBUTE, "")],
                )?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.root_id())
    }
}

/// Builds the static part of the page.
pub(crate) fn build(doc: &MemoryDocument) -> Result<(), DialogError> {
    let body = doc.body();
    doc.append_new(body, "button", &[("id", DialogKind::Settings.trigger_id())])?;
    let outside = doc.append_new(body, "main", &[("id", OUTSIDE_ID)])?;
    doc.append_new(outside, "a", &[("id", "help"), ("href", "#help")])?;
    doc.append_new(body, "div", &[("id", "portal")])?;
    Ok(())
}
