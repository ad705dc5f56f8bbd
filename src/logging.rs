//! Diagnostics and tracing targets.
//!
//! The crate never installs a subscriber. Hosts that want the output wire up their own
//! (`tracing-subscriber` or similar) and filter on the targets below.

use std::fmt;

use crate::core::document::NodeId;
use crate::runtime::dialog::DialogId;

/// Target for advisory, developer-facing diagnostics.
pub const DIAGNOSTICS_TARGET: &str = "modal_stack::diagnostics";
/// Target for registry and event-routing traces.
pub const RUNTIME_TARGET: &str = "modal_stack::runtime";

/// Non-fatal configuration problems found while a dialog opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The dialog root carries neither `aria-label` nor `aria-labelledby`.
    MissingAccessibleLabel { dialog: DialogId, root: NodeId },
    /// The initial focus scan found nothing keyboard-focusable inside the dialog.
    NoFocusableElement { dialog: DialogId, root: NodeId },
}

impl Diagnostic {
    pub fn dialog(&self) -> DialogId {
        match self {
            Self::MissingAccessibleLabel { dialog, .. } | Self::NoFocusableElement { dialog, .. } => {
                *dialog
            }
        }
    }

    pub fn root(&self) -> NodeId {
        match self {
            Self::MissingAccessibleLabel { root, .. } | Self::NoFocusableElement { root, .. } => {
                *root
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccessibleLabel { .. } => f.write_str(
                "dialog is missing an accessible label; set aria-label or aria-labelledby on the dialog root",
            ),
            Self::NoFocusableElement { .. } => f.write_str(
                "no focusable element found inside the dialog; every dialog should contain at least one focusable control",
            ),
        }
    }
}

pub(crate) fn emit(diagnostic: &Diagnostic) {
    tracing::warn!(
        target: DIAGNOSTICS_TARGET,
        dialog = diagnostic.dialog().raw(),
        root = diagnostic.root().raw(),
        "{diagnostic}"
    );
}

#[cfg(test)]
mod tests {
    use super::Diagnostic;
    use crate::core::document::NodeId;
    use crate::runtime::dialog::DialogId;

    #[test]
    fn messages_name_the_fix() {
        let missing = Diagnostic::MissingAccessibleLabel {
            dialog: DialogId::from_raw(1),
            root: NodeId::from_raw(7),
        };
        assert!(missing.to_string().contains("aria-labelledby"));
        assert_eq!(missing.root(), NodeId::from_raw(7));

        let empty = Diagnostic::NoFocusableElement {
            dialog: DialogId::from_raw(2),
            root: NodeId::from_raw(9),
        };
        assert!(empty.to_string().contains("at least one focusable control"));
        assert_eq!(empty.dialog(), DialogId::from_raw(2));
    }
}
