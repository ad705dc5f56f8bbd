//! Tab containment for an open dialog.
//!
//! Only the edges are intercepted: Tab on the last focusable element (or on the root) wraps to
//! the first, Shift+Tab on the first (or on the root) wraps to the last. Everything in between
//! keeps the host's native tab order.
//!
//! If focus sits on an element that is neither focusable nor the root (for example a clicked
//! paragraph), no edge matches and the host's default handling applies, which may leave the
//! dialog. That boundary is kept as is.

use crate::core::document::{Document, NodeId};
use crate::core::focusable::focusable_descendants;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapAction {
    /// Focus was moved to the opposite edge.
    Wrapped(NodeId),
    /// The root has focus and nothing inside can take it; focus stays on the root.
    Held(NodeId),
    /// Not at an edge; the host's default tab order applies.
    Passthrough,
}

impl TrapAction {
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Passthrough)
    }
}

/// Handles one Tab (`backward` for Shift+Tab) against the live focusable set of `root`.
pub fn handle_tab(document: &dyn Document, root: NodeId, backward: bool) -> TrapAction {
    if !document.is_connected(root) {
        return TrapAction::Passthrough;
    }

    let active = document.active_element();
    let on_root = active == Some(root);
    let focusable = focusable_descendants(document, root);
    let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
        return if on_root {
            TrapAction::Held(root)
        } else {
            TrapAction::Passthrough
        };
    };

    let (edge, wrap_to) = if backward { (first, last) } else { (last, first) };
    if on_root || active == Some(edge) {
        document.focus(wrap_to);
        TrapAction::Wrapped(wrap_to)
    } else {
        TrapAction::Passthrough
    }
}

#[cfg(test)]
mod tests {
    use super::{handle_tab, TrapAction};
    use crate::core::document::{Document, NodeId};
    use crate::platform::memory_document::MemoryDocument;

    fn dialog_with_buttons(count: usize) -> (MemoryDocument, NodeId, Vec<NodeId>) {
        let doc = MemoryDocument::new();
        let root = doc
            .append_new(doc.body(), "div", &[("role", "dialog"), ("tabindex", "-1")])
            .unwrap();
        let buttons = (0..count)
            .map(|_| doc.append_new(root, "button", &[]).unwrap())
            .collect();
        (doc, root, buttons)
    }

    #[test]
    fn forward_tab_wraps_from_last_to_first() {
        let (doc, root, buttons) = dialog_with_buttons(3);
        doc.focus(buttons[2]);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Wrapped(buttons[0]));
        assert_eq!(doc.active_element(), Some(buttons[0]));
    }

    #[test]
    fn backward_tab_wraps_from_first_to_last() {
        let (doc, root, buttons) = dialog_with_buttons(3);
        doc.focus(buttons[0]);
        assert_eq!(handle_tab(&doc, root, true), TrapAction::Wrapped(buttons[2]));
        assert_eq!(doc.active_element(), Some(buttons[2]));
    }

    #[test]
    fn middle_elements_pass_through() {
        let (doc, root, buttons) = dialog_with_buttons(3);
        doc.focus(buttons[1]);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Passthrough);
        assert_eq!(handle_tab(&doc, root, true), TrapAction::Passthrough);
        assert!(!TrapAction::Passthrough.prevents_default());
        assert_eq!(doc.active_element(), Some(buttons[1]));
    }

    #[test]
    fn focused_root_enters_at_the_matching_edge() {
        let (doc, root, buttons) = dialog_with_buttons(2);
        doc.focus(root);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Wrapped(buttons[0]));
        doc.focus(root);
        assert_eq!(handle_tab(&doc, root, true), TrapAction::Wrapped(buttons[1]));
    }

    #[test]
    fn single_element_cycles_onto_itself() {
        let (doc, root, buttons) = dialog_with_buttons(1);
        doc.focus(buttons[0]);
        let forward = handle_tab(&doc, root, false);
        assert_eq!(forward, TrapAction::Wrapped(buttons[0]));
        assert!(forward.prevents_default());
        assert_eq!(handle_tab(&doc, root, true), TrapAction::Wrapped(buttons[0]));
        assert_eq!(doc.active_element(), Some(buttons[0]));
    }

    #[test]
    fn empty_dialog_holds_focus_on_root() {
        let (doc, root, _) = dialog_with_buttons(0);
        doc.focus(root);
        let action = handle_tab(&doc, root, false);
        assert_eq!(action, TrapAction::Held(root));
        assert!(action.prevents_default());
        assert_eq!(doc.active_element(), Some(root));
    }

    #[test]
    fn unfocusable_active_element_is_not_intercepted() {
        let (doc, root, buttons) = dialog_with_buttons(2);
        doc.focus(buttons[1]);
        // Clicking plain text inside the dialog drops focus off the managed set.
        doc.blur();
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Passthrough);
        assert_eq!(handle_tab(&doc, root, true), TrapAction::Passthrough);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn focusable_set_is_recomputed_each_press() {
        let (doc, root, buttons) = dialog_with_buttons(2);
        let added = doc.append_new(root, "input", &[]).unwrap();
        doc.focus(buttons[1]);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Passthrough);

        doc.focus(added);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Wrapped(buttons[0]));

        doc.set_attribute(added, "disabled", "").unwrap();
        doc.focus(buttons[1]);
        assert_eq!(handle_tab(&doc, root, false), TrapAction::Wrapped(buttons[0]));
    }
}
