//! Initial and final focus placement.

use crate::core::document::{Document, NodeId};
use crate::core::focusable::{
    has_negative_tab_index, is_keyboard_focusable, is_programmatically_focusable,
};
use crate::core::tree::descendants;

/// Where initial focus should go when a dialog opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialFocus {
    /// A descendant carrying the marker attribute.
    Marker(NodeId),
    /// The first keyboard-focusable descendant in document order.
    FirstFocusable(NodeId),
    /// Nothing inside the dialog can take focus.
    Missing,
    /// The root is not attached; there is nothing to do yet.
    Detached,
}

impl InitialFocus {
    pub fn target(self) -> Option<NodeId> {
        match self {
            Self::Marker(node) | Self::FirstFocusable(node) => Some(node),
            Self::Missing | Self::Detached => None,
        }
    }
}

/// Resolves the initial focus target without moving focus.
///
/// A marked element wins when it is keyboard-focusable or explicitly `tabindex="-1"`. A marked
/// element that cannot take focus (disabled, hidden) falls through to the document-order scan.
pub fn initial_focus_target(
    document: &dyn Document,
    root: NodeId,
    marker_attribute: &str,
) -> InitialFocus {
    if !document.is_connected(root) {
        return InitialFocus::Detached;
    }

    let marked =
        descendants(document, root).find(|node| document.has_attribute(*node, marker_attribute));
    if let Some(marked) = marked {
        let usable = is_keyboard_focusable(document, marked)
            || (has_negative_tab_index(document, marked)
                && is_programmatically_focusable(document, marked));
        if usable {
            return InitialFocus::Marker(marked);
        }
    }

    descendants(document, root)
        .find(|node| is_keyboard_focusable(document, *node))
        .map_or(InitialFocus::Missing, InitialFocus::FirstFocusable)
}

/// Resolves and applies the initial focus target.
pub fn place_initial_focus(
    document: &dyn Document,
    root: NodeId,
    marker_attribute: &str,
) -> InitialFocus {
    let placement = initial_focus_target(document, root, marker_attribute);
    if let Some(target) = placement.target() {
        document.focus(target);
    }
    placement
}

/// Restores focus on close: the explicit target if given, else the topmost dialog's prior focus.
///
/// Returns the element focused, or `None` when the chosen target can no longer take keyboard
/// focus. There is no fallback to the body.
pub fn restore_final_focus(
    document: &dyn Document,
    explicit: Option<NodeId>,
    topmost_prior: Option<NodeId>,
) -> Option<NodeId> {
    let target = explicit.or(topmost_prior)?;
    if !is_keyboard_focusable(document, target) {
        return None;
    }
    document.focus(target);
    Some(target)
}
