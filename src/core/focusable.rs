//! Focusability predicate.
//!
//! Everything here is recomputed per call from the live document. Nothing is cached, since
//! dialog content can change between two key presses.

use crate::core::document::{Document, NodeId};
use crate::core::tree::descendants;

const FORM_CONTROLS: &[&str] = &[
    "button", "input", "select", "textarea", "optgroup", "option", "fieldset",
];

/// Parsed `tabindex`; unparsable values are ignored like a browser does.
pub fn tab_index<D: Document + ?Sized>(document: &D, node: NodeId) -> Option<i32> {
    document
        .attribute(node, "tabindex")
        .and_then(|value| value.trim().parse::<i32>().ok())
}

pub fn has_negative_tab_index<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    matches!(tab_index(document, node), Some(index) if index < 0)
}

/// Elements that take focus without an explicit `tabindex`.
pub fn is_implicitly_focusable<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    let Some(tag) = document.tag_name(node) else {
        return false;
    };
    let implicit = match tag.as_str() {
        "a" | "area" => document.has_attribute(node, "href"),
        "input" => !document
            .attribute(node, "type")
            .is_some_and(|kind| kind.eq_ignore_ascii_case("hidden")),
        "button" | "select" | "textarea" | "iframe" | "summary" => true,
        "audio" | "video" => document.has_attribute(node, "controls"),
        _ => false,
    };
    implicit
        || document
            .attribute(node, "contenteditable")
            .is_some_and(|value| !value.eq_ignore_ascii_case("false"))
}

/// Disabled form control, or any element inside a disabled `<fieldset>`.
pub fn is_disabled<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    let own_control = document
        .tag_name(node)
        .is_some_and(|tag| FORM_CONTROLS.contains(&tag.as_str()));
    if own_control && document.has_attribute(node, "disabled") {
        return true;
    }

    let mut current = document.parent(node);
    while let Some(ancestor) = current {
        if document.tag_name(ancestor).as_deref() == Some("fieldset")
            && document.has_attribute(ancestor, "disabled")
        {
            return true;
        }
        current = document.parent(ancestor);
    }
    false
}

/// Hidden by layout, the `hidden` attribute, or `inert`, on the node or any ancestor.
pub fn is_hidden<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if !document.is_rendered(candidate)
            || document.has_attribute(candidate, "hidden")
            || document.has_attribute(candidate, "inert")
        {
            return true;
        }
        current = document.parent(candidate);
    }
    false
}

fn is_interactive<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    document.is_connected(node) && !is_hidden(document, node) && !is_disabled(document, node)
}

/// Reachable with Tab: enabled, visible, and a non-negative or implicit tab index.
pub fn is_keyboard_focusable<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    if !is_interactive(document, node) {
        return false;
    }
    match tab_index(document, node) {
        Some(index) => index >= 0,
        None => is_implicitly_focusable(document, node),
    }
}

/// Accepts `focus()` calls, including `tabindex="-1"` elements that Tab skips.
pub fn is_programmatically_focusable<D: Document + ?Sized>(document: &D, node: NodeId) -> bool {
    is_interactive(document, node)
        && (tab_index(document, node).is_some() || is_implicitly_focusable(document, node))
}

/// Keyboard-focusable descendants of `root`, in document order.
pub fn focusable_descendants<D: Document + ?Sized>(document: &D, root: NodeId) -> Vec<NodeId> {
    descendants(document, root)
        .filter(|node| is_keyboard_focusable(document, *node))
        .collect()
}
