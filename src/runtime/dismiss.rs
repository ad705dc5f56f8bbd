//! Topmost-only dismissal routing.
//!
//! Every open dialog listens for Escape and clicks, but only the listener whose dismiss callback
//! is identical to the topmost registry entry's callback acts. That identity check is what makes
//! nested dialogs close one at a time.

use crate::core::document::{Document, NodeId};
use crate::runtime::listeners::DialogListeners;
use crate::runtime::registry::{DialogEntry, DismissCallback};

pub fn is_topmost(topmost: Option<&DialogEntry>, own: &DismissCallback) -> bool {
    topmost.is_some_and(|entry| entry.dismiss().same_as(own))
}

/// Whether a capture-phase click on `target` dismisses the dialog rooted at `root`.
pub fn is_outside_click(
    document: &dyn Document,
    topmost: Option<&DialogEntry>,
    root: NodeId,
    own: &DismissCallback,
    target: NodeId,
) -> bool {
    !document.contains(root, target) && is_topmost(topmost, own)
}

/// Listeners that should dismiss on Escape; at most one callback per identity.
pub fn route_escape<'a>(
    listeners: &'a [DialogListeners],
    topmost: Option<&DialogEntry>,
) -> Vec<&'a DialogListeners> {
    dedup_by_callback(
        listeners
            .iter()
            .filter(|listener| is_topmost(topmost, &listener.dismiss)),
    )
}

/// Listeners that should dismiss on a click at `target`.
pub fn route_click<'a>(
    document: &dyn Document,
    listeners: &'a [DialogListeners],
    topmost: Option<&DialogEntry>,
    target: NodeId,
) -> Vec<&'a DialogListeners> {
    dedup_by_callback(listeners.iter().filter(|listener| {
        listener.close_on_click_outside
            && is_outside_click(document, topmost, listener.root, &listener.dismiss, target)
    }))
}

fn dedup_by_callback<'a>(
    candidates: impl Iterator<Item = &'a DialogListeners>,
) -> Vec<&'a DialogListeners> {
    let mut routed: Vec<&DialogListeners> = Vec::new();
    for candidate in candidates {
        if !routed
            .iter()
            .any(|seen| seen.dismiss.same_as(&candidate.dismiss))
        {
            routed.push(candidate);
        }
    }
    routed
}
