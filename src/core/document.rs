//! Host document interface.

use std::fmt;

/// Opaque handle for an element owned by the host document.
///
/// The core never owns elements; it only holds handles and asks the [`Document`] about them.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(u64);

impl NodeId {
    pub fn raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Minimal DOM surface the dialog engine reads and drives.
///
/// Methods take `&self`: focus is a document-wide side effect, so implementations use
/// interior mutability the way a browser document does.
pub trait Document {
    /// The element content is mounted into by default.
    fn body(&self) -> NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether the node is currently attached to the document tree.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Lowercase tag name, `None` for unknown nodes.
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Layout visibility of the node itself (`display: none`, `visibility: hidden`).
    ///
    /// Hosts without layout information keep the default.
    fn is_rendered(&self, _node: NodeId) -> bool {
        true
    }

    /// The element holding keyboard focus, `None` when nothing (or the document) has it.
    fn active_element(&self) -> Option<NodeId>;

    /// Moves keyboard focus. Hosts ignore requests for elements that cannot take focus.
    fn focus(&self, node: NodeId);

    /// First connected element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    /// Inclusive containment: a node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }
}
