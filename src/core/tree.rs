//! Document-order traversal.

use crate::core::document::{Document, NodeId};

/// Pre-order iterator over the descendants of a root, excluding the root itself.
///
/// Children are read lazily as the walk reaches them, so the iterator reflects the tree at the
/// moment each node is visited.
pub struct Descendants<'a, D: Document + ?Sized> {
    document: &'a D,
    pending: Vec<NodeId>,
}

impl<D: Document + ?Sized> Iterator for Descendants<'_, D> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.pending.pop()?;
        let children = self.document.children(node);
        self.pending.extend(children.into_iter().rev());
        Some(node)
    }
}

pub fn descendants<D: Document + ?Sized>(document: &D, root: NodeId) -> Descendants<'_, D> {
    let mut pending = document.children(root);
    pending.reverse();
    Descendants { document, pending }
}
