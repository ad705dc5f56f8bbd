//! In-memory document for headless hosts and tests.
//!
//! Mirrors the parts of browser behavior the dialog engine depends on:
//! - only connected, visible, enabled elements with a tab index or a natively focusable tag
//!   accept `focus()`;
//! - detaching the focused element (or one of its ancestors) leaves nothing focused.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

use crate::core::document::{Document, NodeId};
use crate::core::focusable::is_programmatically_focusable;
use crate::core::tree::descendants;
use crate::error::DialogError;
use crate::platform::selector::Selector;

/// Most recent focus changes kept by [`MemoryDocument::focus_history`].
pub const FOCUS_HISTORY_LIMIT: usize = 256;

#[derive(Debug)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rendered: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            rendered: true,
        }
    }
}

#[derive(Debug)]
pub struct MemoryDocument {
    elements: RefCell<Vec<Element>>,
    document_element: NodeId,
    body: NodeId,
    active: Cell<Option<NodeId>>,
    focus_history: RefCell<VecDeque<NodeId>>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates `<html><body></body></html>` with nothing focused.
    pub fn new() -> Self {
        let document_element = NodeId::from_raw(0);
        let body = NodeId::from_raw(1);
        let mut html = Element::new("html");
        html.children.push(body);
        let mut body_element = Element::new("body");
        body_element.parent = Some(document_element);

        Self {
            elements: RefCell::new(vec![html, body_element]),
            document_element,
            body,
            active: Cell::new(None),
            focus_history: RefCell::new(VecDeque::new()),
        }
    }

    pub fn document_element(&self) -> NodeId {
        self.document_element
    }

    /// Creates a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        let id = NodeId::from_raw(elements.len() as u64);
        elements.push(Element::new(tag));
        id
    }

    pub fn create_element_with(&self, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        let mut elements = self.elements.borrow_mut();
        let element = &mut elements[index(node)];
        for (name, value) in attributes {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), (*value).to_string());
        }
        node
    }

    /// Creates an element with `attributes` and appends it to `parent`.
    pub fn append_new(
        &self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DialogError> {
        self.ensure_exists(parent)?;
        let node = self.create_element_with(tag, attributes);
        self.append_child(parent, node)?;
        Ok(node)
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DialogError> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` before `reference` (or at the end), moving it out of its old parent.
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DialogError> {
        self.ensure_exists(parent)?;
        self.ensure_exists(child)?;
        if self.contains(child, parent) {
            return Err(DialogError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DialogError::NotAChild { parent, reference });
            }
        }

        self.unlink(child);
        self.release_detached_focus();

        let mut elements = self.elements.borrow_mut();
        let siblings = &mut elements[index(parent)].children;
        let position = reference
            .and_then(|reference| siblings.iter().position(|node| *node == reference))
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        elements[index(child)].parent = Some(parent);
        Ok(())
    }

    /// Detaches `node` (and its subtree) from its parent. Detached nodes can be re-inserted.
    pub fn remove(&self, node: NodeId) -> Result<(), DialogError> {
        self.ensure_exists(node)?;
        self.unlink(node);
        self.release_detached_focus();
        Ok(())
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DialogError> {
        self.with_element_mut(node, |element| {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        })
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DialogError> {
        self.with_element_mut(node, |element| {
            element.attributes.remove(&name.to_ascii_lowercase());
        })
    }

    /// Simulates `display: none` on the element when `rendered` is false.
    pub fn set_rendered(&self, node: NodeId, rendered: bool) -> Result<(), DialogError> {
        self.with_element_mut(node, |element| element.rendered = rendered)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        descendants(self, self.document_element)
            .find(|node| self.attribute(*node, "id").as_deref() == Some(id))
    }

    /// Like [`Document::query_selector`], but reports unsupported selectors.
    pub fn try_query_selector(&self, selector: &str) -> Result<Option<NodeId>, DialogError> {
        let selector = Selector::parse(selector)?;
        Ok(descendants(self, self.document_element).find(|node| selector.matches(self, *node)))
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DialogError> {
        let selector = Selector::parse(selector)?;
        Ok(descendants(self, self.document_element)
            .filter(|node| selector.matches(self, *node))
            .collect())
    }

    /// Drops focus without moving it anywhere.
    pub fn blur(&self) {
        self.active.set(None);
    }

    /// Elements that successfully received focus, oldest first. Only the last
    /// [`FOCUS_HISTORY_LIMIT`] are kept.
    pub fn focus_history(&self) -> Vec<NodeId> {
        self.focus_history.borrow().iter().copied().collect()
    }

    pub fn clear_focus_history(&self) {
        self.focus_history.borrow_mut().clear();
    }

    fn ensure_exists(&self, node: NodeId) -> Result<(), DialogError> {
        if self.elements.borrow().len() > index(node) {
            Ok(())
        } else {
            Err(DialogError::NodeNotFound { node })
        }
    }

    fn with_element_mut(
        &self,
        node: NodeId,
        update: impl FnOnce(&mut Element),
    ) -> Result<(), DialogError> {
        let mut elements = self.elements.borrow_mut();
        let element = elements
            .get_mut(index(node))
            .ok_or(DialogError::NodeNotFound { node })?;
        update(element);
        Ok(())
    }

    fn unlink(&self, node: NodeId) {
        let mut elements = self.elements.borrow_mut();
        if let Some(parent) = elements[index(node)].parent.take() {
            elements[index(parent)].children.retain(|child| *child != node);
        }
    }

    fn release_detached_focus(&self) {
        if let Some(active) = self.active.get() {
            if !self.is_connected(active) {
                self.active.set(None);
            }
        }
    }
}

impl Document for MemoryDocument {
    fn body(&self) -> NodeId {
        self.body
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.elements.borrow().get(index(node))?.parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements
            .borrow()
            .get(index(node))
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    fn is_connected(&self, node: NodeId) -> bool {
        if index(node) >= self.elements.borrow().len() {
            return false;
        }
        self.contains(self.document_element, node)
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.elements
            .borrow()
            .get(index(node))
            .map(|element| element.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(index(node))?
            .attributes
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    fn is_rendered(&self, node: NodeId) -> bool {
        self.elements
            .borrow()
            .get(index(node))
            .is_some_and(|element| element.rendered)
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.get().filter(|node| self.is_connected(*node))
    }

    fn focus(&self, node: NodeId) {
        if !is_programmatically_focusable(self, node) {
            return;
        }
        self.active.set(Some(node));
        let mut history = self.focus_history.borrow_mut();
        if history.len() == FOCUS_HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(node);
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.try_query_selector(selector).ok().flatten()
    }
}

fn index(node: NodeId) -> usize {
    usize::try_from(node.raw()).unwrap_or(usize::MAX)
}
