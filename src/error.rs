use thiserror::Error;

use crate::core::document::NodeId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error("node {node} is not inside a registered dialog; dialog-scoped parts must be rendered within a dialog root")]
    OutsideDialogContext { node: NodeId },

    #[error("the per-thread dialog service is already initialized")]
    GlobalAlreadyInitialized,

    #[error("the per-thread dialog service has not been initialized; call runtime::global::init first")]
    GlobalNotInitialized,

    #[error("node {node} does not belong to this document")]
    NodeNotFound { node: NodeId },

    #[error("cannot insert node {child} under {parent}: the child is an ancestor of the parent")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("reference node {reference} is not a child of {parent}")]
    NotAChild { parent: NodeId, reference: NodeId },

    #[error("unsupported selector '{selector}'")]
    InvalidSelector { selector: String },
}

impl DialogError {
    #[must_use]
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
        }
    }
}
