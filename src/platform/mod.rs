//! Document hosts.

pub mod memory_document;
pub mod selector;

pub use memory_document::MemoryDocument;
pub use selector::Selector;
