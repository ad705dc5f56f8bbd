//! Core interfaces and types.

pub mod document;
pub mod focusable;
pub mod input_event;
pub mod tree;
