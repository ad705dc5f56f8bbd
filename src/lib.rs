//! Accessible modal dialog behavior for DOM-style hosts.
//!
//! Invariant: only the topmost dialog reacts. Escape, outside clicks and Tab containment are all
//! routed through the registry's topmost entry, however many dialogs are open.
//!
//! # Public API Overview
//! - Describe the host document with [`Document`] (or use [`MemoryDocument`] headless).
//! - Create one [`DialogService`] per document; it owns the dialog registry.
//! - Drive one [`Dialog`] per rendered dialog: `attach`/`detach` the root element, `set_opened`
//!   from the caller's state, `render` on every render.
//! - Forward document keydowns and capture-phase clicks to
//!   [`DialogService::dispatch_keydown`] / [`DialogService::dispatch_click`] and honor
//!   [`DispatchOutcome::prevent_default`].

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod runtime;

pub use crate::config::{ModalConfig, DEFAULT_AUTOFOCUS_ATTRIBUTE};
pub use crate::error::DialogError;
pub use crate::logging::{Diagnostic, DIAGNOSTICS_TARGET, RUNTIME_TARGET};

/// Host document interface and node handles.
pub use crate::core::document::{Document, NodeId};
/// Focusability predicate and descendant enumeration.
pub use crate::core::focusable::{
    focusable_descendants, is_keyboard_focusable, is_programmatically_focusable,
};
pub use crate::core::tree::{descendants, Descendants};
/// Keyboard and pointer events.
pub use crate::core::input_event::{ClickEvent, Key, KeyEvent, Modifiers};

/// In-memory document host.
pub use crate::platform::{MemoryDocument, Selector};

/// Dialog runtime.
pub use crate::runtime::{
    Dialog, DialogContext, DialogEntry, DialogHandle, DialogId, DialogOptions, DialogService,
    DialogStack, DismissCallback, DispatchOutcome, InitialFocus, ListenerGuard, ListenerId,
    MountContainer, MountId, TrapAction,
};
