//! Dialog runtime: registry, focus placement, focus trap and dismissal routing.

pub mod dialog;
pub mod dismiss;
pub mod global;
pub mod listeners;
pub mod placement;
pub mod registry;
pub mod service;
pub mod trap;

pub use dialog::{Dialog, DialogContext, DialogHandle, DialogId, DialogOptions, MountContainer};
pub use listeners::{ListenerGuard, ListenerId};
pub use placement::InitialFocus;
pub use registry::{DialogEntry, DialogStack, DismissCallback, MountId};
pub use service::{DialogService, DispatchOutcome};
pub use trap::TrapAction;
