//! Per-thread dialog service.
//!
//! Hosts that cannot thread a [`DialogService`] through their component tree install one service
//! per UI thread at startup and look it up where needed. The slot starts empty and is never torn
//! down; stale dialogs prune themselves from the registry.

use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::config::ModalConfig;
use crate::core::document::Document;
use crate::error::DialogError;
use crate::runtime::service::DialogService;

thread_local! {
    static SERVICE: OnceCell<DialogService> = OnceCell::new();
}

/// Installs the service for the current thread. Fails if one is already installed.
pub fn init(document: Rc<dyn Document>, config: ModalConfig) -> Result<DialogService, DialogError> {
    SERVICE.with(|slot| {
        let service = DialogService::with_config(document, config);
        slot.set(service.clone())
            .map_err(|_| DialogError::GlobalAlreadyInitialized)?;
        Ok(service)
    })
}

pub fn service() -> Result<DialogService, DialogError> {
    SERVICE.with(|slot| slot.get().cloned().ok_or(DialogError::GlobalNotInitialized))
}

pub fn is_initialized() -> bool {
    SERVICE.with(|slot| slot.get().is_some())
}

#[cfg(test)]
mod tests {
    use super::{init, is_initialized, service};
    use crate::config::ModalConfig;
    use crate::error::DialogError;
    use crate::platform::memory_document::MemoryDocument;
    use assert_matches::assert_matches;
    use std::rc::Rc;

    // Each test thread has its own slot, so the checks run on a fresh thread.
    #[test]
    fn init_once_then_lookup() {
        std::thread::spawn(|| {
            assert!(!is_initialized());
            assert_matches!(service(), Err(DialogError::GlobalNotInitialized));

            let installed = init(Rc::new(MemoryDocument::new()), ModalConfig::default()).unwrap();
            assert!(is_initialized());
            assert!(service().unwrap().same_service(&installed));

            assert_matches!(
                init(Rc::new(MemoryDocument::new()), ModalConfig::default()),
                Err(DialogError::GlobalAlreadyInitialized)
            );
        })
        .join()
        .unwrap();
    }
}
