//! Environment configuration.

use std::env;

/// Marker attribute that designates the initial focus target inside a dialog.
pub const DEFAULT_AUTOFOCUS_ATTRIBUTE: &str = "data-autofocus";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    /// Attribute name recognized as the explicit initial-focus marker.
    pub autofocus_attribute: String,
    /// Default for dialogs that do not set `close_on_click_outside` themselves.
    pub close_on_click_outside: bool,
    /// Suppresses the advisory diagnostics (missing label, no focusable element).
    pub silence_diagnostics: bool,
    /// Logs every Escape/click/Tab routing decision at debug level.
    pub trace_routing: bool,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            autofocus_attribute: DEFAULT_AUTOFOCUS_ATTRIBUTE.to_string(),
            close_on_click_outside: true,
            silence_diagnostics: false,
            trace_routing: false,
        }
    }
}

impl ModalConfig {
    pub fn from_env() -> Self {
        Self {
            autofocus_attribute: env_string_opt("MODAL_STACK_AUTOFOCUS_ATTR")
                .unwrap_or_else(|| DEFAULT_AUTOFOCUS_ATTRIBUTE.to_string()),
            close_on_click_outside: !env_is("MODAL_STACK_CLICK_OUTSIDE", "0"),
            silence_diagnostics: env_flag("MODAL_STACK_SILENCE_DIAGNOSTICS"),
            trace_routing: env_flag("MODAL_STACK_TRACE_ROUTING"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env_is(key, "1")
}

fn env_is(key: &str, expected: &str) -> bool {
    env::var(key).map(|value| value == expected).unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{ModalConfig, DEFAULT_AUTOFOCUS_ATTRIBUTE};
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_match_default_config() {
        let _lock = env_lock();
        let _g1 = set_env_guard("MODAL_STACK_AUTOFOCUS_ATTR", None);
        let _g2 = set_env_guard("MODAL_STACK_CLICK_OUTSIDE", None);
        let _g3 = set_env_guard("MODAL_STACK_SILENCE_DIAGNOSTICS", None);
        let _g4 = set_env_guard("MODAL_STACK_TRACE_ROUTING", None);

        let config = ModalConfig::from_env();
        assert_eq!(config, ModalConfig::default());
        assert_eq!(config.autofocus_attribute, DEFAULT_AUTOFOCUS_ATTRIBUTE);
        assert!(config.close_on_click_outside);
    }

    #[test]
    fn env_overrides_are_applied() {
        let _lock = env_lock();
        let _g1 = set_env_guard("MODAL_STACK_AUTOFOCUS_ATTR", Some("data-initial-focus"));
        let _g2 = set_env_guard("MODAL_STACK_CLICK_OUTSIDE", Some("0"));
        let _g3 = set_env_guard("MODAL_STACK_SILENCE_DIAGNOSTICS", Some("1"));
        let _g4 = set_env_guard("MODAL_STACK_TRACE_ROUTING", Some("1"));

        let config = ModalConfig::from_env();
        assert_eq!(config.autofocus_attribute, "data-initial-focus");
        assert!(!config.close_on_click_outside);
        assert!(config.silence_diagnostics);
        assert!(config.trace_routing);
    }

    #[test]
    fn blank_autofocus_attribute_falls_back_to_default() {
        let _lock = env_lock();
        let _g1 = set_env_guard("MODAL_STACK_AUTOFOCUS_ATTR", Some("   "));
        let _g2 = set_env_guard("MODAL_STACK_CLICK_OUTSIDE", Some("yes"));

        let config = ModalConfig::from_env();
        assert_eq!(config.autofocus_attribute, DEFAULT_AUTOFOCUS_ATTRIBUTE);
        assert!(config.close_on_click_outside);
    }
}
