//! Document-level events delivered to the dialog runtime.

use std::fmt;

use crate::core::document::NodeId;

/// Key identity, normalized the way key ids are written (`"tab"`, `"escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other(String),
}

impl Key {
    fn from_name(name: &str) -> Self {
        match name {
            "tab" => Self::Tab,
            "escape" | "esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Tab => "tab",
            Self::Escape => "escape",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A keydown observed at the document level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn tab() -> Self {
        Self::new(Key::Tab)
    }

    pub fn shift_tab() -> Self {
        Self::new(Key::Tab).with_shift()
    }

    pub fn escape() -> Self {
        Self::new(Key::Escape)
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Parses key ids such as `"tab"`, `"shift+tab"`, `"ctrl+alt+x"`. Case-insensitive.
    pub fn parse(key_id: &str) -> Option<Self> {
        let normalized = key_id.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let mut parts: Vec<&str> = normalized.split('+').collect();
        let key_name = parts.pop().filter(|name| !name.is_empty())?;
        let mut modifiers = Modifiers::default();
        for part in parts {
            match part {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return None,
            }
        }

        Some(Self {
            key: Key::from_name(key_name),
            modifiers,
        })
    }

    pub fn is_tab(&self) -> bool {
        self.key == Key::Tab
    }

    pub fn is_escape(&self) -> bool {
        self.key == Key::Escape
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        } = self.modifiers;
        for (active, name) in [(ctrl, "ctrl"), (alt, "alt"), (shift, "shift"), (meta, "meta")] {
            if active {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(self.key.name())
    }
}

/// A pointer click, as seen by a capture-phase document listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub target: NodeId,
}

impl ClickEvent {
    pub fn on(target: NodeId) -> Self {
        Self { target }
    }
}
