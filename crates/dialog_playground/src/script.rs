//! Script commands replayed by the playground.

use std::fmt;

use modal_stack::{DialogError, KeyEvent};
use thiserror::Error;

use crate::page::DialogKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("unknown command `{input}`")]
    UnknownCommand { input: String },

    #[error("no element with id `{id}` is on the page")]
    UnknownElement { id: String },

    #[error("mount container for {kind} is not on the page")]
    MissingContainer { kind: DialogKind },

    #[error(transparent)]
    Dialog(#[from] DialogError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Clicks the dialog's trigger button.
    Open(DialogKind),
    /// Tab, Shift+Tab or Escape.
    Key(KeyEvent),
    ClickOutside,
    Click(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, ScriptError> {
        let input = input.trim();
        if let Some(kind) = input
            .strip_prefix("open-")
            .and_then(|_| DialogKind::opened_by(input))
        {
            return Ok(Self::Open(kind));
        }
        if input == "click-outside" {
            return Ok(Self::ClickOutside);
        }
        if let Some(id) = input.strip_prefix("click:") {
            if !id.is_empty() {
                return Ok(Self::Click(id.to_string()));
            }
        }
        match KeyEvent::parse(input) {
            Some(event) if event.is_tab() || event.is_escape() => Ok(Self::Key(event)),
            _ => Err(ScriptError::UnknownCommand {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(kind) => f.write_str(kind.trigger_id()),
            Self::Key(event) => write!(f, "{event}"),
            Self::ClickOutside => f.write_str("click-outside"),
            Self::Click(id) => write!(f, "click:{id}"),
        }
    }
}

/// Parses one command per whitespace- or comma-separated word. `#` starts a comment.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ','))
        .filter(|word| !word.is_empty())
        .map(Command::parse)
        .collect()
}
