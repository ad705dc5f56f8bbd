//! Compound selector matching for the in-memory document.
//!
//! Supported: `*`, `tag`, `#id`, `.class`, `[attr]`, `[attr=value]` (optionally quoted), and any
//! compound of those such as `button.primary[data-autofocus]`. Combinators are rejected.

use crate::core::document::{Document, NodeId};
use crate::error::DialogError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, DialogError> {
        let source = input.trim();
        let invalid = || DialogError::invalid_selector(source);
        if source.is_empty() {
            return Err(invalid());
        }

        let mut selector = Selector::default();
        let mut rest = source;
        if let Some(after) = rest.strip_prefix('*') {
            rest = after;
        } else {
            let (tag, after) = split_ident(rest);
            if !tag.is_empty() {
                selector.tag = Some(tag.to_ascii_lowercase());
                rest = after;
            }
        }

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            match marker {
                '#' | '.' => {
                    let (name, after) = split_ident(rest);
                    if name.is_empty() {
                        return Err(invalid());
                    }
                    if marker == '#' {
                        selector.id = Some(name.to_string());
                    } else {
                        selector.classes.push(name.to_string());
                    }
                    rest = after;
                }
                '[' => {
                    let close = rest.find(']').ok_or_else(invalid)?;
                    let body = &rest[..close];
                    rest = &rest[close + 1..];
                    let (name, value) = match body.split_once('=') {
                        Some((name, value)) => (name.trim(), Some(unquote(value.trim()))),
                        None => (body.trim(), None),
                    };
                    let (ident, trailing) = split_ident(name);
                    if ident.is_empty() || !trailing.is_empty() {
                        return Err(invalid());
                    }
                    selector
                        .attributes
                        .push((ident.to_ascii_lowercase(), value.map(str::to_string)));
                }
                _ => return Err(invalid()),
            }
        }

        Ok(selector)
    }

    pub fn matches<D: Document + ?Sized>(&self, document: &D, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if document.tag_name(node).as_deref() != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if document.attribute(node, "id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_list = document.attribute(node, "class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|class| class_list.split_whitespace().any(|candidate| candidate == class))
            {
                return false;
            }
        }
        self.attributes
            .iter()
            .all(|(name, expected)| match (document.attribute(node, name), expected) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
                (None, _) => false,
            })
    }
}

fn split_ident(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(input.len());
    input.split_at(end)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
