//! Entry identity — keys and the partial keys commands supply.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::content::{nodes_to_text, Element, Node};

/// Identity of a tree node: a content snapshot plus an optional sort key.
///
/// An absent `sort_key` marks the key unresolved; resolution later
/// derives it from the plain text of `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub content: Vec<Node>,
    pub sort_key: Option<String>,
}

impl Key {
    /// A resolved key whose content is a single text node.
    pub fn resolved(text: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            content: vec![Node::text(text)],
            sort_key: Some(sort_key.into()),
        }
    }

    /// An unresolved key whose content is a single text node.
    pub fn unresolved(text: impl Into<String>) -> Self {
        Self {
            content: vec![Node::text(text)],
            sort_key: None,
        }
    }

    /// Plain-text rendering of the content snapshot.
    pub fn text(&self) -> String {
        nodes_to_text(&self.content)
    }

    pub fn is_resolved(&self) -> bool {
        self.sort_key.is_some()
    }

    /// The sort key, or the content text while unresolved.
    pub fn effective_sort_key(&self) -> Cow<'_, str> {
        match &self.sort_key {
            Some(s) => Cow::Borrowed(s.as_str()),
            None => Cow::Owned(self.text()),
        }
    }

    /// Fill an absent sort key from the content text.
    pub fn materialize(&mut self) {
        if self.sort_key.is_none() {
            self.sort_key = Some(self.text());
        }
    }

    /// Whether a node keyed `candidate` is addressed by this key.
    ///
    /// Content text must be equal. An unresolved query matches any sort
    /// key; a resolved query only matches the same sort key.
    pub fn addresses(&self, candidate: &Key) -> bool {
        if self.text() != candidate.text() {
            return false;
        }
        match &self.sort_key {
            None => true,
            Some(s) => candidate.sort_key.as_deref() == Some(s.as_str()),
        }
    }
}

/// A key as written in a command, before the anchor fills the gaps.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartialKey {
    /// `null`: content is the anchor's own content.
    Anchor,
    /// `"text"`: explicit content, unresolved.
    Text(String),
    /// `[null, "reading"]`: anchor content with an explicit sort key.
    Reading(String),
    /// `["text", "reading"]`: fully explicit.
    Explicit { text: String, sort_key: String },
}

impl PartialKey {
    /// Normalize into a full key using `anchor` for omitted content.
    pub fn to_key(&self, anchor: &Element) -> Key {
        match self {
            PartialKey::Anchor => Key {
                content: anchor.children.clone(),
                sort_key: None,
            },
            PartialKey::Text(text) => Key::unresolved(text.clone()),
            PartialKey::Reading(sort_key) => Key {
                content: anchor.children.clone(),
                sort_key: Some(sort_key.clone()),
            },
            PartialKey::Explicit { text, sort_key } => Key::resolved(text.clone(), sort_key.clone()),
        }
    }
}

/// `[group, main]` or `[group, main, sub]` as written in a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartialEntryKey {
    pub group: PartialKey,
    pub main: PartialKey,
    pub sub: Option<PartialKey>,
}

impl PartialEntryKey {
    pub fn main_entry(group: PartialKey, main: PartialKey) -> Self {
        Self {
            group,
            main,
            sub: None,
        }
    }

    pub fn subentry(group: PartialKey, main: PartialKey, sub: PartialKey) -> Self {
        Self {
            group,
            main,
            sub: Some(sub),
        }
    }
}
