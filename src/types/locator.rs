//! Locators, references, and the insertion sequence that orders them.

use serde::{Deserialize, Serialize};

use super::key::Key;

/// Width of a formatted sequence id. Lexical order equals numeric order.
pub const SEQUENCE_WIDTH: usize = 16;

/// Fixed-width, lexically ordered insertion tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceId(String);

impl SequenceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Monotonic source of sequence ids, owned by the caller for one run.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    last: u64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after an externally known value.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> SequenceId {
        self.last += 1;
        SequenceId(format!("{:0width$}", self.last, width = SEQUENCE_WIDTH))
    }
}

/// Where a locator points: one anchor or a pair of anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatorTarget {
    Page(String),
    Range(String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locator {
    pub seq: SequenceId,
    pub target: LocatorTarget,
    pub important: bool,
}

/// `see` or `seeAlso`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    See,
    SeeAlso,
}

impl ReferenceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::See => "see",
            Self::SeeAlso => "seeAlso",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "see" => Some(Self::See),
            "seeAlso" => Some(Self::SeeAlso),
            _ => None,
        }
    }
}

/// Path of keys naming a target main entry or subentry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePath {
    pub group: Key,
    pub main: Key,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Key>,
}

impl ReferencePath {
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        [Some(&self.group), Some(&self.main), self.sub.as_ref()]
            .into_iter()
            .flatten()
    }

    pub fn keys_mut(&mut self) -> impl Iterator<Item = &mut Key> {
        [Some(&mut self.group), Some(&mut self.main), self.sub.as_mut()]
            .into_iter()
            .flatten()
    }
}

impl std::fmt::Display for ReferencePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .keys()
            .map(|k| format!("[{},{}]", k.text(), k.sort_key.as_deref().unwrap_or("null")))
            .collect();
        f.write_str(&parts.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub seq: SequenceId,
    pub path: ReferencePath,
}
