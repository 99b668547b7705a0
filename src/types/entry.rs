//! The four-level entry tree: index, group, main entry, subentry.

use serde::{Deserialize, Serialize};

use super::key::Key;
use super::locator::{Locator, LocatorTarget, Reference, ReferenceKind, ReferencePath, SequenceId};

/// Locators and cross-references shared by main entries and subentries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryData {
    pub locators: Vec<Locator>,
    pub see: Vec<Reference>,
    #[serde(rename = "seeAlso")]
    pub see_also: Vec<Reference>,
}

impl EntryData {
    pub fn insert_locator(&mut self, seq: SequenceId, target: LocatorTarget, important: bool) {
        self.locators.push(Locator {
            seq,
            target,
            important,
        });
    }

    pub fn insert_reference(&mut self, seq: SequenceId, kind: ReferenceKind, path: ReferencePath) {
        self.references_mut(kind).push(Reference { seq, path });
    }

    pub fn references(&self, kind: ReferenceKind) -> &[Reference] {
        match kind {
            ReferenceKind::See => &self.see,
            ReferenceKind::SeeAlso => &self.see_also,
        }
    }

    pub fn references_mut(&mut self, kind: ReferenceKind) -> &mut Vec<Reference> {
        match kind {
            ReferenceKind::See => &mut self.see,
            ReferenceKind::SeeAlso => &mut self.see_also,
        }
    }

    /// Append another entry's lists, keeping each list in insertion order.
    pub fn absorb(&mut self, other: EntryData) {
        self.locators.extend(other.locators);
        self.see.extend(other.see);
        self.see_also.extend(other.see_also);
        self.locators.sort_by(|a, b| a.seq.cmp(&b.seq));
        self.see.sort_by(|a, b| a.seq.cmp(&b.seq));
        self.see_also.sort_by(|a, b| a.seq.cmp(&b.seq));
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty() && self.see.is_empty() && self.see_also.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subentry {
    pub key: Key,
    #[serde(flatten)]
    pub data: EntryData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainEntry {
    pub key: Key,
    #[serde(flatten)]
    pub data: EntryData,
    pub subentries: Vec<Subentry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub key: Key,
    pub entries: Vec<MainEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub id: String,
    pub groups: Vec<Group>,
}

/// All indexes built in one session.
pub type IndexSet = Vec<Index>;

/// A tree node identified by a key.
pub trait Keyed {
    fn key(&self) -> &Key;
    fn key_mut(&mut self) -> &mut Key;
    /// A fresh node with empty collections.
    fn with_key(key: Key) -> Self;
    /// Take over another node's mergeable fields.
    fn absorb(&mut self, other: Self);
}

/// A node owning an ordered list of keyed children.
pub trait Parent {
    type Child: Keyed;
    fn children(&self) -> &[Self::Child];
    fn children_mut(&mut self) -> &mut Vec<Self::Child>;

    /// First child addressed by `key`.
    fn get_child(&self, key: &Key) -> Option<&Self::Child> {
        self.children().iter().find(|c| key.addresses(c.key()))
    }

    /// First child addressed by `key`, created at the end if missing.
    fn ensure_child(&mut self, key: Key) -> &mut Self::Child {
        let children = self.children_mut();
        let pos = match children.iter().position(|c| key.addresses(c.key())) {
            Some(pos) => pos,
            None => {
                children.push(Self::Child::with_key(key));
                children.len() - 1
            }
        };
        &mut children[pos]
    }
}

impl Keyed for Subentry {
    fn key(&self) -> &Key {
        &self.key
    }
    fn key_mut(&mut self) -> &mut Key {
        &mut self.key
    }
    fn with_key(key: Key) -> Self {
        Self {
            key,
            data: EntryData::default(),
        }
    }
    fn absorb(&mut self, other: Self) {
        self.data.absorb(other.data);
    }
}

impl Keyed for MainEntry {
    fn key(&self) -> &Key {
        &self.key
    }
    fn key_mut(&mut self) -> &mut Key {
        &mut self.key
    }
    fn with_key(key: Key) -> Self {
        Self {
            key,
            data: EntryData::default(),
            subentries: Vec::new(),
        }
    }
    fn absorb(&mut self, other: Self) {
        self.data.absorb(other.data);
        self.subentries.extend(other.subentries);
    }
}

impl Keyed for Group {
    fn key(&self) -> &Key {
        &self.key
    }
    fn key_mut(&mut self) -> &mut Key {
        &mut self.key
    }
    fn with_key(key: Key) -> Self {
        Self {
            key,
            entries: Vec::new(),
        }
    }
    fn absorb(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl Parent for MainEntry {
    type Child = Subentry;
    fn children(&self) -> &[Subentry] {
        &self.subentries
    }
    fn children_mut(&mut self) -> &mut Vec<Subentry> {
        &mut self.subentries
    }
}

impl Parent for Group {
    type Child = MainEntry;
    fn children(&self) -> &[MainEntry] {
        &self.entries
    }
    fn children_mut(&mut self) -> &mut Vec<MainEntry> {
        &mut self.entries
    }
}

impl Parent for Index {
    type Child = Group;
    fn children(&self) -> &[Group] {
        &self.groups
    }
    fn children_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }
}

impl Index {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            groups: Vec::new(),
        }
    }

    /// Every reference in the index, main entries and subentries alike.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .flat_map(|m| {
                m.data
                    .see
                    .iter()
                    .chain(m.data.see_also.iter())
                    .chain(m.subentries.iter().flat_map(|s| s.data.see.iter().chain(s.data.see_also.iter())))
            })
    }

    /// Mutable counterpart of [`Index::references`], same order.
    pub fn references_mut(&mut self) -> impl Iterator<Item = &mut Reference> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.entries.iter_mut())
            .flat_map(|m| {
                let MainEntry {
                    data, subentries, ..
                } = m;
                data.see
                    .iter_mut()
                    .chain(data.see_also.iter_mut())
                    .chain(subentries.iter_mut().flat_map(|s| {
                        let EntryData { see, see_also, .. } = &mut s.data;
                        see.iter_mut().chain(see_also.iter_mut())
                    }))
            })
    }
}

/// Index with the given id, created at the end if missing.
pub fn ensure_index<'a>(indexes: &'a mut IndexSet, id: &str) -> &'a mut Index {
    let pos = match indexes.iter().position(|idx| idx.id == id) {
        Some(pos) => pos,
        None => {
            indexes.push(Index::new(id));
            indexes.len() - 1
        }
    };
    &mut indexes[pos]
}

/// Index with the given id.
pub fn find_index<'a>(indexes: &'a [Index], id: &str) -> Option<&'a Index> {
    indexes.iter().find(|idx| idx.id == id)
}
