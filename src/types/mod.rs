//! All data types for the book-index library.

pub mod content;
pub mod entry;
pub mod error;
pub mod key;
pub mod locator;

pub use content::{nodes_to_text, Comment, Element, Node, Root, Text, COMMAND_ATTRIBUTE};
pub use entry::{
    ensure_index, find_index, EntryData, Group, Index, IndexSet, Keyed, MainEntry, Parent,
    Subentry,
};
pub use error::{IndexError, IndexResult, IndexWarning, ReferenceLevel};
pub use key::{Key, PartialEntryKey, PartialKey};
pub use locator::{
    Locator, LocatorTarget, Reference, ReferenceKind, ReferencePath, SequenceCounter, SequenceId,
    SEQUENCE_WIDTH,
};

/// Separator between path segments in rendered element ids.
pub const ID_SEPARATOR: &str = "--";

/// Returns the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
