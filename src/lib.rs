//! book-index — back-of-book index construction for content-tree documents.
//!
//! Manuscripts mark index terms with `data-index` attributes holding small
//! inline commands. Scanning collects them into per-index trees of groups,
//! main entries and subentries with page and range locators and see/seeAlso
//! references. Resolution merges duplicate entries, sorting orders every
//! level, and `expand` sites in the index document are rendered as nested
//! ordered lists.

#[cfg(feature = "cli")]
pub mod cli;
pub mod command;
pub mod config;
pub mod engine;
pub mod format;
pub mod render;
pub mod tree;
pub mod types;

// Re-export commonly used types at the crate root
pub use command::{Command, CommandKind, Literal, ParseCache, RangeStore};
pub use config::{BuildConfig, IndexDocumentConfig, ReferenceOrder, SortConfig};
pub use engine::{
    build_index, collect_indexes, resolve, resolve_with_warnings, sort, BuildOutput, Collator,
    ComparatorMap, Comparators, IndexEngine, ScanReport,
};
pub use format::{DocumentReader, DocumentWriter};
pub use render::{expand_document, render_index};
pub use tree::{ensure_entry, lookup_reference, normalize_entry_key};
pub use types::{
    Element, EntryData, Group, Index, IndexError, IndexResult, IndexSet, IndexWarning, Key,
    Locator, LocatorTarget, MainEntry, Node, PartialEntryKey, PartialKey, Reference,
    ReferenceKind, ReferencePath, Root, SequenceCounter, SequenceId, Subentry,
};
