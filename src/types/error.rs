//! Error and warning types for the book-index library.

use thiserror::Error;

/// Fatal errors. Anything here aborts the current document or run.
#[derive(Error, Debug)]
pub enum IndexError {
    /// No positional path could be computed for a command-bearing element.
    #[error("Cannot compute anchor path for element at {0:?}; the path routine is broken")]
    AnchorPath(Vec<usize>),

    /// Config references a document it does not list.
    #[error("Index document not found in config: {0}")]
    UnknownDocument(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content tree is not valid JSON or not hast-shaped.
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed.
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience result type for book-index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Level of a reference path at which a lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceLevel {
    Group,
    MainEntry,
    Subentry,
}

impl std::fmt::Display for ReferenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Group => "group",
            Self::MainEntry => "main entry",
            Self::Subentry => "subentry",
        };
        f.write_str(name)
    }
}

/// Recovered problems. Each one is logged and processing continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexWarning {
    /// The command attribute is not a valid inline literal.
    #[error("parse error: {0}")]
    Parse(String),

    /// A `/range` arrived with no open range of that id.
    #[error("range end found for id={0} but no matching start marker exists")]
    UnmatchedRangeEnd(String),

    /// A range was still open when the store was flushed.
    #[error("range start found for id={0} but no matching end marker exists")]
    UnclosedRange(String),

    /// A second start for an open range id discarded the first one.
    #[error("range start for id={0} replaces a start that was never closed")]
    ReplacedRangeStart(String),

    /// A see/seeAlso target is missing from the index.
    #[error("index id={index_id} does not contain {level} {path}. link will likely be invalid.")]
    BrokenReference {
        index_id: String,
        level: ReferenceLevel,
        path: String,
    },
}
