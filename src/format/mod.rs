//! JSON file I/O for content-tree documents.

pub mod reader;
pub mod writer;

pub use reader::DocumentReader;
pub use writer::DocumentWriter;
