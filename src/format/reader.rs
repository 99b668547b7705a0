//! Reads JSON content-tree documents.

use std::io::Read;
use std::path::Path;

use crate::types::{IndexResult, Root};

/// Reader for content-tree documents stored as JSON.
pub struct DocumentReader;

impl DocumentReader {
    /// Read a document from a file.
    pub fn read_from_file(path: &Path) -> IndexResult<Root> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Read a document from any reader.
    pub fn read_from(reader: &mut impl Read) -> IndexResult<Root> {
        let root = serde_json::from_reader(reader)?;
        Ok(root)
    }

    /// Parse a document held in memory.
    pub fn read_from_str(data: &str) -> IndexResult<Root> {
        Ok(serde_json::from_str(data)?)
    }
}
