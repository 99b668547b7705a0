//! Writes JSON content-tree documents.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::types::{IndexResult, Root};

/// Writer for content-tree documents and other JSON output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentWriter {
    pretty: bool,
}

impl DocumentWriter {
    /// Create a compact writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that indents its output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Write a document to a file, creating parent directories as needed.
    pub fn write_to_file(&self, tree: &Root, path: &Path) -> IndexResult<()> {
        self.write_value_to_file(tree, path)
    }

    /// Write a document to any writer.
    pub fn write_to(&self, tree: &Root, writer: &mut impl Write) -> IndexResult<()> {
        self.write_value(tree, writer)
    }

    /// Write any serializable value to a file.
    pub fn write_value_to_file<T: Serialize>(&self, value: &T, path: &Path) -> IndexResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_value(value, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write any serializable value to a writer.
    pub fn write_value<T: Serialize>(&self, value: &T, writer: &mut impl Write) -> IndexResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}
