//! Build pipeline — scan every entry document, then resolve, sort, expand.

use std::path::{Path, PathBuf};

use crate::command::RangeStore;
use crate::config::{relative_link, BuildConfig, IndexDocumentConfig};
use crate::format::DocumentReader;
use crate::types::{IndexResult, IndexSet, IndexWarning, Root};

use super::resolve::resolve_with_warnings;
use super::scan::{IndexEngine, ScanReport};
use super::sort::sort;

/// Result of building one index document.
#[derive(Debug)]
pub struct BuildOutput {
    /// The index document with its `expand` sites filled.
    pub document: Root,
    /// Every other entry document, keyed by its configured path, with
    /// anchor ids assigned to the elements its locators point at.
    pub entries: Vec<(PathBuf, Root)>,
    /// Resolved and sorted indexes.
    pub indexes: IndexSet,
    /// Command counts summed over every entry document.
    pub report: ScanReport,
    /// Number of `expand` sites replaced.
    pub expanded: usize,
    /// Every warning raised during the build, in order.
    pub warnings: Vec<IndexWarning>,
}

/// Scan the entries of `index`, resolve and sort the result, and expand the
/// index document.
///
/// Range starts and ends pair across entry documents. Locators into a
/// document other than the index document carry its relative link.
pub fn build_index(config: &BuildConfig, index: &IndexDocumentConfig) -> IndexResult<BuildOutput> {
    let index_path = config.document_path(&index.path);
    let mut engine = IndexEngine::new();
    let Scanned {
        indexes,
        report,
        index_doc,
        entries,
    } = scan_entries(&mut engine, config, &index.entries, &index_path)?;

    let (resolved, warnings) = resolve_with_warnings(&indexes);
    engine.extend_warnings(warnings);
    let sorted = sort(&resolved, &config.comparators());

    let mut document = match index_doc {
        Some(tree) => tree,
        None => DocumentReader::read_from_file(&index_path)?,
    };
    let expanded = engine.expand(&mut document, &sorted);
    log::info!(
        "built {}: {} command(s), {} expand site(s), {} warning(s)",
        index.path.display(),
        report.commands(),
        expanded,
        engine.warnings().len()
    );

    Ok(BuildOutput {
        document,
        entries,
        indexes: sorted,
        report,
        expanded,
        warnings: engine.take_warnings(),
    })
}

/// Resolved and sorted indexes for `index` without touching its document.
pub fn collect_indexes(
    config: &BuildConfig,
    index: &IndexDocumentConfig,
) -> IndexResult<(IndexSet, Vec<IndexWarning>)> {
    let index_path = config.document_path(&index.path);
    let mut engine = IndexEngine::new();
    let scanned = scan_entries(&mut engine, config, &index.entries, &index_path)?;
    let (resolved, warnings) = resolve_with_warnings(&scanned.indexes);
    engine.extend_warnings(warnings);
    Ok((sort(&resolved, &config.comparators()), engine.take_warnings()))
}

struct Scanned {
    indexes: IndexSet,
    report: ScanReport,
    index_doc: Option<Root>,
    entries: Vec<(PathBuf, Root)>,
}

/// Scan `entries` in order with one shared range store. The index document
/// is kept apart from the other annotated entry trees.
fn scan_entries(
    engine: &mut IndexEngine,
    config: &BuildConfig,
    entries: &[PathBuf],
    index_path: &Path,
) -> IndexResult<Scanned> {
    let mut indexes = IndexSet::new();
    let mut ranges = RangeStore::new();
    let mut report = ScanReport::default();
    let mut index_doc = None;
    let mut trees = Vec::with_capacity(entries.len());

    for entry in entries {
        let path = config.document_path(entry);
        let mut tree = DocumentReader::read_from_file(&path)?;
        let is_index_doc = path == index_path;
        let rel = (!is_index_doc)
            .then(|| relative_link(index_path, &path, &config.link_extension));

        log::debug!("scanning {}", path.display());
        let scanned = engine.process_document(&mut tree, &mut indexes, &mut ranges, rel.as_deref())?;
        report.merge(&scanned);

        if is_index_doc {
            index_doc = Some(tree);
        } else {
            trees.push((entry.clone(), tree));
        }
    }

    engine.flush_range_store(ranges);
    Ok(Scanned {
        indexes,
        report,
        index_doc,
        entries: trees,
    })
}
