//! Document scanning — the engine's command-processing entry point.

use crate::command::{Command, CommandContext, CommandKind, ParseCache, RangeStore};
use crate::render::expand_document;
use crate::types::{
    Index, IndexError, IndexResult, IndexSet, IndexWarning, Root, SequenceCounter,
    COMMAND_ATTRIBUTE,
};

/// Counts from scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub pages: usize,
    pub range_starts: usize,
    pub range_ends: usize,
    pub references: usize,
    /// Well-formed literals that match no command shape.
    pub unrecognized: usize,
    pub parse_errors: usize,
}

impl ScanReport {
    fn record(&mut self, kind: CommandKind) {
        match kind {
            CommandKind::Page => self.pages += 1,
            CommandKind::RangeStart => self.range_starts += 1,
            CommandKind::RangeEnd => self.range_ends += 1,
            CommandKind::Reference => self.references += 1,
            CommandKind::Expand => {}
        }
    }

    /// Total recognized commands.
    pub fn commands(&self) -> usize {
        self.pages + self.range_starts + self.range_ends + self.references
    }

    /// Add another report's counts to this one.
    pub fn merge(&mut self, other: &ScanReport) {
        self.pages += other.pages;
        self.range_starts += other.range_starts;
        self.range_ends += other.range_ends;
        self.references += other.references;
        self.unrecognized += other.unrecognized;
        self.parse_errors += other.parse_errors;
    }
}

/// Run state for building indexes: the literal cache, the sequence
/// counter, and the warnings collected so far.
#[derive(Debug, Default)]
pub struct IndexEngine {
    cache: ParseCache,
    sequence: SequenceCounter,
    warnings: Vec<IndexWarning>,
}

impl IndexEngine {
    /// Create an engine with an empty cache and a fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine continuing an existing counter.
    pub fn with_sequence(sequence: SequenceCounter) -> Self {
        Self {
            sequence,
            ..Self::default()
        }
    }

    /// Scan `tree` for command-bearing elements and apply them to `indexes`.
    ///
    /// Anchor ids are written back onto elements that lacked one. With
    /// `rel_path`, locators read `rel_path#anchor`. Parse failures and
    /// unknown shapes skip the element; an anchor path failure aborts the
    /// document.
    pub fn process_document(
        &mut self,
        tree: &mut Root,
        indexes: &mut IndexSet,
        ranges: &mut RangeStore,
        rel_path: Option<&str>,
    ) -> IndexResult<ScanReport> {
        let mut report = ScanReport::default();

        for path in tree.select_with_attribute(COMMAND_ATTRIBUTE) {
            let element = tree
                .element_at(&path)
                .ok_or_else(|| IndexError::AnchorPath(path.clone()))?;
            let Some(raw) = element.property(COMMAND_ATTRIBUTE) else {
                continue;
            };
            let command = match self.cache.get_or_parse(raw) {
                // Expand sites belong to the render pass.
                Ok(literal) if CommandKind::Expand.test(literal) => continue,
                Ok(literal) => Command::recognize(literal),
                Err(e) => {
                    log::debug!("YAML error for {:?}: {}", raw, e);
                    let warning = IndexWarning::Parse(raw.to_string());
                    log::warn!("{}", warning);
                    self.warnings.push(warning);
                    report.parse_errors += 1;
                    continue;
                }
            };
            let Some(command) = command else {
                report.unrecognized += 1;
                continue;
            };
            let anchor = element.clone();

            let mut ensure = || -> IndexResult<String> {
                let id = ensure_id(tree, &path)?;
                Ok(match rel_path {
                    Some(rel) => format!("{}#{}", rel, id),
                    None => id,
                })
            };
            let mut ctx = CommandContext {
                indexes: &mut *indexes,
                ranges: &mut *ranges,
                sequence: &mut self.sequence,
                warnings: &mut self.warnings,
            };
            command.run(&mut ctx, &anchor, &mut ensure)?;
            report.record(command.kind());
        }

        log::debug!(
            "scanned {} commands ({} unrecognized, {} parse errors)",
            report.commands(),
            report.unrecognized,
            report.parse_errors
        );
        Ok(report)
    }

    /// Close out a session's range store, warning once per orphaned range.
    pub fn flush_range_store(&mut self, ranges: RangeStore) {
        self.warnings.extend(ranges.flush());
    }

    /// Replace every `expand` site in `tree` with its rendered index.
    pub fn expand(&mut self, tree: &mut Root, indexes: &[Index]) -> usize {
        expand_document(tree, indexes, &mut self.cache)
    }

    /// Record warnings produced outside the scan, e.g. by resolution.
    pub fn extend_warnings(&mut self, warnings: impl IntoIterator<Item = IndexWarning>) {
        self.warnings.extend(warnings);
    }

    pub fn warnings(&self) -> &[IndexWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<IndexWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }
}

/// Anchor id of the element at `path`, assigning its XPath as `id` when
/// it has none.
pub fn ensure_id(tree: &mut Root, path: &[usize]) -> IndexResult<String> {
    let existing = tree
        .element_at(path)
        .ok_or_else(|| IndexError::AnchorPath(path.to_vec()))?
        .property("id")
        .map(str::to_string);
    if let Some(id) = existing {
        return Ok(id);
    }

    let id = tree
        .xpath(path)
        .ok_or_else(|| IndexError::AnchorPath(path.to_vec()))?;
    tree.element_at_mut(path)
        .ok_or_else(|| IndexError::AnchorPath(path.to_vec()))?
        .set_property("id", id.clone());
    Ok(id)
}
