//! Range locators — pairing start and end markers across a document set.

use indexmap::IndexMap;

use crate::tree::ensure_entry;
use crate::types::{Element, IndexResult, IndexWarning, LocatorTarget, PartialEntryKey};

use super::{CommandContext, RangeEndCommand, RangeStartCommand};

/// Snapshot taken when a range opens.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRange {
    pub index_id: String,
    pub entry_key: PartialEntryKey,
    pub important: bool,
    pub anchor_id: String,
    /// The start element as it was when the range opened. Content
    /// fallback for the entry key uses this, not the end element.
    pub anchor: Element,
}

/// Open ranges of one processing session, in the order they were opened.
#[derive(Debug, Default)]
pub struct RangeStore {
    open: IndexMap<String, OpenRange>,
}

impl RangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an open range, returning any start it displaced.
    pub fn open(&mut self, range_id: impl Into<String>, start: OpenRange) -> Option<OpenRange> {
        let range_id = range_id.into();
        // Re-opening moves the id to the end so flush order follows the latest start.
        let displaced = self.open.shift_remove(&range_id);
        self.open.insert(range_id, start);
        displaced
    }

    /// Remove and return the open range with this id.
    pub fn take(&mut self, range_id: &str) -> Option<OpenRange> {
        self.open.shift_remove(range_id)
    }

    pub fn is_open(&self, range_id: &str) -> bool {
        self.open.contains_key(range_id)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Close out the session. Every range still open is discarded with
    /// one warning per id; no locator is inserted for it.
    pub fn flush(self) -> Vec<IndexWarning> {
        self.open
            .into_keys()
            .map(|range_id| {
                let warning = IndexWarning::UnclosedRange(range_id);
                log::warn!("{}", warning);
                warning
            })
            .collect()
    }
}

impl RangeStartCommand {
    pub(crate) fn run(
        &self,
        ctx: &mut CommandContext<'_>,
        anchor: &Element,
        ensure_id: &mut dyn FnMut() -> IndexResult<String>,
    ) -> IndexResult<()> {
        let start = OpenRange {
            index_id: self.index_id.clone(),
            entry_key: self.entry_key.clone(),
            important: self.important,
            anchor_id: ensure_id()?,
            anchor: anchor.clone(),
        };
        if ctx.ranges.open(&self.range_id, start).is_some() {
            ctx.warn(IndexWarning::ReplacedRangeStart(self.range_id.clone()));
        }
        Ok(())
    }
}

impl RangeEndCommand {
    pub(crate) fn run(
        &self,
        ctx: &mut CommandContext<'_>,
        ensure_id: &mut dyn FnMut() -> IndexResult<String>,
    ) -> IndexResult<()> {
        let Some(start) = ctx.ranges.take(&self.range_id) else {
            ctx.warn(IndexWarning::UnmatchedRangeEnd(self.range_id.clone()));
            return Ok(());
        };
        let OpenRange {
            index_id,
            entry_key,
            important,
            anchor_id,
            anchor,
        } = start;
        let end_id = ensure_id()?;
        let seq = ctx.sequence.next_id();
        ensure_entry(ctx.indexes, &index_id, &entry_key, &anchor).insert_locator(
            seq,
            LocatorTarget::Range(anchor_id, end_id),
            important,
        );
        Ok(())
    }
}
