//! See/seeAlso reference insertion.

use crate::tree::{ensure_entry, lookup_reference, normalize_entry_key};
use crate::types::{ensure_index, Element};

use super::{CommandContext, ReferenceCommand};

impl ReferenceCommand {
    /// The target is looked up after the source entry exists, so an entry
    /// may refer to itself or to a sibling created by the same command.
    pub(crate) fn run(&self, ctx: &mut CommandContext<'_>, anchor: &Element) {
        ensure_entry(ctx.indexes, &self.index_id, &self.entry_key, anchor);
        let requested = normalize_entry_key(&self.target, anchor);
        let path = lookup_reference(ensure_index(ctx.indexes, &self.index_id), &requested);
        let seq = ctx.sequence.next_id();
        ensure_entry(ctx.indexes, &self.index_id, &self.entry_key, anchor)
            .insert_reference(seq, self.kind, path);
    }
}
