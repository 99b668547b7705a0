//! Page locator insertion.

use crate::tree::ensure_entry;
use crate::types::{Element, IndexResult, LocatorTarget};

use super::{CommandContext, PageCommand};

impl PageCommand {
    pub(crate) fn run(
        &self,
        ctx: &mut CommandContext<'_>,
        anchor: &Element,
        ensure_id: &mut dyn FnMut() -> IndexResult<String>,
    ) -> IndexResult<()> {
        let anchor_id = ensure_id()?;
        let seq = ctx.sequence.next_id();
        ensure_entry(ctx.indexes, &self.index_id, &self.entry_key, anchor).insert_locator(
            seq,
            LocatorTarget::Page(anchor_id),
            self.important,
        );
        Ok(())
    }
}
