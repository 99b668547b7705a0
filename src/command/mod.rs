//! Inline index commands — parsing, shape dispatch, and handlers.

pub mod literal;
pub mod page;
pub mod range;
pub mod reference;
pub mod shape;

pub use literal::{Literal, ParseCache};
pub use range::{OpenRange, RangeStore};

use crate::types::{
    Element, IndexResult, IndexSet, IndexWarning, PartialEntryKey, ReferenceKind, SequenceCounter,
};

/// Insert a page locator.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCommand {
    pub index_id: String,
    pub entry_key: PartialEntryKey,
    pub important: bool,
}

/// Open a range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeStartCommand {
    pub index_id: String,
    pub entry_key: PartialEntryKey,
    pub range_id: String,
    pub important: bool,
}

/// Close a range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEndCommand {
    pub range_id: String,
}

/// Insert a see/seeAlso reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCommand {
    pub kind: ReferenceKind,
    pub index_id: String,
    pub entry_key: PartialEntryKey,
    pub target: PartialEntryKey,
}

/// Render site for an index.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandCommand {
    pub index_id: String,
}

/// A recognized command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Page(PageCommand),
    RangeStart(RangeStartCommand),
    RangeEnd(RangeEndCommand),
    Reference(ReferenceCommand),
    Expand(ExpandCommand),
}

/// Command variants, each with a shape predicate and a decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Page,
    RangeStart,
    RangeEnd,
    Reference,
    Expand,
}

/// Priority order used while scanning content documents.
pub const SCAN_ORDER: [CommandKind; 4] = [
    CommandKind::Page,
    CommandKind::RangeStart,
    CommandKind::RangeEnd,
    CommandKind::Reference,
];

impl CommandKind {
    /// Whether `lit` has this command's shape.
    pub fn test(self, lit: &Literal) -> bool {
        match self {
            Self::Page => shape::is_page(lit),
            Self::RangeStart => shape::is_range_start(lit),
            Self::RangeEnd => shape::is_range_end(lit),
            Self::Reference => shape::is_reference(lit),
            Self::Expand => shape::is_expand(lit),
        }
    }

    pub fn decode(self, lit: &Literal) -> Option<Command> {
        match self {
            Self::Page => shape::decode_page(lit).map(Command::Page),
            Self::RangeStart => shape::decode_range_start(lit).map(Command::RangeStart),
            Self::RangeEnd => shape::decode_range_end(lit).map(Command::RangeEnd),
            Self::Reference => shape::decode_reference(lit).map(Command::Reference),
            Self::Expand => shape::decode_expand(lit).map(Command::Expand),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::RangeStart => "range",
            Self::RangeEnd => "/range",
            Self::Reference => "reference",
            Self::Expand => "expand",
        }
    }
}

/// Mutable state a command handler works against.
pub struct CommandContext<'a> {
    pub indexes: &'a mut IndexSet,
    pub ranges: &'a mut RangeStore,
    pub sequence: &'a mut SequenceCounter,
    pub warnings: &'a mut Vec<IndexWarning>,
}

impl CommandContext<'_> {
    pub(crate) fn warn(&mut self, warning: IndexWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

impl Command {
    /// First command in [`SCAN_ORDER`] whose shape accepts `lit`.
    pub fn recognize(lit: &Literal) -> Option<Command> {
        SCAN_ORDER
            .iter()
            .find(|kind| kind.test(lit))
            .and_then(|kind| kind.decode(lit))
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Page(_) => CommandKind::Page,
            Command::RangeStart(_) => CommandKind::RangeStart,
            Command::RangeEnd(_) => CommandKind::RangeEnd,
            Command::Reference(_) => CommandKind::Reference,
            Command::Expand(_) => CommandKind::Expand,
        }
    }

    /// Run against `ctx`. `anchor` is the element carrying the command;
    /// `ensure_id` assigns it an anchor id on demand.
    pub fn run(
        &self,
        ctx: &mut CommandContext<'_>,
        anchor: &Element,
        ensure_id: &mut dyn FnMut() -> IndexResult<String>,
    ) -> IndexResult<()> {
        match self {
            Command::Page(cmd) => cmd.run(ctx, anchor, ensure_id),
            Command::RangeStart(cmd) => cmd.run(ctx, anchor, ensure_id),
            Command::RangeEnd(cmd) => cmd.run(ctx, ensure_id),
            Command::Reference(cmd) => {
                cmd.run(ctx, anchor);
                Ok(())
            }
            // Expand sites are handled by the renderer.
            Command::Expand(_) => Ok(()),
        }
    }
}
