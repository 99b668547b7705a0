//! Structural shape checks for command literals.
//!
//! Every `decode_*` function is pure: it inspects a literal and returns
//! the typed command it denotes, or `None`. The `is_*` predicates are
//! thin wrappers used by dispatch and tests.

use crate::types::{PartialEntryKey, PartialKey, ReferenceKind};

use super::literal::Literal;
use super::{
    ExpandCommand, PageCommand, RangeEndCommand, RangeStartCommand, ReferenceCommand,
};

/// `null | "text" | [null, "reading"] | ["text", "reading"]`
pub fn decode_partial_key(lit: &Literal) -> Option<PartialKey> {
    match lit {
        Literal::Null => Some(PartialKey::Anchor),
        Literal::Str(text) => Some(PartialKey::Text(text.clone())),
        Literal::Seq(items) => match items.as_slice() {
            [Literal::Null, Literal::Str(sort_key)] => Some(PartialKey::Reading(sort_key.clone())),
            [Literal::Str(text), Literal::Str(sort_key)] => Some(PartialKey::Explicit {
                text: text.clone(),
                sort_key: sort_key.clone(),
            }),
            _ => None,
        },
        Literal::Other => None,
    }
}

/// `[group, main]` or `[group, main, sub]`
pub fn decode_entry_key(lit: &Literal) -> Option<PartialEntryKey> {
    match lit.as_seq()? {
        [group, main] => Some(PartialEntryKey::main_entry(
            decode_partial_key(group)?,
            decode_partial_key(main)?,
        )),
        [group, main, sub] => Some(PartialEntryKey::subentry(
            decode_partial_key(group)?,
            decode_partial_key(main)?,
            decode_partial_key(sub)?,
        )),
        _ => None,
    }
}

/// `indexId, entryKey` or `"page!", indexId, entryKey`
pub fn decode_page(lit: &Literal) -> Option<PageCommand> {
    match lit.as_seq()? {
        [Literal::Str(index_id), entry_key] => Some(PageCommand {
            index_id: index_id.clone(),
            entry_key: decode_entry_key(entry_key)?,
            important: false,
        }),
        [Literal::Str(marker), Literal::Str(index_id), entry_key] if marker == "page!" => {
            Some(PageCommand {
                index_id: index_id.clone(),
                entry_key: decode_entry_key(entry_key)?,
                important: true,
            })
        }
        _ => None,
    }
}

/// `"range"|"range!", indexId, entryKey, rangeId`
pub fn decode_range_start(lit: &Literal) -> Option<RangeStartCommand> {
    match lit.as_seq()? {
        [Literal::Str(marker), Literal::Str(index_id), entry_key, Literal::Str(range_id)] => {
            let important = match marker.as_str() {
                "range" => false,
                "range!" => true,
                _ => return None,
            };
            Some(RangeStartCommand {
                index_id: index_id.clone(),
                entry_key: decode_entry_key(entry_key)?,
                range_id: range_id.clone(),
                important,
            })
        }
        _ => None,
    }
}

/// `"/range", rangeId`
pub fn decode_range_end(lit: &Literal) -> Option<RangeEndCommand> {
    match lit.as_seq()? {
        [Literal::Str(marker), Literal::Str(range_id)] if marker == "/range" => {
            Some(RangeEndCommand {
                range_id: range_id.clone(),
            })
        }
        _ => None,
    }
}

/// `"see"|"seeAlso", indexId, entryKey, targetEntryKey`
pub fn decode_reference(lit: &Literal) -> Option<ReferenceCommand> {
    match lit.as_seq()? {
        [Literal::Str(marker), Literal::Str(index_id), entry_key, target] => {
            Some(ReferenceCommand {
                kind: ReferenceKind::from_name(marker)?,
                index_id: index_id.clone(),
                entry_key: decode_entry_key(entry_key)?,
                target: decode_entry_key(target)?,
            })
        }
        _ => None,
    }
}

/// `"expand", indexId`
pub fn decode_expand(lit: &Literal) -> Option<ExpandCommand> {
    match lit.as_seq()? {
        [Literal::Str(marker), Literal::Str(index_id)] if marker == "expand" => {
            Some(ExpandCommand {
                index_id: index_id.clone(),
            })
        }
        _ => None,
    }
}

pub fn is_page(lit: &Literal) -> bool {
    decode_page(lit).is_some()
}

pub fn is_range_start(lit: &Literal) -> bool {
    decode_range_start(lit).is_some()
}

pub fn is_range_end(lit: &Literal) -> bool {
    decode_range_end(lit).is_some()
}

pub fn is_reference(lit: &Literal) -> bool {
    decode_reference(lit).is_some()
}

pub fn is_expand(lit: &Literal) -> bool {
    decode_expand(lit).is_some()
}
