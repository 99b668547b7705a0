//! Ensure/lookup operations over the entry tree.

use crate::types::{
    ensure_index, Element, EntryData, Index, IndexSet, Parent, PartialEntryKey, ReferencePath,
};

/// Normalize every component of `entry_key` against `anchor`.
pub fn normalize_entry_key(entry_key: &PartialEntryKey, anchor: &Element) -> ReferencePath {
    ReferencePath {
        group: entry_key.group.to_key(anchor),
        main: entry_key.main.to_key(anchor),
        sub: entry_key.sub.as_ref().map(|k| k.to_key(anchor)),
    }
}

/// The main entry or subentry named by `entry_key`, created on demand.
///
/// Missing index, group, main entry, and subentry nodes are created with
/// empty collections. Two calls whose keys normalize to equal keys return
/// the same node.
pub fn ensure_entry<'a>(
    indexes: &'a mut IndexSet,
    index_id: &str,
    entry_key: &PartialEntryKey,
    anchor: &Element,
) -> &'a mut EntryData {
    let ReferencePath { group, main, sub } = normalize_entry_key(entry_key, anchor);
    let index = ensure_index(indexes, index_id);
    let main_entry = index.ensure_child(group).ensure_child(main);
    match sub {
        Some(sub) => &mut main_entry.ensure_child(sub).data,
        None => &mut main_entry.data,
    }
}

/// Copy the keys of every level of `path` that exists in `index`.
///
/// The lookup stops at the first missing level; deeper components keep
/// the keys they came with.
pub fn lookup_reference(index: &Index, path: &ReferencePath) -> ReferencePath {
    let mut found = path.clone();
    let Some(group) = index.get_child(&path.group) else {
        return found;
    };
    found.group = group.key.clone();
    let Some(main_entry) = group.get_child(&path.main) else {
        return found;
    };
    found.main = main_entry.key.clone();
    if let Some(sub_key) = &path.sub {
        if let Some(subentry) = main_entry.get_child(sub_key) {
            found.sub = Some(subentry.key.clone());
        }
    }
    found
}

