//! Resolution — merging duplicate siblings and retargeting references.

use crate::types::{
    Index, IndexSet, IndexWarning, Key, Keyed, Parent, ReferenceLevel, ReferencePath,
};

/// Resolve a completed index set. The input is left untouched.
pub fn resolve(indexes: &[Index]) -> IndexSet {
    resolve_with_warnings(indexes).0
}

/// [`resolve`], also returning the broken-reference warnings it logged.
pub fn resolve_with_warnings(indexes: &[Index]) -> (IndexSet, Vec<IndexWarning>) {
    let mut warnings = Vec::new();
    let resolved = indexes
        .iter()
        .map(|index| {
            let mut index = index.clone();
            merge_children(&mut index);
            for group in &mut index.groups {
                merge_children(group);
                for main_entry in &mut group.entries {
                    merge_children(main_entry);
                }
            }
            retarget_references(&mut index, &mut warnings);
            index
        })
        .collect();
    (resolved, warnings)
}

/// Fold unresolved children into resolved siblings with the same text.
///
/// Unmatched unresolved children are promoted in place with a sort key
/// derived from their own text, after which later duplicates fold into
/// them as well.
pub fn merge_children<P: Parent>(parent: &mut P) {
    let children = std::mem::take(parent.children_mut());
    let (mut resolved, unresolved): (Vec<P::Child>, Vec<P::Child>) = children
        .into_iter()
        .partition(|child| child.key().is_resolved());

    for mut child in unresolved {
        let text = child.key().text();
        match resolved.iter().position(|r| r.key().text() == text) {
            Some(pos) => resolved[pos].absorb(child),
            None => {
                child.key_mut().materialize();
                resolved.push(child);
            }
        }
    }

    *parent.children_mut() = resolved;
}

/// Point every reference at the resolved keys of its target.
pub fn retarget_references(index: &mut Index, warnings: &mut Vec<IndexWarning>) {
    let retargeted: Vec<ReferencePath> = index
        .references()
        .map(|reference| retarget(index, &reference.path, warnings))
        .collect();
    for (reference, path) in index.references_mut().zip(retargeted) {
        reference.path = path;
    }
}

/// Resolve as many levels of `path` as exist; materialize the rest.
fn retarget(index: &Index, path: &ReferencePath, warnings: &mut Vec<IndexWarning>) -> ReferencePath {
    let mut path = path.clone();
    let mut broken = |level: ReferenceLevel, path: &ReferencePath| {
        let warning = IndexWarning::BrokenReference {
            index_id: index.id.clone(),
            level,
            path: path.to_string(),
        };
        log::warn!("{}", warning);
        warnings.push(warning);
    };

    let Some(group) = index.get_child(&path.group) else {
        broken(ReferenceLevel::Group, &path);
        path.keys_mut().for_each(Key::materialize);
        return path;
    };
    path.group.sort_key = group.key.sort_key.clone();

    let Some(main_entry) = group.get_child(&path.main) else {
        broken(ReferenceLevel::MainEntry, &path);
        path.main.materialize();
        if let Some(sub) = &mut path.sub {
            sub.materialize();
        }
        return path;
    };
    path.main.sort_key = main_entry.key.sort_key.clone();

    if let Some(sub_key) = &path.sub {
        match main_entry.get_child(sub_key) {
            Some(subentry) => {
                let sort_key = subentry.key.sort_key.clone();
                if let Some(sub) = &mut path.sub {
                    sub.sort_key = sort_key;
                }
            }
            None => {
                broken(ReferenceLevel::Subentry, &path);
                if let Some(sub) = &mut path.sub {
                    sub.materialize();
                }
            }
        }
    }
    path
}
