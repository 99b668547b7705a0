//! Sorting resolved indexes with configurable comparators.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{
    Group, Index, IndexSet, Key, Keyed, Locator, MainEntry, Reference, SequenceId, Subentry,
};

use super::collate::Collator;

/// Shared comparison function.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The nine comparators applied to one index.
#[derive(Clone)]
pub struct Comparators {
    pub group: Comparator<Group>,
    pub main_entry: Comparator<MainEntry>,
    pub main_entry_locator: Comparator<Locator>,
    pub main_entry_see: Comparator<Reference>,
    pub main_entry_see_also: Comparator<Reference>,
    pub subentry: Comparator<Subentry>,
    pub subentry_locator: Comparator<Locator>,
    pub subentry_see: Comparator<Reference>,
    pub subentry_see_also: Comparator<Reference>,
}

/// Comparators keyed by index id. Indexes without an entry keep their order.
pub type ComparatorMap = HashMap<String, Comparators>;

impl Comparators {
    /// Entries by collation; locators and references in insertion order.
    pub fn by_locale(collator: Collator) -> Self {
        Self {
            group: by_key(collator.clone()),
            main_entry: by_key(collator.clone()),
            main_entry_locator: by_listed_order(),
            main_entry_see: by_listed_order(),
            main_entry_see_also: by_listed_order(),
            subentry: by_key(collator),
            subentry_locator: by_listed_order(),
            subentry_see: by_listed_order(),
            subentry_see_also: by_listed_order(),
        }
    }

    /// Entries and references by collation; locators in insertion order.
    pub fn locale_everywhere(collator: Collator) -> Self {
        Self {
            main_entry_see: by_reference_path(collator.clone()),
            main_entry_see_also: by_reference_path(collator.clone()),
            subentry_see: by_reference_path(collator.clone()),
            subentry_see_also: by_reference_path(collator.clone()),
            ..Self::by_locale(collator)
        }
    }
}

/// Items stamped with an insertion sequence id.
pub trait Sequenced {
    fn seq(&self) -> &SequenceId;
}

impl Sequenced for Locator {
    fn seq(&self) -> &SequenceId {
        &self.seq
    }
}

impl Sequenced for Reference {
    fn seq(&self) -> &SequenceId {
        &self.seq
    }
}

/// Insertion order.
pub fn by_listed_order<T: Sequenced + 'static>() -> Comparator<T> {
    Arc::new(|a: &T, b: &T| a.seq().cmp(b.seq()))
}

/// Sort key by collation, then content text by the same collation.
pub fn compare_keys(collator: &Collator, a: &Key, b: &Key) -> Ordering {
    collator
        .compare(&a.effective_sort_key(), &b.effective_sort_key())
        .then_with(|| collator.compare(&a.text(), &b.text()))
}

pub fn by_key<T: Keyed + 'static>(collator: Collator) -> Comparator<T> {
    Arc::new(move |a: &T, b: &T| compare_keys(&collator, a.key(), b.key()))
}

/// Group key, then main key, then subentry key. A path that stops at the
/// main entry sorts before one that continues to a subentry.
pub fn by_reference_path(collator: Collator) -> Comparator<Reference> {
    Arc::new(move |a: &Reference, b: &Reference| {
        let (a, b) = (&a.path, &b.path);
        compare_keys(&collator, &a.group, &b.group)
            .then_with(|| compare_keys(&collator, &a.main, &b.main))
            .then_with(|| match (&a.sub, &b.sub) {
                (Some(x), Some(y)) => compare_keys(&collator, x, y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            })
    })
}

/// Sort every level of every configured index. The input is left untouched.
pub fn sort(indexes: &[Index], comparators: &ComparatorMap) -> IndexSet {
    indexes
        .iter()
        .map(|index| {
            let mut index = index.clone();
            if let Some(cmp) = comparators.get(&index.id) {
                sort_index(&mut index, cmp);
            }
            index
        })
        .collect()
}

fn sort_index(index: &mut Index, cmp: &Comparators) {
    index.groups.sort_by(|a, b| (cmp.group)(a, b));
    for group in &mut index.groups {
        group.entries.sort_by(|a, b| (cmp.main_entry)(a, b));
        for main_entry in &mut group.entries {
            main_entry
                .data
                .locators
                .sort_by(|a, b| (cmp.main_entry_locator)(a, b));
            main_entry.data.see.sort_by(|a, b| (cmp.main_entry_see)(a, b));
            main_entry
                .data
                .see_also
                .sort_by(|a, b| (cmp.main_entry_see_also)(a, b));
            main_entry.subentries.sort_by(|a, b| (cmp.subentry)(a, b));
            for subentry in &mut main_entry.subentries {
                subentry
                    .data
                    .locators
                    .sort_by(|a, b| (cmp.subentry_locator)(a, b));
                subentry.data.see.sort_by(|a, b| (cmp.subentry_see)(a, b));
                subentry
                    .data
                    .see_also
                    .sort_by(|a, b| (cmp.subentry_see_also)(a, b));
            }
        }
    }
}
