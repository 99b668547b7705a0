//! Index construction passes — scanning, resolution, collation, sorting.

pub mod build;
pub mod collate;
pub mod resolve;
pub mod scan;
pub mod sort;

pub use build::{build_index, collect_indexes, BuildOutput};
pub use collate::Collator;
pub use resolve::{merge_children, resolve, resolve_with_warnings, retarget_references};
pub use scan::{ensure_id, IndexEngine, ScanReport};
pub use sort::{
    by_key, by_listed_order, by_reference_path, compare_keys, sort, Comparator, ComparatorMap,
    Comparators, Sequenced,
};
