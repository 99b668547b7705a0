//! Entry tree construction — turning partial keys into concrete nodes.

pub mod builder;

pub use builder::{ensure_entry, lookup_reference, normalize_entry_key};
