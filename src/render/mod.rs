//! Rendering resolved indexes back into content-tree markup.

pub mod expand;

pub use expand::{entry_id, expand_document, key_slug, locator_href, render_index};
