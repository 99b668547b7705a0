//! `expand` sites — rendering a sorted index into nested ordered lists.

use crate::command::shape::decode_expand;
use crate::command::ParseCache;
use crate::types::{
    find_index, EntryData, Element, Index, Key, Locator, LocatorTarget, MainEntry, Node,
    Reference, Root, Subentry, COMMAND_ATTRIBUTE, ID_SEPARATOR,
};

/// Stable id segment for a key: the JSON array `[text, sortKey]`.
pub fn key_slug(key: &Key) -> String {
    serde_json::to_string(&(key.text(), key.effective_sort_key())).unwrap_or_default()
}

/// Element id of the entry at `path` within `index_id`.
pub fn entry_id<'a>(index_id: &str, path: impl IntoIterator<Item = &'a Key>) -> String {
    let mut id = index_id.to_string();
    for key in path {
        id.push_str(ID_SEPARATOR);
        id.push_str(&key_slug(key));
    }
    id
}

/// Link target for a locator anchor. Ids already qualified with a
/// document path are used as they are.
pub fn locator_href(anchor_id: &str) -> String {
    if anchor_id.contains('#') {
        anchor_id.to_string()
    } else {
        format!("#{}", anchor_id)
    }
}

/// Replace the children of every `expand` site in `tree`. Sites naming an
/// index that does not exist are emptied. Returns the number of sites.
pub fn expand_document(tree: &mut Root, indexes: &[Index], cache: &mut ParseCache) -> usize {
    let mut expanded = 0;
    for path in tree.select_with_attribute(COMMAND_ATTRIBUTE) {
        let Some(element) = tree.element_at_mut(&path) else {
            continue;
        };
        let Some(raw) = element.property(COMMAND_ATTRIBUTE) else {
            continue;
        };
        let command = match cache.get_or_parse(raw) {
            Ok(literal) => decode_expand(literal),
            Err(e) => {
                log::debug!("skipping unparsable command {:?}: {}", raw, e);
                continue;
            }
        };
        let Some(command) = command else {
            continue;
        };

        element.children = match find_index(indexes, &command.index_id) {
            Some(index) => vec![render_index(index).into()],
            None => {
                log::debug!("expand site names unknown index id={}", command.index_id);
                Vec::new()
            }
        };
        expanded += 1;
    }
    expanded
}

/// Render one index as `ol.index-groups`.
pub fn render_index(index: &Index) -> Element {
    let groups = index.groups.iter().map(|group| {
        let entries = group
            .entries
            .iter()
            .map(|main_entry| Node::from(render_main_entry(&index.id, &group.key, main_entry)));
        let li = Element::new("li")
            .with_class("index-group")
            .with_children(group.key.content.iter().cloned())
            .with_children([Node::from(
                Element::new("ol")
                    .with_class("index-main-entries")
                    .with_children(entries),
            )]);
        Node::from(li)
    });
    Element::new("ol")
        .with_class("index-groups")
        .with_children(groups)
}

fn render_main_entry(index_id: &str, group_key: &Key, main_entry: &MainEntry) -> Element {
    let mut li = Element::new("li")
        .with_class("index-main-entry")
        .with_property("id", entry_id(index_id, [group_key, &main_entry.key]))
        .with_children(main_entry.key.content.iter().cloned())
        .with_children(render_data(index_id, &main_entry.data, "index-main-entry"));
    if !main_entry.subentries.is_empty() {
        let subentries = main_entry.subentries.iter().map(|subentry| {
            Node::from(render_subentry(index_id, group_key, &main_entry.key, subentry))
        });
        li.children.push(
            Element::new("ol")
                .with_class("index-subentries")
                .with_children(subentries)
                .into(),
        );
    }
    li
}

fn render_subentry(index_id: &str, group_key: &Key, main_key: &Key, subentry: &Subentry) -> Element {
    Element::new("li")
        .with_class("index-subentry")
        .with_property("id", entry_id(index_id, [group_key, main_key, &subentry.key]))
        .with_children(subentry.key.content.iter().cloned())
        .with_children(render_data(index_id, &subentry.data, "index-subentry"))
}

/// Locator, see, and seeAlso lists; empty lists are omitted.
fn render_data(index_id: &str, data: &EntryData, prefix: &str) -> Vec<Node> {
    let mut lists: Vec<Node> = Vec::new();
    if !data.locators.is_empty() {
        lists.push(render_locators(&data.locators, &format!("{}-locators", prefix)).into());
    }
    if !data.see.is_empty() {
        lists.push(render_references(index_id, &data.see, &format!("{}-see", prefix)).into());
    }
    if !data.see_also.is_empty() {
        lists.push(
            render_references(index_id, &data.see_also, &format!("{}-see-also", prefix)).into(),
        );
    }
    lists
}

fn render_locators(locators: &[Locator], class: &str) -> Element {
    let items = locators.iter().map(|locator| {
        let mut li = Element::new("li");
        if locator.important {
            li = li.with_class("important");
        }
        let anchor = |id: &str| Node::from(Element::new("a").with_property("href", locator_href(id)));
        let li = match &locator.target {
            LocatorTarget::Page(id) => li.with_children([anchor(id.as_str())]),
            LocatorTarget::Range(start, end) => li.with_children([
                anchor(start.as_str()),
                Element::new("span")
                    .with_class(format!("{}-separator", class))
                    .into(),
                anchor(end.as_str()),
            ]),
        };
        Node::from(li)
    });
    Element::new("ol").with_class(class).with_children(items)
}

fn render_references(index_id: &str, references: &[Reference], class: &str) -> Element {
    let items = references.iter().map(|reference| {
        let path = &reference.path;
        let href = format!("#{}", entry_id(index_id, path.keys()));
        let link = Element::new("a").with_property("href", href);
        let link = match &path.sub {
            None => link.with_children(path.main.content.iter().cloned()),
            Some(sub) => link.with_children([
                Node::from(Element::new("span").with_children(path.main.content.iter().cloned())),
                Element::new("span")
                    .with_class(format!("{}-separator", class))
                    .into(),
                Element::new("span")
                    .with_children(sub.content.iter().cloned())
                    .into(),
            ]),
        };
        Node::from(Element::new("li").with_children([Node::from(link)]))
    });
    Element::new("ol").with_class(class).with_children(items)
}
