//! Content tree model — the hast-shaped document the engine scans and expands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute carrying inline index commands.
pub const COMMAND_ATTRIBUTE: &str = "data-index";

/// Root of a content tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "root")]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A node below the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
    Doctype,
    Raw(Text),
}

/// An element with hast properties keyed by property name.
///
/// Values stay as JSON so non-string properties (`className` arrays,
/// booleans, numbers) survive a read/write cycle untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "tagName")]
    pub tag_name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&text.value),
            Node::Element(element) => element.write_text(out),
            Node::Comment(_) | Node::Doctype | Node::Raw(_) => {}
        }
    }
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a property (builder style).
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Append a class name to `className` (builder style).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = Value::String(class.into());
        match self.properties.get_mut("className") {
            Some(Value::Array(classes)) => classes.push(class),
            _ => {
                self.properties
                    .insert("className".to_string(), Value::Array(vec![class]));
            }
        }
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Append children (builder style).
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Read a string-valued property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)?.as_str()
    }

    /// Space-joined class list, read from `className` (array or string)
    /// or a raw `class` attribute.
    pub fn class_name(&self) -> Option<String> {
        let classes: Vec<&str> = match self
            .properties
            .get("className")
            .or_else(|| self.properties.get("class"))?
        {
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            Value::String(s) => s.split_whitespace().collect(),
            _ => Vec::new(),
        };
        if classes.is_empty() {
            None
        } else {
            Some(classes.join(" "))
        }
    }

    /// Plain-text rendering of this element's content.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        if self.tag_name == "br" {
            out.push('\n');
            return;
        }
        for child in &self.children {
            child.write_text(out);
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Plain-text rendering of a list of inline nodes.
pub fn nodes_to_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_text(&mut out);
    }
    out
}

impl Root {
    /// Create a root holding the given children.
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Element at a child-index path, if the path addresses an element.
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        let mut current = match self.children.get(*first)? {
            Node::Element(e) => e,
            _ => return None,
        };
        for &i in rest {
            current = match current.children.get(i)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Mutable element at a child-index path.
    pub fn element_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let mut current = match self.children.get_mut(*first)? {
            Node::Element(e) => e,
            _ => return None,
        };
        for &i in rest {
            current = match current.children.get_mut(i)? {
                Node::Element(e) => e,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Paths of every element carrying `name`, in document (pre-)order.
    pub fn select_with_attribute(&self, name: &str) -> Vec<Vec<usize>> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        collect_with_attribute(&self.children, name, &mut path, &mut found);
        found
    }

    /// Positional XPath of the element at `path`, e.g. `/html/body/span[2]`.
    pub fn xpath(&self, path: &[usize]) -> Option<String> {
        let mut out = String::new();
        let mut siblings = &self.children;
        for &i in path {
            let element = match siblings.get(i)? {
                Node::Element(e) => e,
                _ => return None,
            };
            let same_tag = |node: &Node| matches!(node, Node::Element(e) if e.tag_name == element.tag_name);
            out.push('/');
            out.push_str(&element.tag_name);
            if siblings.iter().filter(|n| same_tag(n)).count() > 1 {
                let position = siblings[..i].iter().filter(|n| same_tag(n)).count() + 1;
                out.push_str(&format!("[{}]", position));
            }
            siblings = &element.children;
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

fn collect_with_attribute(
    nodes: &[Node],
    name: &str,
    path: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) {
    for (i, node) in nodes.iter().enumerate() {
        if let Node::Element(element) = node {
            path.push(i);
            if element.properties.contains_key(name) {
                found.push(path.clone());
            }
            collect_with_attribute(&element.children, name, path, found);
            path.pop();
        }
    }
}
