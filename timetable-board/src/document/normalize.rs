//! Normalization of raw trees into generic keyed records.
//!
//! The timetable feeds encode everything as elements and attributes, with
//! optional sub-records omitted freely and stop events repeated under a
//! single parent. `HierNode` flattens that into one shape that consumers
//! pattern-match on:
//!
//! - child tags map to a single value, or to an ordered sequence once the
//!   tag repeats under the same parent (never collapsed),
//! - attributes live under `@`-prefixed keys so they cannot collide with
//!   child tags of the same name,
//! - text lives under [`TEXT_KEY`] when the element also has children or
//!   attributes, and otherwise becomes the whole value.

use super::tree::TreeNode;

/// Prefix marking attribute keys in a [`Mapping`].
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Key holding an element's text when it also has children or attributes.
pub const TEXT_KEY: &str = "#text";

/// A normalized document node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HierNode {
    /// No children, no attributes, no text.
    #[default]
    Empty,
    /// Bare text with no children or attributes.
    Text(String),
    /// Keyed children, attributes and text.
    Mapping(Mapping),
}

/// The value stored under one key of a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierValue {
    One(HierNode),
    Many(Vec<HierNode>),
}

impl HierValue {
    /// All nodes under this key, a lone value being a one-element slice.
    pub fn as_slice(&self) -> &[HierNode] {
        match self {
            HierValue::One(node) => std::slice::from_ref(node),
            HierValue::Many(nodes) => nodes,
        }
    }

    /// The first node under this key.
    pub fn first(&self) -> Option<&HierNode> {
        self.as_slice().first()
    }

    fn push(&mut self, node: HierNode) {
        match self {
            HierValue::Many(nodes) => nodes.push(node),
            HierValue::One(existing) => {
                let existing = std::mem::take(existing);
                *self = HierValue::Many(vec![existing, node]);
            }
        }
    }
}

/// Ordered key/value entries of a normalized element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    entries: Vec<(String, HierValue)>,
}

impl Mapping {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&HierValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Add a child value, promoting the key to a sequence if it repeats.
    fn append(&mut self, key: String, node: HierNode) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, value)) => value.push(node),
            None => self.entries.push((key, HierValue::One(node))),
        }
    }

    /// Set a value, replacing whatever the key held.
    fn set(&mut self, key: String, node: HierNode) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, value)) => *value = HierValue::One(node),
            None => self.entries.push((key, HierValue::One(node))),
        }
    }
}

impl HierNode {
    /// Look up a key. Non-mapping nodes have no keys.
    pub fn get(&self, key: &str) -> Option<&HierValue> {
        match self {
            HierNode::Mapping(mapping) => mapping.get(key),
            _ => None,
        }
    }

    /// The first child record with the given tag.
    pub fn child(&self, tag: &str) -> Option<&HierNode> {
        self.get(tag).and_then(HierValue::first)
    }

    /// All child records with the given tag, in source order.
    ///
    /// A lone child is returned as a one-element slice and a missing tag
    /// as an empty one, so callers treat "one" and "many" alike.
    pub fn children(&self, tag: &str) -> &[HierNode] {
        self.get(tag).map(HierValue::as_slice).unwrap_or(&[])
    }

    /// Raw attribute value, including an empty one.
    pub fn attr(&self, name: &str) -> Option<&str> {
        let key = format!("{ATTRIBUTE_PREFIX}{name}");
        match self.child(&key)? {
            HierNode::Text(value) => Some(value),
            HierNode::Empty => Some(""),
            HierNode::Mapping(_) => None,
        }
    }

    /// Attribute value, treating an empty value as absent.
    pub fn attr_present(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Text payload, whether bare or stored under [`TEXT_KEY`].
    pub fn text(&self) -> Option<&str> {
        match self {
            HierNode::Text(text) => Some(text),
            HierNode::Mapping(_) => match self.child(TEXT_KEY)? {
                HierNode::Text(text) => Some(text),
                _ => None,
            },
            HierNode::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, HierNode::Empty)
    }
}

/// Normalize a raw tree into a [`HierNode`].
///
/// # Examples
///
/// ```
/// use timetable_board::document::{HierNode, TreeNode, normalize};
///
/// let root = TreeNode::parse_xml(r#"<timetable><s id="1"/><s id="2"/></timetable>"#).unwrap();
/// let doc = normalize(&root);
///
/// let stops = doc.children("s");
/// assert_eq!(stops.len(), 2);
/// assert_eq!(stops[1].attr("id"), Some("2"));
/// ```
pub fn normalize(node: &TreeNode) -> HierNode {
    let text = node
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if node.children.is_empty() && node.attributes.is_empty() {
        return match text {
            Some(text) => HierNode::Text(text.to_string()),
            None => HierNode::Empty,
        };
    }

    let mut mapping = Mapping::default();

    for child in &node.children {
        mapping.append(child.tag.clone(), normalize(child));
    }

    for (name, value) in &node.attributes {
        mapping.set(
            format!("{ATTRIBUTE_PREFIX}{name}"),
            HierNode::Text(value.clone()),
        );
    }

    if let Some(text) = text {
        mapping.set(TEXT_KEY.to_string(), HierNode::Text(text.to_string()));
    }

    HierNode::Mapping(mapping)
}
