//! Raw hierarchical documents as delivered by the upstream feeds.
//!
//! A `TreeNode` is a plain labeled tree: a tag, attributes in document
//! order, element children in document order, and an optional text payload.
//! It carries no knowledge of the timetable schema.

use std::fmt;

/// Error returned when a feed body is not a well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed document: {message}")]
pub struct DocumentError {
    message: String,
}

/// A raw document node.
#[derive(Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Element tag name (namespace prefix stripped).
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Element children in document order.
    pub children: Vec<TreeNode>,
    /// Text directly inside this element, before its first child.
    pub text: Option<String>,
}

impl TreeNode {
    /// Create an empty node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Parse an XML body into a tree rooted at the document element.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_board::document::TreeNode;
    ///
    /// let root = TreeNode::parse_xml(r#"<timetable station="Berlin Hbf"><s id="1"/></timetable>"#).unwrap();
    /// assert_eq!(root.tag, "timetable");
    /// assert_eq!(root.children.len(), 1);
    /// assert_eq!(root.children[0].attributes[0], ("id".to_string(), "1".to_string()));
    /// ```
    pub fn parse_xml(xml: &str) -> Result<Self, DocumentError> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| DocumentError {
            message: e.to_string(),
        })?;
        Ok(from_xml_node(doc.root_element()))
    }
}

fn from_xml_node(node: roxmltree::Node<'_, '_>) -> TreeNode {
    TreeNode {
        tag: node.tag_name().name().to_string(),
        attributes: node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect(),
        children: node
            .children()
            .filter(|c| c.is_element())
            .map(from_xml_node)
            .collect(),
        text: node.text().map(str::to_string),
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TreeNode");
        s.field("tag", &self.tag);
        if !self.attributes.is_empty() {
            s.field("attributes", &self.attributes);
        }
        if !self.children.is_empty() {
            s.field("children", &self.children);
        }
        if let Some(text) = &self.text {
            s.field("text", text);
        }
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_nested_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <timetable station="Frankfurt(Main)Hbf">
                <s id="-123-2412061532-5">
                    <tl c="ICE" n="123" o="80" f="F"/>
                    <dp pt="2412061532" pp="7" ppth="Mannheim Hbf|Stuttgart Hbf"/>
                </s>
            </timetable>"#;

        let root = TreeNode::parse_xml(xml).unwrap();

        assert_eq!(root.tag, "timetable");
        assert_eq!(
            root.attributes,
            vec![("station".to_string(), "Frankfurt(Main)Hbf".to_string())]
        );

        let stop = &root.children[0];
        assert_eq!(stop.tag, "s");
        assert_eq!(stop.children.len(), 2);
        assert_eq!(stop.children[0].tag, "tl");
        assert_eq!(stop.children[1].attributes[0].1, "2412061532");
    }

    #[test]
    fn text_is_captured() {
        let root = TreeNode::parse_xml("<a><b>hello</b></a>").unwrap();
        assert_eq!(root.children[0].text.as_deref(), Some("hello"));
    }

    #[test]
    fn attribute_order_preserved() {
        let root = TreeNode::parse_xml(r#"<e z="1" a="2" m="3"/>"#).unwrap();
        let names: Vec<&str> = root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = TreeNode::parse_xml("<timetable><s></timetable>").unwrap_err();
        assert!(err.to_string().starts_with("malformed document"));

        assert!(TreeNode::parse_xml("").is_err());
        assert!(TreeNode::parse_xml("not xml").is_err());
    }

    #[test]
    fn builder_matches_parsed() {
        let built = TreeNode::new("s")
            .with_attr("id", "1")
            .with_child(TreeNode::new("tl").with_attr("c", "S"));
        let parsed = TreeNode::parse_xml(r#"<s id="1"><tl c="S"/></s>"#).unwrap();

        assert_eq!(built, parsed);
    }
}
