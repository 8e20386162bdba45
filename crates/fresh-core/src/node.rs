//! The parsed markup tree.

use serde::Serialize;

use crate::error::FreshResult;

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One markup element.
///
/// Attribute names are unique within a node and keep their source order, as
/// do children. A node owns its children outright; there are no parent links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Direct text content. Whitespace-only text is stored as `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Comments found immediately before this element.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
            comments: Vec::new(),
        }
    }

    /// Builder-style attribute setter. Replaces an existing value of the same name.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text setter; whitespace-only text is dropped.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comments.push(comment.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The tree as pretty-printed JSON, field for field.
    pub fn to_json_pretty(&self) -> FreshResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Text with surrounding whitespace removed, if any is left.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup_keeps_order() {
        let node = Node::new("object")
            .with_attribute("class", "Sprite")
            .with_attribute("name", "hero");
        assert_eq!(node.attr("class"), Some("Sprite"));
        assert_eq!(node.attr("missing"), None);
        let names: Vec<_> = node.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["class", "name"]);
    }

    #[test]
    fn test_with_attribute_replaces_duplicate() {
        let node = Node::new("a").with_attribute("x", "1").with_attribute("x", "2");
        assert_eq!(node.attributes.len(), 1);
        assert_eq!(node.attr("x"), Some("2"));
    }

    #[test]
    fn test_whitespace_text_is_absent() {
        let node = Node::new("a").with_text("  \n\t ");
        assert!(node.text.is_none());
        assert!(!node.has_attributes() && !node.has_children());
    }

    #[test]
    fn test_trimmed_text() {
        let node = Node::new("a").with_text("  hi \n");
        assert_eq!(node.text.as_deref(), Some("  hi \n"));
        assert_eq!(node.trimmed_text(), Some("hi"));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let node = Node::new("scale").with_text("2");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "scale", "text": "2" }));
    }

    #[test]
    fn test_to_json_pretty() {
        let node = Node::new("a")
            .with_attribute("foo", "1")
            .with_child(Node::new("b").with_text("hi"));
        let dump = node.to_json_pretty().unwrap();
        assert!(dump.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
        assert_eq!(value["attributes"][0]["value"], "1");
        assert_eq!(value["children"][0]["text"], "hi");
    }
}
