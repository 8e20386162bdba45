//! Element knowledge shared by the JSON and Fresh language writers.

use fresh_core::Node;

/// Element names that always serialize as an ordered sequence.
pub const ARRAY_CATEGORY: [&str; 3] = ["objects", "children", "passthrough"];

/// Name of the array that holds a keyframe's animated elements.
pub const CHILDREN_ARRAY: &str = "children";

/// Tween type used when a `<tween>` element omits `type`.
pub const DEFAULT_TWEEN_TYPE: &str = "QuadEaseInOut";

pub fn is_array_category(name: &str) -> bool {
    ARRAY_CATEGORY.contains(&name)
}

/// What an element means to the Fresh language writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<objects>`: the top-level list wrapper, dissolved on output.
    Wrapper,
    Include,
    Const,
    Object,
    Class,
    /// `<children>` and `<passthrough>`.
    Array,
    Keyframe,
    Child,
    Tween,
    /// Anything else: a named property of the enclosing element.
    Property,
}

impl ElementKind {
    pub fn classify(node: &Node) -> Self {
        match node.name.as_str() {
            "objects" => ElementKind::Wrapper,
            "include" => ElementKind::Include,
            "const" => ElementKind::Const,
            "object" => ElementKind::Object,
            "class" => ElementKind::Class,
            "children" | "passthrough" => ElementKind::Array,
            "keyframe" => ElementKind::Keyframe,
            "child" => ElementKind::Child,
            "tween" => ElementKind::Tween,
            _ => ElementKind::Property,
        }
    }

    /// Attributes the writer understands for this kind.
    pub fn known_attributes(self) -> &'static [&'static str] {
        match self {
            ElementKind::Wrapper => &["root"],
            ElementKind::Include => &["url"],
            ElementKind::Const => &["type", "name"],
            ElementKind::Object => &["class", "name"],
            ElementKind::Class => &["name", "extends"],
            ElementKind::Child => &["name"],
            ElementKind::Tween => &["type"],
            ElementKind::Array | ElementKind::Keyframe | ElementKind::Property => &[],
        }
    }

    /// Log every attribute on `node` this kind does not understand.
    ///
    /// Properties accept arbitrary flag attributes and keyframes validate
    /// their own, so neither is checked here.
    pub fn warn_unknown_attributes(self, node: &Node) {
        if matches!(self, ElementKind::Keyframe | ElementKind::Property) {
            return;
        }
        let known = self.known_attributes();
        for attribute in &node.attributes {
            if !known.contains(&attribute.name.as_str()) {
                tracing::warn!(
                    element = %node.name,
                    attribute = %attribute.name,
                    "ignoring unsupported attribute"
                );
            }
        }
    }
}

/// Fetch an attribute the element's output shape is built from.
///
/// A missing one is logged and read as empty, so the element is still
/// written, just without that field.
pub fn expected_attr<'a>(node: &'a Node, attribute: &str) -> &'a str {
    match node.attr(attribute) {
        Some(value) => value,
        None => {
            tracing::warn!(element = %node.name, attribute, "missing expected attribute");
            ""
        }
    }
}
