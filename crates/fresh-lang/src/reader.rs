//! Markup reader: source text → [`Node`] tree.

use fresh_core::{Attribute, FreshError, FreshResult, Node};
use roxmltree::{Document, NodeType, ParsingOptions};

/// Parse a markup document into its root [`Node`].
///
/// `file` is only used to label parse errors. Malformed markup fails as a
/// whole; no partial tree is returned.
pub fn parse_document(source: &str, file: &str) -> FreshResult<Node> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(source, options).map_err(|e| {
        let pos = e.pos();
        FreshError::parse(e.to_string(), file, pos.row as usize, pos.col as usize)
    })?;

    // Comments ahead of the root element belong to it.
    let leading: Vec<String> = document
        .root()
        .children()
        .take_while(|n| !n.is_element())
        .filter(|n| n.is_comment())
        .filter_map(|n| n.text().map(str::to_string))
        .collect();

    let root = build_node(document.root_element(), leading);
    tracing::debug!(file, root = %root.name, "parsed markup document");
    Ok(root)
}

fn build_node(element: roxmltree::Node<'_, '_>, comments: Vec<String>) -> Node {
    let tag = element.tag_name();
    let mut node = Node::new(qualified_name(element, tag.namespace(), tag.name()));
    node.comments = comments;
    node.attributes = element
        .attributes()
        .map(|a| Attribute::new(qualified_name(element, a.namespace(), a.name()), a.value()))
        .collect();

    let mut text = String::new();
    let mut pending = Vec::new();
    for child in element.children() {
        match child.node_type() {
            NodeType::Element => {
                let comments = std::mem::take(&mut pending);
                node.children.push(build_node(child, comments));
            }
            NodeType::Text => text.push_str(child.text().unwrap_or_default()),
            NodeType::Comment => {
                if let Some(comment) = child.text() {
                    pending.push(comment.to_string());
                }
            }
            NodeType::Root | NodeType::PI => {}
        }
    }

    if !pending.is_empty() {
        tracing::debug!(
            element = %node.name,
            count = pending.len(),
            "dropping comments with no following element"
        );
    }
    if !text.trim().is_empty() {
        node.text = Some(text);
    }
    node
}

/// `prefix:local` for names in a prefixed namespace, else `local`. Default
/// namespaces carry no prefix, so their names stay bare.
fn qualified_name(element: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| element.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
