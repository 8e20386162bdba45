//! Fresh language writer.
//!
//! Walks a [`HoistedTree`] and writes one item per line with no indentation;
//! [`crate::reindent`] lays the result out afterwards. Element shapes:
//!
//! ```text
//! <include url="hero.xml"/>                      include "hero.fresh"
//! <const type="float" name="g">9.8</const>       const float g 9.8
//! <object class="Sprite" name="hero">…</object>  object Sprite hero { … }
//! <class name="Hero" extends="Actor">…</class>   class Hero extends Actor { … }
//! <children>…</children>                         children [ … ]
//! <keyframe t="3">…</keyframe>                   object keyframe { t "3" children [ … ] }
//! <child name="arm">…</child>                    object child "arm" { … }
//! <tween type="Linear"/>                         tween object Linear { }
//! <scale>2</scale>                               scale "2"
//! <scale/>                                       scale ""
//! ```

use std::io::{self, Write};

use fresh_core::{FreshResult, Node};

use crate::hoist::HoistedTree;
use crate::keyframe::KeyframeDescriptor;
use crate::schema::{expected_attr, ElementKind, DEFAULT_TWEEN_TYPE};

/// Written in place of a dissolved `<objects root="…">` wrapper. The
/// attribute has no Fresh language equivalent and needs a manual look.
const ROOT_ATTRIBUTE_NOTE: &str = "// TODO had root attribute:";

pub struct FreshWriter<W: Write> {
    out: W,
    heredoc_tag: String,
}

impl<W: Write> FreshWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_heredoc_tag(out, "EOF")
    }

    pub fn with_heredoc_tag(out: W, heredoc_tag: impl Into<String>) -> Self {
        Self {
            out,
            heredoc_tag: heredoc_tag.into(),
        }
    }

    pub fn write_document(&mut self, tree: &HoistedTree) -> FreshResult<()> {
        self.write_item(tree.root())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_item(&mut self, node: &Node) -> FreshResult<()> {
        self.write_comments(&node.comments)?;
        self.write_element(node)
    }

    fn write_comments(&mut self, comments: &[String]) -> io::Result<()> {
        for comment in comments {
            if comment.contains('\n') {
                writeln!(self.out, "/*{comment}*/")?;
            } else {
                writeln!(self.out, "//{comment}")?;
            }
        }
        Ok(())
    }

    fn write_element(&mut self, node: &Node) -> FreshResult<()> {
        let kind = ElementKind::classify(node);
        kind.warn_unknown_attributes(node);

        match kind {
            ElementKind::Wrapper => {
                if let Some(root) = node.attr("root") {
                    writeln!(self.out, "{ROOT_ATTRIBUTE_NOTE} root=\"{root}\"")?;
                }
                for child in &node.children {
                    self.write_item(child)?;
                }
            }
            ElementKind::Include => {
                let url = expected_attr(node, "url");
                writeln!(self.out, "include \"{}\"", include_path(url))?;
            }
            ElementKind::Const => {
                let ty = expected_attr(node, "type");
                let name = expected_attr(node, "name");
                let value = node.trimmed_text().unwrap_or_default();
                writeln!(self.out, "{}", words(&["const", ty, name, value]))?;
            }
            ElementKind::Object => {
                let class = expected_attr(node, "class");
                let name = node.attr("name").unwrap_or_default();
                self.write_block(&words(&["object", class, name]), node)?;
            }
            ElementKind::Class => {
                let name = expected_attr(node, "name");
                let base = expected_attr(node, "extends");
                self.write_block(&words(&["class", name, "extends", base]), node)?;
            }
            ElementKind::Array => self.write_array(&node.name, &node.children)?,
            ElementKind::Keyframe => self.write_keyframe(node)?,
            ElementKind::Child => {
                let name = expected_attr(node, "name");
                self.write_block(&format!("object child \"{name}\""), node)?;
            }
            ElementKind::Tween => {
                let ty = node.attr("type").unwrap_or(DEFAULT_TWEEN_TYPE);
                self.write_block(&format!("tween object {ty}"), node)?;
            }
            ElementKind::Property => self.write_property(node)?,
        }
        Ok(())
    }

    fn write_block(&mut self, header: &str, node: &Node) -> FreshResult<()> {
        if node.text.is_some() {
            tracing::warn!(element = %node.name, "ignoring text inside a block element");
        }
        writeln!(self.out, "{header} {{")?;
        for child in &node.children {
            self.write_item(child)?;
        }
        writeln!(self.out, "}}")?;
        Ok(())
    }

    fn write_array(&mut self, key: &str, items: &[Node]) -> FreshResult<()> {
        writeln!(self.out, "{key} [")?;
        for item in items {
            self.write_item(item)?;
        }
        writeln!(self.out, "]")?;
        Ok(())
    }

    fn write_keyframe(&mut self, node: &Node) -> FreshResult<()> {
        let descriptor = KeyframeDescriptor::from_node(node)?;

        writeln!(self.out, "object keyframe {{")?;
        for (key, value) in descriptor.properties() {
            self.write_string(key, value)?;
        }
        // Hoisting gives every keyframe with elements a leading children
        // array; a keyframe with only a descriptor still gets an empty one.
        if node.children.is_empty() && !descriptor.is_none() {
            self.write_array("children", &[])?;
        }
        for child in &node.children {
            self.write_item(child)?;
        }
        writeln!(self.out, "}}")?;
        Ok(())
    }

    fn write_property(&mut self, node: &Node) -> FreshResult<()> {
        let key = property_key(node);

        if node.children.is_empty() {
            match node.text.as_deref() {
                Some(text) => self.write_string(&key, text)?,
                None => writeln!(self.out, "{key} \"\"")?,
            }
            return Ok(());
        }

        if node.text.is_some() {
            tracing::warn!(element = %node.name, "ignoring text beside child elements");
        }

        let all_objects = node
            .children
            .iter()
            .all(|c| ElementKind::classify(c) == ElementKind::Object);

        match node.children.as_slice() {
            [object] if all_objects => {
                self.write_comments(&object.comments)?;
                write!(self.out, "{key} ")?;
                self.write_element(object)
            }
            objects if all_objects => self.write_array(&key, objects),
            members => {
                writeln!(self.out, "{key} {{")?;
                for member in members {
                    self.write_item(member)?;
                }
                writeln!(self.out, "}}")?;
                Ok(())
            }
        }
    }

    /// `key "value"`, or a here document when the value spans lines or
    /// contains a double quote.
    fn write_string(&mut self, key: &str, value: &str) -> io::Result<()> {
        if needs_heredoc(value) {
            let tag = heredoc_tag(&self.heredoc_tag, value);
            write!(self.out, "{key} << {tag}\n{value}{tag}\n")
        } else {
            writeln!(self.out, "{key} \"{value}\"")
        }
    }
}

/// Property name plus `@flag` markers for every attribute set to `true`.
fn property_key(node: &Node) -> String {
    let mut key = node.name.clone();
    for attribute in &node.attributes {
        if attribute.value == "true" {
            key.push_str(" @");
            key.push_str(&attribute.name);
        } else {
            tracing::warn!(
                element = %node.name,
                attribute = %attribute.name,
                value = %attribute.value,
                "property attributes must be \"true\"; ignoring"
            );
        }
    }
    key
}

/// Space-separated header words, skipping empty ones.
fn words(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Included markup files are converted alongside, so `.xml` becomes `.fresh`.
fn include_path(url: &str) -> String {
    match url.strip_suffix(".xml") {
        Some(stem) => format!("{stem}.fresh"),
        None => url.to_string(),
    }
}

fn needs_heredoc(value: &str) -> bool {
    value.contains(['"', '\n', '\r'])
}

/// First of `base`, `base1`, `base2`, … whose earliest occurrence in
/// `value` followed by the tag is the terminator itself. The loader reads
/// up to the first match, so a tag straddling the end of the body would cut
/// it short.
fn heredoc_tag(base: &str, value: &str) -> String {
    let mut tag = base.to_string();
    let mut n = 0;
    while format!("{value}{tag}").find(&tag) != Some(value.len()) {
        n += 1;
        tag = format!("{base}{n}");
    }
    tag
}

/// Render a hoisted tree as unindented Fresh language text.
pub fn to_fresh_string(tree: &HoistedTree, heredoc_tag: &str) -> FreshResult<String> {
    let mut writer = FreshWriter::with_heredoc_tag(Vec::new(), heredoc_tag);
    writer.write_document(tree)?;
    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
