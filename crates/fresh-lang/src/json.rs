//! JSON writer for markup trees.
//!
//! Array-category elements become JSON arrays. Any other element with
//! attributes or element children becomes an object whose `"@node"` field
//! names the element, followed by one `".attr"` field per attribute, one field
//! per child element and a trailing `"value"` for non-blank text. Bare
//! elements become strings.
//!
//! Only `"` is escaped. Backslashes and control characters in text pass
//! through untouched, which matches what the engine's loader expects.

use std::borrow::Cow;
use std::io::{self, Write};

use fresh_core::{FreshResult, Node};

use crate::schema::is_array_category;

pub struct JsonWriter<W: Write> {
    out: W,
    indent: String,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_indent(out, "\t")
    }

    pub fn with_indent(out: W, indent: impl Into<String>) -> Self {
        Self {
            out,
            indent: indent.into(),
        }
    }

    /// Write `root` followed by a newline, then flush the sink.
    pub fn write_document(&mut self, root: &Node) -> FreshResult<()> {
        self.write_value(root, 0)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_indent(&mut self, depth: usize) -> io::Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }

    fn write_value(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        if is_array_category(&node.name) {
            self.write_comments(node, depth)?;
            self.write_array(node, depth)
        } else if node.has_attributes() || node.has_children() {
            self.write_comments(node, depth)?;
            self.write_object(node, depth)
        } else {
            let text = node.text.as_deref().unwrap_or_default();
            write!(self.out, "\"{}\"", escape_string(text))
        }
    }

    /// Leading comments go right before the opening bracket.
    fn write_comments(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        for comment in &node.comments {
            if comment.contains('\n') {
                write!(self.out, "/*{comment}*/")?;
            } else {
                write!(self.out, "//{comment}")?;
            }
            writeln!(self.out)?;
            self.write_indent(depth)?;
        }
        Ok(())
    }

    fn write_array(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        if node.has_attributes() {
            tracing::debug!(element = %node.name, "attributes on array elements are not serialized");
        }
        if node.children.is_empty() {
            return write!(self.out, "[]");
        }

        write!(self.out, "[")?;
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                write!(self.out, ",")?;
            }
            writeln!(self.out)?;
            self.write_indent(depth + 1)?;
            self.write_value(child, depth + 1)?;
        }
        writeln!(self.out)?;
        self.write_indent(depth)?;
        write!(self.out, "]")
    }

    fn write_object(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        writeln!(self.out, "{{")?;
        self.write_indent(depth + 1)?;
        write!(self.out, "\"@node\" : \"{}\"", escape_string(&node.name))?;

        for attribute in &node.attributes {
            writeln!(self.out, ",")?;
            self.write_indent(depth + 1)?;
            write!(
                self.out,
                "\".{}\" : \"{}\"",
                attribute.name,
                escape_string(&attribute.value)
            )?;
        }

        for child in &node.children {
            writeln!(self.out, ",")?;
            self.write_indent(depth + 1)?;
            write!(self.out, "\"{}\" : ", child.name)?;
            self.write_value(child, depth + 1)?;
        }

        if let Some(text) = node.trimmed_text() {
            writeln!(self.out, ",")?;
            self.write_indent(depth + 1)?;
            write!(self.out, "\"value\" : \"{}\"", escape_string(text))?;
        }

        writeln!(self.out)?;
        self.write_indent(depth)?;
        write!(self.out, "}}")
    }
}

/// Escape double quotes with a backslash. Nothing else is escaped.
pub fn escape_string(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "\\\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render `root` as a JSON document string.
pub fn to_json_string(root: &Node, indent: &str) -> FreshResult<String> {
    let mut writer = JsonWriter::with_indent(Vec::new(), indent);
    writer.write_document(root)?;
    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_document;
    use serde_json::Value;

    fn json(src: &str) -> String {
        let root = parse_document(src, "test.xml").unwrap();
        to_json_string(&root, "\t").unwrap()
    }

    fn value(src: &str) -> Value {
        serde_json::from_str(&json(src)).unwrap()
    }

    #[test]
    fn test_attributes_and_child_field() {
        let v = value(r#"<a foo="1"><b>hi</b></a>"#);
        assert_eq!(v, serde_json::json!({ "@node": "a", ".foo": "1", "b": "hi" }));
    }

    #[test]
    fn test_exact_layout() {
        assert_eq!(
            json(r#"<a foo="1"><b>hi</b></a>"#),
            "{\n\t\"@node\" : \"a\",\n\t\".foo\" : \"1\",\n\t\"b\" : \"hi\"\n}\n"
        );
    }

    #[test]
    fn test_key_order_follows_source() {
        let v = value(r#"<object class="Sprite" name="hero"><scale>2</scale><position>1,1</position></object>"#);
        let keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["@node", ".class", ".name", "scale", "position"]);
    }

    #[test]
    fn test_array_category_always_array() {
        for name in ["objects", "children", "passthrough"] {
            let src = format!(r#"<{name} ignored="yes"><a>1</a><b x="2"/></{name}>"#);
            let v = value(&src);
            let items = v.as_array().unwrap_or_else(|| panic!("{name} should be an array"));
            assert_eq!(items.len(), 2);
            assert_eq!(items[0], Value::String("1".into()));
            assert_eq!(items[1]["@node"], "b");
            assert_eq!(items[1][".x"], "2");
        }
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(json("<objects/>"), "[]\n");
    }

    #[test]
    fn test_bare_element_is_string() {
        assert_eq!(json("<a/>"), "\"\"\n");
        assert_eq!(json("<a>text</a>"), "\"text\"\n");
    }

    #[test]
    fn test_value_field_for_mixed_content() {
        let v = value(r#"<label font="big">  Hello  </label>"#);
        assert_eq!(v["value"], "Hello");
        assert_eq!(v[".font"], "big");
    }

    #[test]
    fn test_quotes_escaped() {
        let v = value(r#"<a title='say "hi"'><b>"x"</b></a>"#);
        assert_eq!(v[".title"], "say \"hi\"");
        assert_eq!(v["b"], "\"x\"");
    }

    #[test]
    fn test_nested_indentation() {
        let out = json(r#"<objects><object class="A"><children><object class="B"/></children></object></objects>"#);
        let expected = "[\n\t{\n\t\t\"@node\" : \"object\",\n\t\t\".class\" : \"A\",\n\t\t\"children\" : [\n\t\t\t{\n\t\t\t\t\"@node\" : \"object\",\n\t\t\t\t\".class\" : \"B\"\n\t\t\t}\n\t\t]\n\t}\n]\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_comment_precedes_object() {
        let out = json("<objects><!-- hero --><object class=\"A\"/></objects>");
        assert!(out.starts_with("[\n\t// hero \n\t{\n"), "{out}");
    }

    #[test]
    fn test_custom_indent() {
        let root = parse_document(r#"<a x="1"/>"#, "t.xml").unwrap();
        let out = to_json_string(&root, "  ").unwrap();
        assert_eq!(out, "{\n  \"@node\" : \"a\",\n  \".x\" : \"1\"\n}\n");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("plain"), "plain");
        assert_eq!(escape_string(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_string(r"back\slash"), r"back\slash");
    }
}
