//! One-call conversions from markup source text.
//!
//! Both run the whole pipeline in memory and return only once it has
//! succeeded, so a parse error never leaves partial output behind.

use fresh_core::{FreshConfig, FreshResult, JsonConfig};

use crate::hoist::hoist_tweens;
use crate::json::to_json_string;
use crate::reader::parse_document;
use crate::reindent::{reindent, Reindented};
use crate::writer::to_fresh_string;

/// Markup → JSON text.
pub fn markup_to_json(source: &str, file: &str, config: &JsonConfig) -> FreshResult<String> {
    let root = parse_document(source, file)?;
    to_json_string(&root, &config.indent)
}

/// Markup → indented Fresh language text.
///
/// With `config.strict` set, an indentation underflow is an error rather
/// than an inline marker.
pub fn markup_to_fresh(source: &str, file: &str, config: &FreshConfig) -> FreshResult<Reindented> {
    let root = parse_document(source, file)?;
    let tree = hoist_tweens(root);
    let flat = to_fresh_string(&tree, &config.heredoc_tag)?;
    let result = reindent(&flat, &config.indent);

    if config.strict {
        let text = result.into_strict()?;
        return Ok(Reindented {
            text,
            underflows: 0,
        });
    }
    Ok(result)
}
