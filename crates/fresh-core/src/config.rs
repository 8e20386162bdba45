use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FreshError, FreshResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JsonConfig {
    /// One indentation unit, repeated per nesting level.
    pub indent: String,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FreshConfig {
    pub indent: String,
    /// Terminator used for `key << TAG` multi-line strings.
    pub heredoc_tag: String,
    /// Fail instead of writing output when reindentation underflows.
    pub strict: bool,
}

impl Default for FreshConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            heredoc_tag: "EOF".to_string(),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConvertConfig {
    #[serde(default)]
    pub json: JsonConfig,
    #[serde(default)]
    pub fresh: FreshConfig,
}

impl ConvertConfig {
    pub fn load_from_file(path: &Path) -> FreshResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents).map_err(|e| match e {
            FreshError::Config { message, .. } => FreshError::config(message, path),
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> FreshResult<Self> {
        let config: ConvertConfig =
            toml::from_str(contents).map_err(|e| FreshError::config(e.to_string(), "<inline>"))?;
        let tag = &config.fresh.heredoc_tag;
        if tag.is_empty() || tag.chars().any(char::is_whitespace) {
            return Err(FreshError::config(
                "fresh.heredoc_tag must be a single non-empty word",
                "<inline>",
            ));
        }
        Ok(config)
    }
}
