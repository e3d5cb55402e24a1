//! Comment stripping and registry parsing.
//!
//! The community registry is JSON with `//` comment lines. The default
//! [`ParseMode::Strict`] removes whole comment lines and hands the rest to
//! `serde_json`; a `//` that follows data on the same line is left in place and
//! makes the document invalid. [`ParseMode::Json5`] accepts those inline
//! comments (and trailing commas) through the `json5` crate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DocsError, Result};

use super::types::PluginDescriptor;

/// Marker that starts a full-line comment.
pub const LINE_COMMENT: &str = "//";

/// How registry text is turned into descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Strip full-line comments, then parse as strict JSON.
    #[default]
    Strict,
    /// Parse as JSON5 (inline comments, trailing commas).
    Json5,
}

/// Remove every line whose trimmed content starts with `//`.
///
/// Purely lexical: string contents and block comments are not understood, and
/// a comment after data on the same line is kept verbatim.
pub fn strip_line_comments(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().starts_with(LINE_COMMENT))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse registry text into descriptors.
///
/// The document must be a JSON array. A single malformed entry fails the
/// whole registry; there is no partial recovery.
pub fn parse_registry(text: &str, mode: ParseMode) -> Result<Vec<PluginDescriptor>> {
    let plugins: Vec<PluginDescriptor> = match mode {
        ParseMode::Strict => {
            let uncommented = strip_line_comments(text);
            serde_json::from_str(&uncommented).map_err(|e| {
                DocsError::Parse(format!("registry is not valid JSON after comment stripping: {}", e))
            })?
        }
        ParseMode::Json5 => json5::from_str(text)
            .map_err(|e| DocsError::Parse(format!("registry is not valid JSON5: {}", e)))?,
    };

    debug!(plugins = plugins.len(), mode = ?mode, "Parsed registry");
    Ok(plugins)
}
