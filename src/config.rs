//! # Composition Options
//!
//! The composer recognizes a single setting, `preserve_document_styles`.
//! Options can be built in code or read from a small YAML file:
//!
//! ```yaml
//! preserve_document_styles: true
//! ```
//!
//! A missing key keeps its default; an unknown key is rejected so typos do
//! not silently fall back to the default behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options recognized by the composer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeOptions {
    /// Keep every appended document's custom styles distinct.
    ///
    /// When `false` (the default), a custom style whose id the master already
    /// uses is treated as the same style and the master's definition is kept.
    /// When `true`, such a style is inserted again under a `doc<N>_` prefixed
    /// id, so identically named custom styles from different documents
    /// coexist.
    pub preserve_document_styles: bool,
}

impl ComposeOptions {
    pub fn preserving_document_styles() -> Self {
        Self {
            preserve_document_styles: true,
        }
    }
}

/// Parse options from a YAML string.
///
/// An empty document yields the defaults.
pub fn parse(yaml: &str) -> Result<ComposeOptions> {
    if yaml.trim().is_empty() {
        return Ok(ComposeOptions::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load options from a YAML file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ComposeOptions> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
