//! The document root and its file representation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::body::Block;
use super::numbering::NumberingCatalog;
use super::relationship::RelationshipTable;
use super::style::StyleCatalog;
use crate::error::{Error, Result};

static EMPTY_STYLES: StyleCatalog = StyleCatalog::new();
static EMPTY_NUMBERING: NumberingCatalog = NumberingCatalog::new();
static EMPTY_RELATIONSHIPS: RelationshipTable = RelationshipTable::new();

/// A document made of optional catalog parts and body content.
///
/// A part that is `None` is absent from the package. Readers treat an
/// absent part exactly like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleCatalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingCatalog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<RelationshipTable>,
    #[serde(default)]
    pub body: Vec<Block>,
}

/// On-disk rendering of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            other => Err(Error::DocumentFormat {
                path: path.display().to_string(),
                message: format!(
                    "unsupported extension {:?}; expected .yaml, .yml or .json",
                    other.unwrap_or("")
                ),
            }),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn styles(&self) -> &StyleCatalog {
        self.styles.as_ref().unwrap_or(&EMPTY_STYLES)
    }

    pub fn numbering(&self) -> &NumberingCatalog {
        self.numbering.as_ref().unwrap_or(&EMPTY_NUMBERING)
    }

    pub fn relationships(&self) -> &RelationshipTable {
        self.relationships.as_ref().unwrap_or(&EMPTY_RELATIONSHIPS)
    }

    /// Mutable styles, creating an empty part if absent.
    pub fn styles_mut(&mut self) -> &mut StyleCatalog {
        self.styles.get_or_insert_with(StyleCatalog::default)
    }

    pub fn numbering_mut(&mut self) -> &mut NumberingCatalog {
        self.numbering.get_or_insert_with(NumberingCatalog::default)
    }

    pub fn relationships_mut(&mut self) -> &mut RelationshipTable {
        self.relationships.get_or_insert_with(RelationshipTable::default)
    }

    /// Parse a document from its YAML rendering.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load a document from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = fs::read_to_string(path)?;
        match format {
            Format::Yaml => Self::from_yaml_str(&content),
            Format::Json => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Write the document, picking the rendering from the extension.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match Format::from_path(path)? {
            Format::Yaml => self.to_yaml_string()?,
            Format::Json => serde_json::to_string_pretty(self)?,
        };
        fs::write(path, content)?;
        Ok(())
    }
}
