//! Relationships from a document part to other parts and external resources.

use serde::{Deserialize, Serialize};

/// Relationship type URIs of parts that hold the catalogs themselves.
///
/// Content never points at these, and the composed document keeps the
/// master's own.
const CATALOG_PART_SUFFIXES: &[&str] = &[
    "/styles",
    "/stylesWithEffects",
    "/numbering",
    "/settings",
    "/webSettings",
    "/fontTable",
    "/theme",
];

pub const HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
pub const IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub const NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

/// A single relationship entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Identifier unique within the owning part (e.g. "rId4")
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub target: String,
    /// Whether the target lives outside the package
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl Relationship {
    pub fn new(id: impl Into<String>, rel_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            external: false,
        }
    }

    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    /// Whether this relationship points at a catalog part (styles, numbering, ...).
    pub fn is_catalog_part(&self) -> bool {
        CATALOG_PART_SUFFIXES
            .iter()
            .any(|suffix| self.rel_type.ends_with(suffix))
    }

    /// Same resource, ignoring the id.
    pub fn same_resource(&self, other: &Relationship) -> bool {
        self.rel_type == other.rel_type
            && self.target == other.target
            && self.external == other.external
    }
}

/// Relationships of one document part, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable {
    entries: Vec<Relationship>,
}

impl RelationshipTable {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<Relationship>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Existing entry pointing at the same resource as `relationship`.
    pub fn find_same_resource(&self, relationship: &Relationship) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.same_resource(relationship))
    }

    /// Add an entry. Returns `false` when the id is already taken.
    pub fn insert(&mut self, relationship: Relationship) -> bool {
        if self.get(&relationship.id).is_some() {
            return false;
        }
        self.entries.push(relationship);
        true
    }
}

impl<'a> IntoIterator for &'a RelationshipTable {
    type Item = &'a Relationship;
    type IntoIter = std::slice::Iter<'a, Relationship>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
