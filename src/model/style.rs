//! Style definitions and the ordered style catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::numbering::NumberingRef;
use super::role::BuiltinRole;
use crate::error::{Catalog, Error, Result};

/// Kind of content a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

/// A single entry of a style catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Identifier unique within one catalog (e.g. "Heading1")
    pub style_id: String,
    #[serde(rename = "type")]
    pub style_type: StyleType,
    /// Display name, possibly localized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Semantic role for predefined styles; `None` for custom styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<BuiltinRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Paragraph/character pairing (e.g. "Quote" <-> "QuoteChar")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    /// List numbering carried by the style itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
}

impl StyleDefinition {
    pub fn new(style_id: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            style_id: style_id.into(),
            style_type,
            name: None,
            role: None,
            based_on: None,
            next: None,
            link: None,
            is_default: false,
            numbering: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: BuiltinRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_based_on(mut self, style_id: impl Into<String>) -> Self {
        self.based_on = Some(style_id.into());
        self
    }

    pub fn with_next(mut self, style_id: impl Into<String>) -> Self {
        self.next = Some(style_id.into());
        self
    }

    pub fn with_link(mut self, style_id: impl Into<String>) -> Self {
        self.link = Some(style_id.into());
        self
    }

    pub fn with_numbering(mut self, numbering: NumberingRef) -> Self {
        self.numbering = Some(numbering);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Whether the style is one of the format's predefined styles.
    pub fn is_builtin(&self) -> bool {
        self.role.is_some()
    }

    /// Outgoing links to other styles, labelled by attribute.
    pub fn style_links(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("based_on", self.based_on.as_deref()),
            ("next", self.next.as_deref()),
            ("link", self.link.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, target)| target.map(|t| (label, t)))
    }
}

/// Ordered collection of style definitions keyed by style id.
///
/// Insertion order decides which style wins default resolution; equality
/// ignores order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleCatalog {
    styles: Vec<StyleDefinition>,
}

impl StyleCatalog {
    pub const fn new() -> Self {
        Self { styles: Vec::new() }
    }

    pub fn from_styles(styles: Vec<StyleDefinition>) -> Self {
        Self { styles }
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleDefinition> {
        self.styles.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.style_id.as_str())
    }

    pub fn get(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    pub fn get_mut(&mut self, style_id: &str) -> Option<&mut StyleDefinition> {
        self.styles.iter_mut().find(|s| s.style_id == style_id)
    }

    pub fn contains(&self, style_id: &str) -> bool {
        self.get(style_id).is_some()
    }

    /// First style playing the given predefined role.
    pub fn find_by_role(&self, role: BuiltinRole) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.role == Some(role))
    }

    /// Append a definition. Returns `false` and leaves the catalog untouched
    /// when the id is already taken.
    pub fn insert(&mut self, style: StyleDefinition) -> bool {
        if self.contains(&style.style_id) {
            return false;
        }
        self.styles.push(style);
        true
    }

    /// The default style for a style type, resolved in insertion order.
    pub fn default_style(&self, style_type: StyleType) -> Option<&StyleDefinition> {
        self.styles
            .iter()
            .find(|s| s.is_default && s.style_type == style_type)
    }

    /// Walk `based_on` links starting at `style_id`, the style itself first.
    ///
    /// Fails on a link that does not resolve or on a chain that loops.
    pub fn inheritance_chain(&self, style_id: &str) -> Result<Vec<&StyleDefinition>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(style_id).ok_or_else(|| Error::UnresolvableReference {
            catalog: Catalog::Styles,
            id: style_id.to_string(),
            referenced_by: "inheritance lookup".to_string(),
        })?;

        loop {
            if !seen.insert(current.style_id.as_str()) {
                let mut cycle: Vec<&str> = chain
                    .iter()
                    .map(|s: &&StyleDefinition| s.style_id.as_str())
                    .skip_while(|id| *id != current.style_id)
                    .collect();
                cycle.push(&current.style_id);
                return Err(Error::CycleDetected {
                    cycle: cycle.join(" -> "),
                });
            }
            chain.push(current);

            let Some(parent_id) = current.based_on.as_deref() else {
                return Ok(chain);
            };
            current = self
                .get(parent_id)
                .ok_or_else(|| Error::UnresolvableReference {
                    catalog: Catalog::Styles,
                    id: parent_id.to_string(),
                    referenced_by: format!("style '{}' based_on", current.style_id),
                })?;
        }
    }

    /// List numbering a paragraph with this style receives, following
    /// `based_on` inheritance.
    pub fn effective_numbering(&self, style_id: &str) -> Result<Option<NumberingRef>> {
        Ok(self
            .inheritance_chain(style_id)?
            .into_iter()
            .find_map(|s| s.numbering))
    }
}

impl PartialEq for StyleCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .styles
                .iter()
                .all(|s| other.get(&s.style_id) == Some(s))
    }
}

impl<'a> IntoIterator for &'a StyleCatalog {
    type Item = &'a StyleDefinition;
    type IntoIter = std::slice::Iter<'a, StyleDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.iter()
    }
}
