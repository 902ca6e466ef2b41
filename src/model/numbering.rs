//! Numbering definitions: abstract list templates and their instances.

use serde::{Deserialize, Serialize};

/// A reference from content (or a style) to a numbering instance.
///
/// `num_id` 0 is the package format's way of saying "no numbering" and never
/// refers to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberingRef {
    pub num_id: u32,
    #[serde(default)]
    pub level: u8,
}

impl NumberingRef {
    pub fn new(num_id: u32, level: u8) -> Self {
        Self { num_id, level }
    }

    /// Whether this reference explicitly removes numbering.
    pub fn is_removal(&self) -> bool {
        self.num_id == 0
    }
}

/// One level of an abstract numbering definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub level: u8,
    #[serde(default = "default_start")]
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Paragraph style bound to this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

fn default_start() -> u32 {
    1
}

impl Level {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            start: default_start(),
            format: None,
            text: None,
            style: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }
}

/// Reusable list-formatting template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractNum {
    pub id: u32,
    #[serde(default)]
    pub levels: Vec<Level>,
    /// Numbering style this definition provides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_link: Option<String>,
    /// Numbering style this definition defers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_style_link: Option<String>,
}

impl AbstractNum {
    pub fn new(id: u32, levels: Vec<Level>) -> Self {
        Self {
            id,
            levels,
            style_link: None,
            num_style_link: None,
        }
    }

    /// Every style id this definition points at, labelled by origin.
    pub fn style_refs(&self) -> Vec<(String, &str)> {
        let mut refs: Vec<(String, &str)> = self
            .levels
            .iter()
            .filter_map(|l| l.style.as_deref().map(|s| (format!("level {}", l.level), s)))
            .collect();
        if let Some(link) = self.style_link.as_deref() {
            refs.push(("style_link".to_string(), link));
        }
        if let Some(link) = self.num_style_link.as_deref() {
            refs.push(("num_style_link".to_string(), link));
        }
        refs
    }
}

/// Per-instance replacement of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelOverride {
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_override: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Level>,
}

/// A concrete list applied to content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumInstance {
    pub num_id: u32,
    pub abstract_num_id: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<LevelOverride>,
}

impl NumInstance {
    pub fn new(num_id: u32, abstract_num_id: u32) -> Self {
        Self {
            num_id,
            abstract_num_id,
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, level_override: LevelOverride) -> Self {
        self.overrides.push(level_override);
        self
    }
}

/// All numbering definitions of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberingCatalog {
    #[serde(default)]
    pub abstract_nums: Vec<AbstractNum>,
    #[serde(default)]
    pub instances: Vec<NumInstance>,
}

impl NumberingCatalog {
    pub const fn new() -> Self {
        Self {
            abstract_nums: Vec::new(),
            instances: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.abstract_nums.is_empty() && self.instances.is_empty()
    }

    pub fn abstract_num(&self, id: u32) -> Option<&AbstractNum> {
        self.abstract_nums.iter().find(|a| a.id == id)
    }

    pub fn instance(&self, num_id: u32) -> Option<&NumInstance> {
        self.instances.iter().find(|n| n.num_id == num_id)
    }

    pub fn abstract_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.abstract_nums.iter().map(|a| a.id)
    }

    pub fn instance_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.instances.iter().map(|n| n.num_id)
    }

    /// The template behind a numbering instance.
    pub fn abstract_for(&self, num_id: u32) -> Option<&AbstractNum> {
        self.instance(num_id)
            .and_then(|n| self.abstract_num(n.abstract_num_id))
    }
}
