//! The phases of a single append.
//!
//! ## Overview
//!
//! Appending one document to the master runs these phases against a staged
//! copy of the master:
//! 1. Style merge - assign ids to the appended styles and relink them
//! 2. Numbering merge - remap abstract definitions and instances
//! 3. Relationship merge - remap the main part's relationships
//! 4. Content copy - rewrite and copy body content through the id maps
//! 5. Validation - reject the staged document if anything dangles
//!
//! Phases 1-3 live in [`crate::merge`]. This module holds the remaining two
//! and the [`orchestrator`] that sequences all of them and commits the staged
//! document only when every phase succeeded.

pub mod content;
pub mod orchestrator;
pub mod validate;

pub use content::{BodyCopier, ContentCopier};
pub use orchestrator::{compose, AppendReport, Composer};
pub use validate::{issues, validate};

use crate::merge::{NumberingMergeOutcome, RelationshipMergeOutcome, StyleMergeOutcome};

/// Every id decision taken while appending one document.
///
/// Built fresh for each append, handed to the content copier, then kept on
/// the [`AppendReport`] as provenance.
#[derive(Debug, Clone)]
pub struct AppendMaps {
    /// 1-based index of the append these maps belong to
    pub document: usize,
    pub styles: StyleMergeOutcome,
    pub numbering: NumberingMergeOutcome,
    pub relationships: RelationshipMergeOutcome,
}

impl AppendMaps {
    /// Composed style id for an appended one.
    pub fn style(&self, style_id: &str) -> Option<&str> {
        self.styles
            .map
            .get(&style_id.to_string())
            .map(String::as_str)
    }

    /// Composed numbering instance id for an appended one.
    pub fn num_instance(&self, num_id: u32) -> Option<u32> {
        self.numbering.instance(num_id)
    }

    /// Composed relationship id for an appended one.
    pub fn relationship(&self, rel_id: &str) -> Option<&str> {
        self.relationships
            .map
            .get(&rel_id.to_string())
            .map(String::as_str)
    }
}
