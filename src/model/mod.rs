//! # Document Model
//!
//! The in-memory representation of a word-processing document as far as
//! composition is concerned: the style catalog, the numbering catalog, the
//! relationships of the main document part and the body content that points
//! into all three.
//!
//! Package reading and XML handling live outside this crate. Documents load
//! from and save to YAML or JSON renderings of this model, which keeps the
//! composition engine testable without any package plumbing.

pub mod body;
pub mod document;
pub mod numbering;
pub mod relationship;
pub mod role;
pub mod style;

pub use body::{Block, Inline, Paragraph, Run, Table, TableCell, TableRow};
pub use document::Document;
pub use numbering::{AbstractNum, Level, LevelOverride, NumInstance, NumberingCatalog, NumberingRef};
pub use relationship::{Relationship, RelationshipTable};
pub use role::BuiltinRole;
pub use style::{StyleCatalog, StyleDefinition, StyleType};
