//! Catalog merge operations
//!
//! Each catalog a document carries has its own merge, run by the composer in
//! dependency order:
//!
//! - Styles (styles.rs) - produces the style id map
//! - Numbering (numbering.rs) - consumes the style id map, produces the
//!   abstract and instance id maps
//! - Relationships (relationships.rs) - produces the relationship id map
//!
//! Every merge only appends to the master catalog it is given and reports
//! the old → new id pairs it decided on. The composer runs them against a
//! staged copy of the master, so a failing merge never leaves a partial
//! catalog behind.

pub mod numbering;
pub mod relationships;
pub mod styles;

pub use numbering::{merge_numbering, relink_style_numbering, NumberingMergeOutcome};
pub use relationships::{merge_relationships, RelationshipMergeOutcome};
pub use styles::{merge_styles, StyleMergeOutcome};
