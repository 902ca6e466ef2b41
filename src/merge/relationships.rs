//! Relationship table merge for one document part.

use log::debug;

use crate::error::Result;
use crate::model::RelationshipTable;
use crate::remap::{IdRemapper, IdentifierMap, Namespace};

/// What one relationship merge did.
#[derive(Debug, Clone)]
pub struct RelationshipMergeOutcome {
    pub map: IdentifierMap<String>,
    /// External relationships answered by an identical master entry
    pub reused: usize,
    /// Relationships to catalog parts, which are never copied
    pub skipped: usize,
}

/// Merge the appended part's relationships into the master part's table.
///
/// Relationships to the catalog parts themselves are left out: the composed
/// document keeps the master's styles, numbering and settings parts. An
/// external target the master already links to is reused rather than
/// duplicated. Everything else is copied under an allocated id.
pub fn merge_relationships(
    master: &mut RelationshipTable,
    appended: &RelationshipTable,
    document: usize,
) -> Result<RelationshipMergeOutcome> {
    let mut remapper = IdRemapper::new(
        Namespace::Relationship,
        document,
        master.ids().map(str::to_string),
    );
    let mut reused = 0;
    let mut skipped = 0;
    let mut copied = Vec::new();

    for relationship in appended {
        if relationship.is_catalog_part() {
            skipped += 1;
            continue;
        }

        if relationship.external {
            if let Some(existing) = master.find_same_resource(relationship) {
                debug!(
                    "relationship '{}' reuses master '{}' ({})",
                    relationship.id, existing.id, existing.target
                );
                remapper.alias(&relationship.id, existing.id.clone());
                reused += 1;
                continue;
            }
        }

        let id = remapper.allocate(&relationship.id)?;
        let mut merged = relationship.clone();
        merged.id = id;
        copied.push(merged);
    }

    for relationship in copied {
        master.insert(relationship);
    }

    Ok(RelationshipMergeOutcome {
        map: remapper.into_map(),
        reused,
        skipped,
    })
}
