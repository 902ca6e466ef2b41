//! Style catalog merge.
//!
//! Runs in two passes over the appended catalog:
//!
//! 1.  **Assign**: every appended style receives its id in the master.
//!     Built-in styles whose role the master already defines are redirected
//!     to the master's definition. Custom styles whose id the master already
//!     uses either collapse onto it (default) or are allocated a `doc<N>_`
//!     id (`preserve_document_styles`). Everything else keeps its id.
//! 2.  **Relink**: the styles that will be inserted get their `based_on`,
//!     `next` and `link` rewritten through the complete map and are appended
//!     to the master catalog.
//!
//! Relinking only starts once every style has an id, so links to styles that
//! come later in the appended catalog resolve like any other.

use std::collections::HashSet;

use log::{debug, warn};

use crate::config::ComposeOptions;
use crate::error::{Catalog, Error, Result};
use crate::filter::{PredefinedFilter, StyleClass};
use crate::model::{StyleCatalog, StyleDefinition};
use crate::remap::{IdRemapper, IdentifierMap, Namespace};

/// What one style merge did.
#[derive(Debug, Clone)]
pub struct StyleMergeOutcome {
    /// Appended style id → id in the composed catalog, for every appended style
    pub map: IdentifierMap<String>,
    /// Ids of the definitions added to the master, in insertion order
    pub inserted: Vec<String>,
    /// Appended ids that resolved to a definition the master already had
    pub collapsed: Vec<String>,
    /// How many of the collapsed styles were built-ins
    pub builtins_skipped: usize,
}

impl StyleMergeOutcome {
    fn empty(document: usize) -> Self {
        Self {
            map: IdentifierMap::new(Namespace::Style, document),
            inserted: Vec::new(),
            collapsed: Vec::new(),
            builtins_skipped: 0,
        }
    }

    /// Whether the appended id was collapsed onto a pre-existing master style.
    pub fn is_collapsed(&self, style_id: &str) -> bool {
        self.collapsed.iter().any(|id| id == style_id)
    }
}

/// Merge `appended` into `master` for the append with 1-based index `document`.
pub fn merge_styles(
    master: &mut StyleCatalog,
    appended: &StyleCatalog,
    document: usize,
    options: &ComposeOptions,
) -> Result<StyleMergeOutcome> {
    let mut outcome = StyleMergeOutcome::empty(document);
    if appended.is_empty() {
        return Ok(outcome);
    }

    let filter = PredefinedFilter::new(master);
    let mut remapper = IdRemapper::new(
        Namespace::Style,
        document,
        master.ids().map(str::to_string),
    );
    let mut pending: Vec<(&StyleDefinition, String)> = Vec::new();

    let mut seen = HashSet::new();

    // Pass 1: assign an id to every appended style
    for style in appended {
        let id = &style.style_id;
        if !seen.insert(id.as_str()) {
            return Err(Error::DuplicateIdentifier {
                catalog: Catalog::Styles,
                id: id.clone(),
            });
        }
        match filter.classify(style) {
            StyleClass::Builtin {
                master_id: Some(master_id),
            } => {
                debug!("built-in style '{}' resolves to master '{}'", id, master_id);
                remapper.alias(id, master_id);
                outcome.collapsed.push(id.clone());
                outcome.builtins_skipped += 1;
            }
            _ if !options.preserve_document_styles && master.contains(id) => {
                debug!("style '{}' already defined in master, keeping master's", id);
                remapper.alias(id, id.clone());
                outcome.collapsed.push(id.clone());
            }
            _ => {
                let assigned = remapper.allocate(id)?;
                pending.push((style, assigned));
            }
        }
    }

    let map = remapper.into_map();

    // Pass 2: relink and insert
    for (style, assigned) in pending {
        let mut inserted = style.clone();
        inserted.style_id = assigned.clone();
        inserted.based_on = relink(&map, style, "based_on", style.based_on.as_deref())?;
        inserted.next = relink(&map, style, "next", style.next.as_deref())?;
        inserted.link = relink(&map, style, "link", style.link.as_deref())?;
        if inserted.is_default && master.default_style(inserted.style_type).is_some() {
            warn!(
                "style '{}' was a default in its document; the master's default stays",
                style.style_id
            );
            inserted.is_default = false;
        }

        // every master id was reserved before allocation
        let added = master.insert(inserted);
        debug_assert!(added, "allocated style id '{}' already present", assigned);
        outcome.inserted.push(assigned);
    }

    outcome.map = map;
    Ok(outcome)
}

fn relink(
    map: &IdentifierMap<String>,
    style: &StyleDefinition,
    attribute: &str,
    target: Option<&str>,
) -> Result<Option<String>> {
    let Some(target) = target else {
        return Ok(None);
    };
    map.get(&target.to_string())
        .cloned()
        .map(Some)
        .ok_or_else(|| Error::UnresolvableReference {
            catalog: Catalog::Styles,
            id: target.to_string(),
            referenced_by: format!("style '{}' {}", style.style_id, attribute),
        })
}
