//! Numbering catalog merge.
//!
//! Abstract definitions are merged first, then the instances pointing at
//! them. Numeric ids carry no meaning across documents, so a colliding id is
//! always replaced, even when the two definitions look alike. Style
//! references inside the definitions are rewritten through the style map
//! produced by the style merge.
//!
//! Styles can carry numbering too. Once the instance map exists,
//! [`relink_style_numbering`] points the styles inserted by this append at
//! the remapped instances.

use log::debug;

use crate::error::{Catalog, Error, Result};
use crate::model::{Level, NumberingCatalog, StyleCatalog};
use crate::remap::{IdRemapper, IdentifierMap, Namespace};

/// The two maps a numbering merge produces.
#[derive(Debug, Clone)]
pub struct NumberingMergeOutcome {
    pub abstract_map: IdentifierMap<u32>,
    pub instance_map: IdentifierMap<u32>,
}

impl NumberingMergeOutcome {
    /// Composed instance id for an appended one. `0` ("no numbering") maps
    /// to itself.
    pub fn instance(&self, num_id: u32) -> Option<u32> {
        if num_id == 0 {
            return Some(0);
        }
        self.instance_map.get(&num_id).copied()
    }
}

/// Merge `appended` numbering into `master` for append number `document`.
pub fn merge_numbering(
    master: &mut NumberingCatalog,
    appended: &NumberingCatalog,
    style_map: &IdentifierMap<String>,
    document: usize,
) -> Result<NumberingMergeOutcome> {
    let mut abstracts = IdRemapper::new(Namespace::AbstractNum, document, master.abstract_ids());
    let mut instances = IdRemapper::new(Namespace::NumInstance, document, master.instance_ids());
    // 0 means "no numbering" in content and must never be handed out
    instances.reserve(0);

    let mut new_abstracts = Vec::with_capacity(appended.abstract_nums.len());
    for abstract_num in &appended.abstract_nums {
        let id = abstracts.allocate(&abstract_num.id)?;
        let origin = format!("abstract numbering {}", abstract_num.id);

        let mut merged = abstract_num.clone();
        merged.id = id;
        for level in &mut merged.levels {
            relink_level(level, style_map, &origin)?;
        }
        merged.style_link = relink_style(style_map, merged.style_link.take(), &origin)?;
        merged.num_style_link = relink_style(style_map, merged.num_style_link.take(), &origin)?;
        new_abstracts.push(merged);
    }
    let abstract_map = abstracts.into_map();

    let mut new_instances = Vec::with_capacity(appended.instances.len());
    for instance in &appended.instances {
        let num_id = instances.allocate(&instance.num_id)?;
        let origin = format!("numbering instance {}", instance.num_id);

        let mut merged = instance.clone();
        merged.num_id = num_id;
        merged.abstract_num_id = abstract_map
            .get(&instance.abstract_num_id)
            .copied()
            .ok_or_else(|| Error::UnresolvableReference {
                catalog: Catalog::Numbering,
                id: instance.abstract_num_id.to_string(),
                referenced_by: origin.clone(),
            })?;
        for level_override in &mut merged.overrides {
            if let Some(definition) = level_override.definition.as_mut() {
                relink_level(definition, style_map, &origin)?;
            }
        }
        debug!(
            "numbering instance {} -> {} (abstract {} -> {})",
            instance.num_id, num_id, instance.abstract_num_id, merged.abstract_num_id
        );
        new_instances.push(merged);
    }

    master.abstract_nums.extend(new_abstracts);
    master.instances.extend(new_instances);

    Ok(NumberingMergeOutcome {
        abstract_map,
        instance_map: instances.into_map(),
    })
}

/// Point the numbering of freshly inserted styles at the remapped instances.
pub fn relink_style_numbering(
    styles: &mut StyleCatalog,
    inserted: &[String],
    numbering: &NumberingMergeOutcome,
) -> Result<()> {
    for style_id in inserted {
        let Some(style) = styles.get_mut(style_id) else {
            continue;
        };
        if let Some(reference) = style.numbering.as_mut() {
            reference.num_id = numbering.instance(reference.num_id).ok_or_else(|| {
                Error::UnresolvableReference {
                    catalog: Catalog::Numbering,
                    id: reference.num_id.to_string(),
                    referenced_by: format!("style '{}'", style_id),
                }
            })?;
        }
    }
    Ok(())
}

fn relink_level(level: &mut Level, style_map: &IdentifierMap<String>, origin: &str) -> Result<()> {
    level.style = relink_style(style_map, level.style.take(), origin)?;
    Ok(())
}

fn relink_style(
    style_map: &IdentifierMap<String>,
    style_id: Option<String>,
    origin: &str,
) -> Result<Option<String>> {
    match style_id {
        None => Ok(None),
        Some(id) => match style_map.get(&id) {
            Some(mapped) => Ok(Some(mapped.clone())),
            None => Err(Error::UnresolvableReference {
                catalog: Catalog::Styles,
                id,
                referenced_by: origin.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AbstractNum, LevelOverride, NumInstance, NumberingRef};
    use crate::model::{StyleDefinition, StyleType};

    fn style_map(pairs: &[(&str, &str)]) -> IdentifierMap<String> {
        let mut remapper: IdRemapper<String> = IdRemapper::new(Namespace::Style, 1, Vec::new());
        for (old, new) in pairs {
            remapper.alias(&old.to_string(), new.to_string());
        }
        remapper.into_map()
    }

    fn master() -> NumberingCatalog {
        NumberingCatalog {
            abstract_nums: vec![AbstractNum::new(
                0,
                vec![Level::new(0).with_format("bullet").with_style("ListBullet")],
            )],
            instances: vec![NumInstance::new(1, 0)],
        }
    }

    fn appended() -> NumberingCatalog {
        NumberingCatalog {
            abstract_nums: vec![
                AbstractNum::new(
                    0,
                    vec![Level::new(0).with_format("bullet").with_style("Aufzhlungszeichen")],
                ),
                AbstractNum::new(5, vec![Level::new(0).with_format("decimal")]),
            ],
            instances: vec![
                NumInstance::new(1, 0),
                NumInstance::new(2, 5).with_override(LevelOverride {
                    level: 0,
                    start_override: Some(1),
                    definition: Some(Level::new(0).with_style("Aufzhlungszeichen")),
                }),
            ],
        }
    }

    #[test]
    fn test_colliding_ids_are_replaced() {
        let mut catalog = master();
        let styles = style_map(&[("Aufzhlungszeichen", "ListBullet")]);
        let outcome = merge_numbering(&mut catalog, &appended(), &styles, 1).unwrap();

        assert_eq!(outcome.abstract_map.get(&0), Some(&1));
        assert_eq!(outcome.abstract_map.get(&5), Some(&5));
        assert_eq!(outcome.instance_map.get(&1), Some(&2));
        assert_eq!(outcome.instance_map.get(&2), Some(&3));

        assert_eq!(catalog.abstract_nums.len(), 3);
        assert_eq!(catalog.instances.len(), 3);
        assert_eq!(catalog.instance(2).map(|n| n.abstract_num_id), Some(1));
        assert_eq!(catalog.instance(3).map(|n| n.abstract_num_id), Some(5));
    }

    #[test]
    fn test_level_styles_are_rewritten() {
        let mut catalog = master();
        let styles = style_map(&[("Aufzhlungszeichen", "ListBullet")]);
        merge_numbering(&mut catalog, &appended(), &styles, 1).unwrap();

        let merged = catalog.abstract_num(1).unwrap();
        assert_eq!(merged.levels[0].style.as_deref(), Some("ListBullet"));

        let overridden = catalog.instance(3).unwrap();
        let definition = overridden.overrides[0].definition.as_ref().unwrap();
        assert_eq!(definition.style.as_deref(), Some("ListBullet"));
        assert_eq!(overridden.overrides[0].start_override, Some(1));
    }

    #[test]
    fn test_zero_is_never_allocated_as_instance() {
        let mut catalog = NumberingCatalog::new();
        let appended = NumberingCatalog {
            abstract_nums: vec![AbstractNum::new(0, vec![])],
            instances: vec![NumInstance::new(0, 0)],
        };
        let outcome = merge_numbering(&mut catalog, &appended, &style_map(&[]), 1).unwrap();
        assert_ne!(outcome.instance_map.get(&0), Some(&0));
        assert_eq!(outcome.instance(0), Some(0));
    }

    #[test]
    fn test_missing_abstract_is_unresolvable() {
        let mut catalog = master();
        let broken = NumberingCatalog {
            abstract_nums: vec![],
            instances: vec![NumInstance::new(4, 9)],
        };
        let err = merge_numbering(&mut catalog, &broken, &style_map(&[]), 1).unwrap_err();
        assert!(matches!(
            err,
            Error::UnresolvableReference { catalog: Catalog::Numbering, .. }
        ));
        // nothing committed on failure
        assert_eq!(catalog, master());
    }

    #[test]
    fn test_unmapped_level_style_is_unresolvable() {
        let mut catalog = master();
        let err = merge_numbering(&mut catalog, &appended(), &style_map(&[]), 1).unwrap_err();
        assert!(err.to_string().contains("Aufzhlungszeichen"));
    }

    #[test]
    fn test_relink_style_numbering() {
        let mut catalog = master();
        let styles = style_map(&[("Aufzhlungszeichen", "ListBullet")]);
        let outcome = merge_numbering(&mut catalog, &appended(), &styles, 1).unwrap();

        let mut style_catalog = StyleCatalog::from_styles(vec![
            StyleDefinition::new("ListBullet", StyleType::Paragraph)
                .with_numbering(NumberingRef::new(1, 0)),
            StyleDefinition::new("Steps", StyleType::Paragraph)
                .with_numbering(NumberingRef::new(2, 0)),
        ]);
        relink_style_numbering(&mut style_catalog, &["Steps".to_string()], &outcome).unwrap();

        // only inserted styles move
        assert_eq!(style_catalog.get("ListBullet").unwrap().numbering, Some(NumberingRef::new(1, 0)));
        assert_eq!(style_catalog.get("Steps").unwrap().numbering, Some(NumberingRef::new(3, 0)));
    }
}
