//! Reference validation for a whole document.
//!
//! Checks the invariants a composed document must hold: ids are unique per
//! catalog, every style, numbering and relationship reference resolves and no
//! `based_on` chain loops. The composer runs this on the staged document
//! before committing an append; the `validate` command runs it on any file.

use std::collections::HashSet;

use crate::error::{Catalog, Error, Result};
use crate::model::body::paragraphs;
use crate::model::{body, Document, Inline, NumberingRef};

/// Fail with the first problem found.
pub fn validate(document: &Document) -> Result<()> {
    match issues(document).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Every problem found, in catalog order (styles, numbering, relationships, body).
pub fn issues(document: &Document) -> Vec<Error> {
    let mut found = Vec::new();
    check_styles(document, &mut found);
    check_numbering(document, &mut found);
    check_relationships(document, &mut found);
    check_body(document, &mut found);
    found
}

fn dangling(catalog: Catalog, id: impl ToString, referenced_by: String) -> Error {
    Error::UnresolvableReference {
        catalog,
        id: id.to_string(),
        referenced_by,
    }
}

fn check_duplicates(
    catalog: Catalog,
    ids: impl Iterator<Item = String>,
    found: &mut Vec<Error>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.clone()) {
            found.push(Error::DuplicateIdentifier { catalog, id });
        }
    }
}

fn check_styles(document: &Document, found: &mut Vec<Error>) {
    let styles = document.styles();
    check_duplicates(Catalog::Styles, styles.ids().map(str::to_string), found);

    let mut reported_cycles = HashSet::new();
    for style in styles {
        for (label, target) in style.style_links() {
            if !styles.contains(target) {
                found.push(dangling(
                    Catalog::Styles,
                    target,
                    format!("style '{}' {}", style.style_id, label),
                ));
            }
        }

        if let Err(Error::CycleDetected { cycle }) = styles.inheritance_chain(&style.style_id) {
            // every member of a loop reports it; keep one per loop
            let mut members: Vec<&str> = cycle.split(" -> ").collect();
            members.pop();
            members.sort_unstable();
            if reported_cycles.insert(members.join(",")) {
                found.push(Error::CycleDetected { cycle });
            }
        }

        if let Some(reference) = style.numbering {
            check_instance(
                document,
                reference,
                || format!("style '{}'", style.style_id),
                found,
            );
        }
    }
}

fn check_numbering(document: &Document, found: &mut Vec<Error>) {
    let numbering = document.numbering();
    let styles = document.styles();
    check_duplicates(
        Catalog::Numbering,
        numbering.abstract_ids().map(|id| format!("abstract {id}")),
        found,
    );
    check_duplicates(
        Catalog::Numbering,
        numbering.instance_ids().map(|id| format!("instance {id}")),
        found,
    );

    for abstract_num in &numbering.abstract_nums {
        for (origin, style_id) in abstract_num.style_refs() {
            if !styles.contains(style_id) {
                found.push(dangling(
                    Catalog::Styles,
                    style_id,
                    format!("abstract numbering {} {}", abstract_num.id, origin),
                ));
            }
        }
    }

    for instance in &numbering.instances {
        if numbering.abstract_num(instance.abstract_num_id).is_none() {
            found.push(dangling(
                Catalog::Numbering,
                instance.abstract_num_id,
                format!("numbering instance {}", instance.num_id),
            ));
        }
        for level_override in &instance.overrides {
            let style = level_override
                .definition
                .as_ref()
                .and_then(|level| level.style.as_deref());
            if let Some(style_id) = style {
                if !styles.contains(style_id) {
                    found.push(dangling(
                        Catalog::Styles,
                        style_id,
                        format!(
                            "numbering instance {} level {} override",
                            instance.num_id, level_override.level
                        ),
                    ));
                }
            }
        }
    }
}

fn check_relationships(document: &Document, found: &mut Vec<Error>) {
    check_duplicates(
        Catalog::Relationships,
        document.relationships().ids().map(str::to_string),
        found,
    );
}

fn check_body(document: &Document, found: &mut Vec<Error>) {
    let styles = document.styles();
    let relationships = document.relationships();

    for table in body::tables(&document.body) {
        if let Some(style_id) = table.style.as_deref() {
            if !styles.contains(style_id) {
                found.push(dangling(Catalog::Styles, style_id, "table".to_string()));
            }
        }
    }

    for (index, paragraph) in paragraphs(&document.body).into_iter().enumerate() {
        let origin = || format!("paragraph {}", index + 1);
        if let Some(style_id) = paragraph.style.as_deref() {
            if !styles.contains(style_id) {
                found.push(dangling(Catalog::Styles, style_id, origin()));
            }
        }
        if let Some(reference) = paragraph.numbering {
            check_instance(document, reference, origin, found);
        }

        for inline in &paragraph.content {
            let (runs, rel_id) = match inline {
                Inline::Run(run) => (std::slice::from_ref(run), None),
                Inline::Hyperlink { rel_id, runs } => (runs.as_slice(), Some(rel_id)),
                Inline::Drawing { rel_id, .. } => (&[][..], Some(rel_id)),
            };
            for style_id in runs.iter().filter_map(|r| r.style.as_deref()) {
                if !styles.contains(style_id) {
                    found.push(dangling(Catalog::Styles, style_id, format!("run in {}", origin())));
                }
            }
            if let Some(rel_id) = rel_id {
                if relationships.get(rel_id).is_none() {
                    found.push(dangling(Catalog::Relationships, rel_id, origin()));
                }
            }
        }
    }
}

fn check_instance(
    document: &Document,
    reference: NumberingRef,
    origin: impl FnOnce() -> String,
    found: &mut Vec<Error>,
) {
    if !reference.is_removal() && document.numbering().instance(reference.num_id).is_none() {
        found.push(dangling(Catalog::Numbering, reference.num_id, origin()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::relationship::IMAGE;
    use crate::model::{
        AbstractNum, Block, Level, NumInstance, NumberingCatalog, Paragraph, Relationship,
        RelationshipTable, Run, StyleCatalog, StyleDefinition, StyleType, Table,
    };

    fn valid() -> Document {
        Document {
            styles: Some(StyleCatalog::from_styles(vec![
                StyleDefinition::new("Normal", StyleType::Paragraph).as_default(),
                StyleDefinition::new("Quote", StyleType::Paragraph)
                    .with_based_on("Normal")
                    .with_link("QuoteChar"),
                StyleDefinition::new("QuoteChar", StyleType::Character).with_link("Quote"),
                StyleDefinition::new("Steps", StyleType::Paragraph)
                    .with_numbering(NumberingRef::new(1, 0)),
            ])),
            numbering: Some(NumberingCatalog {
                abstract_nums: vec![AbstractNum::new(0, vec![Level::new(0).with_style("Steps")])],
                instances: vec![NumInstance::new(1, 0)],
            }),
            relationships: Some(RelationshipTable::from_entries(vec![Relationship::new(
                "rId1",
                IMAGE,
                "media/image1.png",
            )])),
            body: vec![
                Block::Paragraph(
                    Paragraph::new()
                        .with_style("Quote")
                        .with_inline(Inline::Run(Run::new("x").with_style("QuoteChar")))
                        .with_inline(Inline::Drawing {
                            rel_id: "rId1".to_string(),
                            description: None,
                        }),
                ),
                Block::Paragraph(Paragraph::new().with_numbering(NumberingRef::new(0, 0))),
            ],
        }
    }

    #[test]
    fn test_valid_document_has_no_issues() {
        assert!(issues(&valid()).is_empty());
        assert!(validate(&valid()).is_ok());
        assert!(validate(&Document::new()).is_ok());
    }

    #[test]
    fn test_dangling_style_links_are_reported() {
        let mut document = valid();
        document.styles_mut().get_mut("Quote").unwrap().next = Some("Gone".to_string());
        let found = issues(&document);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].to_string(),
            "Unresolvable styles reference 'Gone' (referenced by style 'Quote' next)"
        );
    }

    #[test]
    fn test_cycle_is_reported_once() {
        let mut document = valid();
        document.styles_mut().get_mut("Normal").unwrap().based_on = Some("Quote".to_string());
        let found = issues(&document);
        let cycles: Vec<_> = found
            .iter()
            .filter(|e| matches!(e, Error::CycleDetected { .. }))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert!(matches!(validate(&document), Err(Error::CycleDetected { .. })));
    }

    #[test]
    fn test_numbering_references_are_checked() {
        let mut document = valid();
        document.numbering_mut().instances.push(NumInstance::new(2, 7));
        document.numbering_mut().abstract_nums[0].levels[0].style = Some("Missing".to_string());
        document
            .body
            .push(Block::Paragraph(Paragraph::new().with_numbering(NumberingRef::new(9, 0))));

        let found: Vec<String> = issues(&document).iter().map(|e| e.to_string()).collect();
        assert_eq!(found.len(), 3);
        assert!(found[0].contains("'Missing'"));
        assert!(found[0].contains("abstract numbering 0 level 0"));
        assert!(found[1].contains("numbering reference '7'"));
        assert!(found[2].contains("numbering reference '9'"));
    }

    #[test]
    fn test_body_references_in_tables_are_checked() {
        let mut document = valid();
        document.body.push(Block::Table(Table {
            style: Some("GridX".to_string()),
            rows: vec![crate::model::TableRow {
                cells: vec![crate::model::TableCell {
                    blocks: vec![Block::Paragraph(Paragraph::new().with_inline(
                        Inline::Hyperlink {
                            rel_id: "rId404".to_string(),
                            runs: vec![],
                        },
                    ))],
                }],
            }],
        }));

        let found = issues(&document);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].catalog(), Some(Catalog::Styles));
        assert_eq!(found[1].catalog(), Some(Catalog::Relationships));
    }

    #[test]
    fn test_duplicate_ids_are_reported() {
        let mut document = valid();
        document.relationships = Some(RelationshipTable::from_entries(vec![
            Relationship::new("rId1", IMAGE, "media/a.png"),
            Relationship::new("rId1", IMAGE, "media/b.png"),
        ]));
        assert!(matches!(
            validate(&document),
            Err(Error::DuplicateIdentifier { catalog: Catalog::Relationships, ref id }) if id == "rId1"
        ));
    }
}
