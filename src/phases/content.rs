//! Body content copy.
//!
//! Copies the appended document's body onto the end of the staged master,
//! rewriting every style, numbering and relationship reference through the
//! maps the catalog merges produced.
//!
//! ## List pinning
//!
//! A paragraph often gets its list numbering only through its style. When
//! that style collapsed onto a master definition (or inherits from one) the
//! numbering the paragraph would see in the composed document can differ
//! from what it had in its own document. Left alone, the first item of an
//! appended list would then continue whatever master list the master style
//! points at. Such paragraphs are pinned: they receive an explicit reference
//! to their own remapped list, or an explicit removal when they were not
//! numbered at all.

use std::collections::HashMap;

use log::debug;

use super::AppendMaps;
use crate::error::{Catalog, Error, Result};
use crate::model::{
    Block, Document, Inline, NumberingRef, Paragraph, Run, StyleCatalog, Table, TableCell,
    TableRow,
};

/// Copies body content from an appended document into the staged master.
///
/// The composer calls this once per append, after all catalog merges have
/// run. Implementations must only append to `target.body`.
pub trait ContentCopier {
    fn copy_body(&self, target: &mut Document, source: &Document, maps: &AppendMaps) -> Result<()>;
}

/// The default copier: deep-copies blocks and rewrites their references.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyCopier;

impl ContentCopier for BodyCopier {
    fn copy_body(&self, target: &mut Document, source: &Document, maps: &AppendMaps) -> Result<()> {
        let blocks = {
            let mut rewriter = Rewriter {
                source_styles: source.styles(),
                target_styles: target.styles(),
                maps,
                pins: HashMap::new(),
            };
            source
                .body
                .iter()
                .map(|block| rewriter.block(block))
                .collect::<Result<Vec<_>>>()?
        };

        debug!(
            "copied {} block(s) of document #{}",
            blocks.len(),
            maps.document
        );
        target.body.extend(blocks);
        Ok(())
    }
}

struct Rewriter<'a> {
    source_styles: &'a StyleCatalog,
    target_styles: &'a StyleCatalog,
    maps: &'a AppendMaps,
    /// Pin decision per appended paragraph style
    pins: HashMap<String, Option<NumberingRef>>,
}

impl Rewriter<'_> {
    fn block(&mut self, block: &Block) -> Result<Block> {
        Ok(match block {
            Block::Paragraph(paragraph) => Block::Paragraph(self.paragraph(paragraph)?),
            Block::Table(table) => Block::Table(self.table(table)?),
        })
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<Paragraph> {
        let style = match paragraph.style.as_deref() {
            Some(id) => Some(self.style(id, "paragraph")?),
            None => None,
        };
        let numbering = match (paragraph.numbering, paragraph.style.as_deref()) {
            (Some(reference), _) => Some(self.numbering(reference, "paragraph")?),
            (None, Some(style_id)) => self.pin(style_id)?,
            (None, None) => None,
        };
        let content = paragraph
            .content
            .iter()
            .map(|inline| self.inline(inline))
            .collect::<Result<Vec<_>>>()?;

        Ok(Paragraph {
            style,
            numbering,
            content,
        })
    }

    fn table(&mut self, table: &Table) -> Result<Table> {
        let style = match table.style.as_deref() {
            Some(id) => Some(self.style(id, "table")?),
            None => None,
        };
        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let mut cells = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                let blocks = cell
                    .blocks
                    .iter()
                    .map(|block| self.block(block))
                    .collect::<Result<Vec<_>>>()?;
                cells.push(TableCell { blocks });
            }
            rows.push(TableRow { cells });
        }
        Ok(Table { style, rows })
    }

    fn inline(&self, inline: &Inline) -> Result<Inline> {
        Ok(match inline {
            Inline::Run(run) => Inline::Run(self.run(run)?),
            Inline::Hyperlink { rel_id, runs } => Inline::Hyperlink {
                rel_id: self.relationship(rel_id, "hyperlink")?,
                runs: runs.iter().map(|r| self.run(r)).collect::<Result<_>>()?,
            },
            Inline::Drawing {
                rel_id,
                description,
            } => Inline::Drawing {
                rel_id: self.relationship(rel_id, "drawing")?,
                description: description.clone(),
            },
        })
    }

    fn run(&self, run: &Run) -> Result<Run> {
        let style = match run.style.as_deref() {
            Some(id) => Some(self.style(id, "run")?),
            None => None,
        };
        Ok(Run {
            style,
            text: run.text.clone(),
        })
    }

    fn style(&self, style_id: &str, referenced_by: &str) -> Result<String> {
        self.maps
            .style(style_id)
            .map(str::to_string)
            .ok_or_else(|| Error::UnresolvableReference {
                catalog: Catalog::Styles,
                id: style_id.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    fn numbering(&self, reference: NumberingRef, referenced_by: &str) -> Result<NumberingRef> {
        let num_id = self
            .maps
            .num_instance(reference.num_id)
            .ok_or_else(|| Error::UnresolvableReference {
                catalog: Catalog::Numbering,
                id: reference.num_id.to_string(),
                referenced_by: referenced_by.to_string(),
            })?;
        Ok(NumberingRef::new(num_id, reference.level))
    }

    fn relationship(&self, rel_id: &str, referenced_by: &str) -> Result<String> {
        self.maps
            .relationship(rel_id)
            .map(str::to_string)
            .ok_or_else(|| Error::UnresolvableReference {
                catalog: Catalog::Relationships,
                id: rel_id.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    /// Explicit numbering for a paragraph that relies on its style for it,
    /// when the composed style would number it differently.
    fn pin(&mut self, source_style: &str) -> Result<Option<NumberingRef>> {
        if let Some(decided) = self.pins.get(source_style) {
            return Ok(*decided);
        }

        let authored = match active(self.source_styles.effective_numbering(source_style)?) {
            Some(reference) => Some(self.numbering(reference, "paragraph style numbering")?),
            None => None,
        };
        let target_style = self.style(source_style, "paragraph")?;
        let composed = active(self.target_styles.effective_numbering(&target_style)?);

        let decided = if authored == composed {
            None
        } else {
            let pinned = authored.unwrap_or_else(|| NumberingRef::new(0, 0));
            debug!(
                "pinning paragraphs of style '{}' to numbering {} (composed style '{}' would give {:?})",
                source_style, pinned.num_id, target_style, composed
            );
            Some(pinned)
        };
        self.pins.insert(source_style.to_string(), decided);
        Ok(decided)
    }
}

/// Numbering that actually numbers; a removal reads as none.
fn active(reference: Option<NumberingRef>) -> Option<NumberingRef> {
    reference.filter(|r| !r.is_removal())
}
