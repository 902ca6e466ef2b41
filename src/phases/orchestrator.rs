//! Orchestrator for the complete append operation
//!
//! [`Composer`] owns the master document for one composition session and
//! runs every phase of an append in a fixed order against a staged copy:
//!
//! 1. Merge styles (produces the style id map)
//! 2. Merge numbering (consumes the style map) and relink style numbering
//! 3. Merge relationships
//! 4. Copy body content through all three maps
//! 5. Validate the staged document
//!
//! The staged copy replaces the master only when all five succeeded, so a
//! failed append leaves the master exactly as it was. The document counter
//! behind the `doc<N>_` prefixes is plain session state: it advances on every
//! call, failed ones included, and separate sessions never share it.

use log::{info, warn};

use super::content::{BodyCopier, ContentCopier};
use super::validate::validate;
use super::AppendMaps;
use crate::config::ComposeOptions;
use crate::error::{Catalog, Error, Result};
use crate::merge::{merge_numbering, merge_relationships, merge_styles, relink_style_numbering};
use crate::model::Document;

/// Summary of one committed append.
#[derive(Debug, Clone)]
pub struct AppendReport {
    /// 1-based index of the append
    pub document: usize,
    /// Top-level blocks copied into the body
    pub blocks: usize,
    /// Every id decision taken, kept as provenance
    pub maps: AppendMaps,
}

impl AppendReport {
    /// Styles added to the master.
    pub fn styles_inserted(&self) -> &[String] {
        &self.maps.styles.inserted
    }

    /// Appended styles that resolved to an existing master definition.
    pub fn styles_collapsed(&self) -> &[String] {
        &self.maps.styles.collapsed
    }

    /// Style ids that changed on the way in, as `(appended, composed)` pairs.
    pub fn renamed_styles(&self) -> Vec<(&str, &str)> {
        self.maps
            .styles
            .map
            .renamed()
            .map(|(old, new)| (old.as_str(), new.as_str()))
            .collect()
    }

    pub fn num_instances_added(&self) -> usize {
        self.maps.numbering.instance_map.len()
    }

    pub fn relationships_added(&self) -> usize {
        self.maps.relationships.map.len() - self.maps.relationships.reused
    }
}

/// A composition session around one master document.
#[derive(Debug)]
pub struct Composer<C = BodyCopier> {
    master: Document,
    options: ComposeOptions,
    /// Appends attempted so far, failed ones included
    counter: usize,
    copier: C,
    reports: Vec<AppendReport>,
}

impl Composer<BodyCopier> {
    pub fn new(master: Document) -> Self {
        Self::with_options(master, ComposeOptions::default())
    }

    pub fn with_options(master: Document, options: ComposeOptions) -> Self {
        Self {
            master,
            options,
            counter: 0,
            copier: BodyCopier,
            reports: Vec::new(),
        }
    }
}

impl<C: ContentCopier> Composer<C> {
    /// Swap the body content copier.
    pub fn with_copier<D: ContentCopier>(self, copier: D) -> Composer<D> {
        Composer {
            master: self.master,
            options: self.options,
            counter: self.counter,
            copier,
            reports: self.reports,
        }
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// The composed document so far.
    pub fn document(&self) -> &Document {
        &self.master
    }

    pub fn into_document(self) -> Document {
        self.master
    }

    /// Number of append calls made, successful or not.
    pub fn appended_count(&self) -> usize {
        self.counter
    }

    /// Reports of the committed appends, in order.
    pub fn reports(&self) -> &[AppendReport] {
        &self.reports
    }

    /// Append one document to the master.
    ///
    /// The appended document is only read. On error the master is unchanged
    /// and the error names the append index and the catalog that failed.
    pub fn append(&mut self, document: &Document) -> Result<&AppendReport> {
        self.counter += 1;
        let index = self.counter;
        let mut staged = self.master.clone();

        // Phase 1: styles
        let styles = merge_styles(staged.styles_mut(), document.styles(), index, &self.options)
            .map_err(|e| failed(index, Catalog::Styles, e))?;

        // Phase 2: numbering, then the styles that carry numbering
        let numbering = merge_numbering(
            staged.numbering_mut(),
            document.numbering(),
            &styles.map,
            index,
        )
        .map_err(|e| failed(index, Catalog::Numbering, e))?;
        relink_style_numbering(staged.styles_mut(), &styles.inserted, &numbering)
            .map_err(|e| failed(index, Catalog::Styles, e))?;

        // Phase 3: relationships
        let relationships =
            merge_relationships(staged.relationships_mut(), document.relationships(), index)
                .map_err(|e| failed(index, Catalog::Relationships, e))?;

        let maps = AppendMaps {
            document: index,
            styles,
            numbering,
            relationships,
        };

        // Phase 4: body content
        let before = staged.body.len();
        self.copier
            .copy_body(&mut staged, document, &maps)
            .map_err(|e| failed(index, e.catalog().unwrap_or(Catalog::Body), e))?;
        let blocks = staged.body.len().saturating_sub(before);

        drop_untouched_parts(&self.master, &mut staged);

        // Phase 5: validation
        validate(&staged).map_err(|e| failed(index, e.catalog().unwrap_or(Catalog::Body), e))?;

        info!(
            "appended document #{}: {} style(s) inserted, {} collapsed, {} renamed, {} list(s), {} block(s)",
            index,
            maps.styles.inserted.len(),
            maps.styles.collapsed.len(),
            maps.styles.map.renamed().count(),
            maps.numbering.instance_map.len(),
            blocks
        );

        self.master = staged;
        self.reports.push(AppendReport {
            document: index,
            blocks,
            maps,
        });
        Ok(&self.reports[self.reports.len() - 1])
    }
}

/// Compose `master` with every document in `documents`, in order.
pub fn compose<'a>(
    master: Document,
    documents: impl IntoIterator<Item = &'a Document>,
    options: ComposeOptions,
) -> Result<Document> {
    let mut composer = Composer::with_options(master, options);
    for document in documents {
        composer.append(document)?;
    }
    Ok(composer.into_document())
}

fn failed(document: usize, catalog: Catalog, source: Error) -> Error {
    warn!("append of document #{} failed in {}: {}", document, catalog, source);
    Error::Append {
        document,
        catalog,
        source: Box::new(source),
    }
}

/// A part the master did not have stays absent when nothing was merged into it.
fn drop_untouched_parts(master: &Document, staged: &mut Document) {
    if master.styles.is_none() && staged.styles().is_empty() {
        staged.styles = None;
    }
    if master.numbering.is_none() && staged.numbering().is_empty() {
        staged.numbering = None;
    }
    if master.relationships.is_none() && staged.relationships().is_empty() {
        staged.relationships = None;
    }
}
