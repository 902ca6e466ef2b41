//! # Document Composition Library
//!
//! This library merges several word-processing documents into one. It is the
//! engine behind the `docx-compose` command-line tool but can be embedded in
//! any application that needs to concatenate documents without breaking
//! their styles, lists or links.
//!
//! ## Quick Example
//!
//! ```
//! use docx_compose::model::{Block, Document, Paragraph, StyleCatalog, StyleDefinition, StyleType};
//! use docx_compose::phases::Composer;
//!
//! let master = Document {
//!     styles: Some(StyleCatalog::from_styles(vec![
//!         StyleDefinition::new("Callout", StyleType::Paragraph),
//!     ])),
//!     ..Document::default()
//! };
//! let appended = Document {
//!     styles: Some(StyleCatalog::from_styles(vec![
//!         StyleDefinition::new("Callout", StyleType::Paragraph),
//!         StyleDefinition::new("Aside", StyleType::Paragraph).with_based_on("Callout"),
//!     ])),
//!     body: vec![Block::Paragraph(Paragraph::new().with_style("Aside").with_text("hi"))],
//!     ..Document::default()
//! };
//!
//! let mut composer = Composer::new(master);
//! composer.append(&appended).unwrap();
//!
//! let composed = composer.into_document();
//! assert_eq!(composed.styles().len(), 2);
//! assert_eq!(composed.body.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Model (`model`)**: Documents as catalogs (styles, numbering,
//!   relationships) plus body content that references them by id.
//! - **Remapping (`remap`)**: Collision-free id allocation per namespace, with
//!   the old → new maps every later step reads.
//! - **Built-in detection (`filter`)**: Predefined styles are recognized by
//!   their semantic role, so a German `berschrift1` and an English
//!   `Heading1` are the same style.
//! - **Merges (`merge`)**: One merge per catalog, each producing an id map.
//! - **Phases (`phases`)**: The composer that runs the merges, copies body
//!   content and validates the result, committing each append atomically.
//!
//! ## Execution Flow
//!
//! Every call to [`phases::Composer::append`] runs:
//!
//! 1.  **Styles**: assign ids, then relink inheritance and pairing.
//! 2.  **Numbering**: remap abstract definitions and instances.
//! 3.  **Relationships**: remap hyperlink and image relationships.
//! 4.  **Content**: copy the body, rewriting every reference.
//! 5.  **Validation**: refuse the append if anything would dangle.

pub mod config;
pub mod error;
pub mod filter;
pub mod merge;
pub mod model;
pub mod output;
pub mod phases;
pub mod remap;

#[cfg(test)]
mod remap_proptest;
