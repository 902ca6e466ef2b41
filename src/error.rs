//! # Error Handling
//!
//! This module defines the centralized error type for document composition.
//! It uses the `thiserror` library to describe every failure an append can
//! surface, with enough context to tell which document and which catalog
//! went wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing all failures of the library.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A document that simply lacks a style, numbering or relationship part is
//! not an error: an absent part reads as an empty catalog.

use std::fmt;

use thiserror::Error;

/// The catalog a failure was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Styles,
    Numbering,
    Relationships,
    Body,
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Catalog::Styles => "styles",
            Catalog::Numbering => "numbering",
            Catalog::Relationships => "relationships",
            Catalog::Body => "body",
        };
        f.write_str(name)
    }
}

/// Main error type for composition operations
#[derive(Error, Debug)]
pub enum Error {
    /// A style, numbering or relationship reference does not resolve.
    ///
    /// Raised when an input document is malformed; the append that hit it is
    /// aborted without touching the master.
    #[error("Unresolvable {catalog} reference '{id}' (referenced by {referenced_by})")]
    UnresolvableReference {
        catalog: Catalog,
        id: String,
        referenced_by: String,
    },

    /// No further unique identifier could be produced in a namespace.
    #[error("Identifier namespace '{namespace}' exhausted while allocating '{requested}'")]
    IdentifierExhaustion { namespace: String, requested: String },

    /// Two entries of one catalog share an id.
    #[error("Duplicate {catalog} identifier '{id}'")]
    DuplicateIdentifier { catalog: Catalog, id: String },

    /// A `based_on` chain loops back onto itself.
    #[error("Cycle detected in style inheritance: {cycle}")]
    CycleDetected { cycle: String },

    /// An append failed; wraps the underlying cause with its location.
    #[error("Failed to append document #{document} ({catalog}): {source}")]
    Append {
        document: usize,
        catalog: Catalog,
        #[source]
        source: Box<Error>,
    },

    /// A document file could not be interpreted.
    #[error("Document format error in {path}: {message}")]
    DocumentFormat { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The catalog this error concerns, when it is tied to one.
    pub fn catalog(&self) -> Option<Catalog> {
        match self {
            Error::UnresolvableReference { catalog, .. } => Some(*catalog),
            Error::DuplicateIdentifier { catalog, .. } => Some(*catalog),
            Error::CycleDetected { .. } => Some(Catalog::Styles),
            Error::Append { catalog, .. } => Some(*catalog),
            _ => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
