//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a document
//! for the problems a composed document must never have.
//!
//! ## Functionality
//!
//! - **Reference Checks**: Every style, numbering and relationship reference
//!   must resolve, in the catalogs as well as in body content.
//! - **Cycle Detection**: Reports `based_on` chains that loop.
//! - **Uniqueness**: Reports ids used twice within one catalog.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use docx_compose::model::{body, Document};
use docx_compose::output::{OutputConfig, Status};
use docx_compose::phases;

/// Check a document for dangling references and style cycles
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the document to validate (.yaml, .yml or .json).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let path = &args.document;
    println!(
        "{} Validating document: {}",
        out.status(Status::Working),
        out.ident(&path.display().to_string())
    );

    let document = Document::from_file(path).map_err(|e| {
        println!("{} Document could not be read: {}", out.status(Status::Error), e);
        anyhow::anyhow!("Failed to load document {}: {}", path.display(), e)
    })?;

    println!("\n{} Document Summary:", out.status(Status::Info));
    println!("   Styles: {}", document.styles().len());
    println!(
        "   Numbering: {} abstract, {} instance(s)",
        document.numbering().abstract_nums.len(),
        document.numbering().instances.len()
    );
    println!("   Relationships: {}", document.relationships().len());
    println!("   Paragraphs: {}", body::paragraphs(&document.body).len());

    let issues = phases::issues(&document);
    if issues.is_empty() {
        println!("\n{} No problems found", out.status(Status::Ok));
        return Ok(());
    }

    println!();
    for issue in &issues {
        println!("{} {}", out.status(Status::Error), issue);
    }
    Err(anyhow::anyhow!(
        "Validation failed with {} problem(s)",
        issues.len()
    ))
}
