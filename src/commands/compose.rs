//! # Compose Command Implementation
//!
//! This module implements the `compose` subcommand, which appends one or more
//! documents to a master document and writes the composed result.
//!
//! ## Functionality
//!
//! - **Sequential Appends**: Documents are appended in the order given, each
//!   one receiving the next `doc<N>_` index.
//! - **Style Policy**: `--preserve-document-styles` (or the same key in the
//!   `--config` file) keeps identically named custom styles apart.
//! - **All-or-nothing Output**: The output file is only written when every
//!   append succeeded.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use docx_compose::config::{self, ComposeOptions};
use docx_compose::model::Document;
use docx_compose::output::{OutputConfig, Status};
use docx_compose::phases::{AppendReport, Composer};

/// Append documents to a master document
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// The master document every other document is appended to.
    #[arg(value_name = "MASTER")]
    pub master: PathBuf,

    /// Documents to append, in order.
    #[arg(value_name = "APPEND", required = true, num_args = 1..)]
    pub documents: Vec<PathBuf>,

    /// Where to write the composed document (.yaml, .yml or .json).
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Keep each document's custom styles distinct instead of merging
    /// identically named ones.
    #[arg(long)]
    pub preserve_document_styles: bool,

    /// Path to a YAML file with composition options.
    ///
    /// Can also be set with the `DOCX_COMPOSE_CONFIG` environment variable.
    /// The `--preserve-document-styles` flag overrides the file.
    #[arg(long, value_name = "FILE", env = "DOCX_COMPOSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `compose` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ComposeArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let options = load_options(&args)?;

    let master = load_document(&args.master)?;
    if !args.quiet {
        println!(
            "{} Composing onto {}",
            out.status(Status::Working),
            out.ident(&args.master.display().to_string())
        );
    }

    let mut composer = Composer::with_options(master, options);
    for path in &args.documents {
        let document = load_document(path)?;
        let report = composer
            .append(&document)
            .map_err(|e| anyhow::anyhow!("Failed to append {}: {}", path.display(), e))?;
        if !args.quiet {
            print_report(&out, path, report);
        }
    }

    composer.document().to_file(&args.output).map_err(|e| {
        anyhow::anyhow!("Failed to write {}: {}", args.output.display(), e)
    })?;

    if !args.quiet {
        println!(
            "{} Wrote {} ({} document(s) appended)",
            out.status(Status::Ok),
            out.ident(&args.output.display().to_string()),
            composer.appended_count()
        );
    }
    Ok(())
}

fn load_options(args: &ComposeArgs) -> Result<ComposeOptions> {
    let mut options = match &args.config {
        Some(path) => config::from_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load config from {}: {}", path.display(), e)
        })?,
        None => ComposeOptions::default(),
    };
    if args.preserve_document_styles {
        options.preserve_document_styles = true;
    }
    Ok(options)
}

fn load_document(path: &Path) -> Result<Document> {
    Document::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load document {}: {}", path.display(), e))
}

fn print_report(out: &OutputConfig, path: &Path, report: &AppendReport) {
    println!(
        "{} #{} {}: {} style(s) added, {} merged, {} list(s), {} block(s)",
        out.status(Status::Info),
        report.document,
        out.ident(&path.display().to_string()),
        report.styles_inserted().len(),
        report.styles_collapsed().len(),
        report.num_instances_added(),
        report.blocks
    );
    for (old, new) in report.renamed_styles() {
        println!("   {} -> {}", out.dim(old), out.ident(new));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MASTER: &str = r#"
styles:
  - style_id: Normal
    type: paragraph
    role: Normal
    is_default: true
  - style_id: Callout
    type: paragraph
    based_on: Normal
body:
  - paragraph:
      content:
        - run:
            text: master
"#;

    const APPENDED: &str = r#"
styles:
  - style_id: Standard
    type: paragraph
    role: normal
    is_default: true
  - style_id: Callout
    type: paragraph
    based_on: Standard
body:
  - paragraph:
      style: Callout
      content:
        - run:
            text: appended
"#;

    fn args(dir: &TempDir) -> ComposeArgs {
        let master = dir.path().join("master.yaml");
        let appended = dir.path().join("appended.yaml");
        fs::write(&master, MASTER).unwrap();
        fs::write(&appended, APPENDED).unwrap();
        ComposeArgs {
            master,
            documents: vec![appended],
            output: dir.path().join("out.yaml"),
            preserve_document_styles: false,
            config: None,
            quiet: true,
        }
    }

    #[test]
    fn test_execute_writes_composed_document() {
        let dir = TempDir::new().unwrap();
        let args = args(&dir);
        let output = args.output.clone();
        execute(args, "never").unwrap();

        let composed = Document::from_file(&output).unwrap();
        assert_eq!(composed.styles().len(), 2);
        assert_eq!(composed.body.len(), 2);
    }

    #[test]
    fn test_preserve_flag_overrides_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("options.yaml");
        fs::write(&config_path, "preserve_document_styles: false\n").unwrap();

        let mut args = args(&dir);
        args.config = Some(config_path);
        args.preserve_document_styles = true;
        let output = args.output.clone();
        execute(args, "never").unwrap();

        let composed = Document::from_file(&output).unwrap();
        assert!(composed.styles().contains("doc1_Callout"));
    }

    #[test]
    fn test_execute_missing_master() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.master = dir.path().join("missing.yaml");
        let output = args.output.clone();

        let err = execute(args, "never").unwrap_err();
        assert!(err.to_string().contains("Failed to load document"));
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_append_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.yaml");
        fs::write(
            &broken,
            "body:\n  - paragraph:\n      style: Ghost\n",
        )
        .unwrap();
        let mut args = args(&dir);
        args.documents.push(broken);
        let output = args.output.clone();

        let err = execute(args, "never").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("broken.yaml"));
        assert!(message.contains("document #2"));
        assert!(!output.exists());
    }
}
