//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let composed = compose_fixtures("styles_en.yaml", &["styles_de.yaml"], ComposeOptions::default());
//!     assert!(style_ids(&composed).contains(&"MyStyle1".to_string()));
//! }
//! ```

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;
use docx_compose::config::ComposeOptions;
use docx_compose::model::{Block, Document, Paragraph};
use docx_compose::phases::Composer;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{
        compose_fixtures, fixture, fixture_path, paragraph_with_text, style_ids, TestFixture,
    };
    #[allow(unused_imports)]
    pub use docx_compose::config::ComposeOptions;
}

/// Path of a document under `tests/testdata`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Load a document from `tests/testdata`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> Document {
    Document::from_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("fixture {name} should load: {e}"))
}

/// Compose `master` with every document in `appended`, in order.
#[allow(dead_code)]
pub fn compose_fixtures(master: &str, appended: &[&str], options: ComposeOptions) -> Document {
    let mut composer = Composer::with_options(fixture(master), options);
    for name in appended {
        composer
            .append(&fixture(name))
            .unwrap_or_else(|e| panic!("appending {name} should succeed: {e}"));
    }
    composer.into_document()
}

/// Style ids of a document, in catalog order.
#[allow(dead_code)]
pub fn style_ids(document: &Document) -> Vec<String> {
    document.styles().ids().map(str::to_string).collect()
}

/// The top-level paragraph whose text is `text`.
#[allow(dead_code)]
pub fn paragraph_with_text<'a>(document: &'a Document, text: &str) -> &'a Paragraph {
    document
        .body
        .iter()
        .find_map(|block| match block {
            Block::Paragraph(p) if p.text() == text => Some(p),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no paragraph with text {text:?}"))
}

/// A temporary directory pre-populated with fixture documents.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Copy documents from `tests/testdata` into the directory.
    pub fn with_fixtures(self, names: &[&str]) -> Self {
        for name in names {
            self.temp_dir
                .child(name)
                .write_file(&fixture_path(name))
                .expect("Failed to copy fixture");
        }
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A command for the binary, running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docx-compose");
        cmd.current_dir(self.path()).env_remove("DOCX_COMPOSE_CONFIG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
