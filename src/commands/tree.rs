//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the style
//! inheritance (`based_on`) hierarchy of a document.
//!
//! Styles without a parent are the roots. Styles caught in an inheritance
//! cycle are not reachable from any root and are listed separately.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use docx_compose::model::{Document, StyleCatalog, StyleDefinition};

/// Display the style inheritance tree of a document
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the document (.yaml, .yml or .json).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root styles, 1 to add their direct children, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let path = &args.document;
    println!("🌳 Style inheritance tree for: {}", path.display());

    let document = Document::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load document {}: {}", path.display(), e))?;

    let (root, unreachable) = build_tree(document.styles(), args.depth.unwrap_or(usize::MAX));
    print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    if !unreachable.is_empty() {
        println!("⚠️  Not reachable from a root (inheritance cycle): {}", unreachable.join(", "));
    }
    Ok(())
}

/// Build the display tree under a synthetic root, returning the ids that no
/// root reaches.
fn build_tree(styles: &StyleCatalog, max_depth: usize) -> (TreeNode, Vec<String>) {
    let mut visited = HashSet::new();
    let roots: Vec<TreeNode> = styles
        .iter()
        .filter(|s| s.based_on.as_deref().map_or(true, |p| !styles.contains(p)))
        .map(|s| build_node(styles, s, max_depth, 0, &mut visited))
        .collect();

    let unreachable = styles
        .ids()
        .filter(|id| !visited.contains(*id))
        .map(str::to_string)
        .collect();

    let root = TreeNode {
        label: format!("{} style(s)", styles.len()),
        children: roots,
    };
    (root, unreachable)
}

fn build_node(
    styles: &StyleCatalog,
    style: &StyleDefinition,
    max_depth: usize,
    current_depth: usize,
    visited: &mut HashSet<String>,
) -> TreeNode {
    visited.insert(style.style_id.clone());
    // a repeated id would otherwise re-enter its own subtree
    let children = styles
        .iter()
        .filter(|child| child.based_on.as_deref() == Some(style.style_id.as_str()))
        .filter(|child| !visited.contains(&child.style_id))
        .collect::<Vec<_>>();

    let children = if current_depth >= max_depth {
        // still mark the hidden subtree as reachable
        mark_reachable(styles, &children, visited);
        Vec::new()
    } else {
        children
            .into_iter()
            .map(|child| build_node(styles, child, max_depth, current_depth + 1, visited))
            .collect()
    };

    TreeNode {
        label: label(style),
        children,
    }
}

fn mark_reachable(styles: &StyleCatalog, pending: &[&StyleDefinition], visited: &mut HashSet<String>) {
    for style in pending {
        if visited.insert(style.style_id.clone()) {
            let children: Vec<_> = styles
                .iter()
                .filter(|c| c.based_on.as_deref() == Some(style.style_id.as_str()))
                .collect();
            mark_reachable(styles, &children, visited);
        }
    }
}

fn label(style: &StyleDefinition) -> String {
    let mut label = style.style_id.clone();
    let mut details = vec![format!("{:?}", style.style_type).to_lowercase()];
    if let Some(role) = style.role {
        details.push(format!("built-in: {}", role));
        let canonical = role.canonical_id();
        if canonical != style.style_id {
            details.push(format!("canonical id: {}", canonical));
        }
    }
    if style.is_default {
        details.push("default".to_string());
    }
    label.push_str(&format!(" ({})", details.join(", ")));
    label
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: Write>(&self, f: &mut W, _style: &ptree::Style) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
