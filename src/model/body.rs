//! Body content: the parts of paragraphs, runs and tables that point into
//! the catalogs.

use serde::{Deserialize, Serialize};

use super::numbering::NumberingRef;

/// Top-level or table-cell content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Explicit list numbering, overriding whatever the style carries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numbering: Option<NumberingRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }

    pub fn with_numbering(mut self, numbering: NumberingRef) -> Self {
        self.numbering = Some(numbering);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Inline::Run(Run::new(text)));
        self
    }

    pub fn with_inline(mut self, inline: Inline) -> Self {
        self.content.push(inline);
        self
    }

    /// Concatenated text of all runs, hyperlinks included.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for inline in &self.content {
            match inline {
                Inline::Run(run) => text.push_str(&run.text),
                Inline::Hyperlink { runs, .. } => {
                    runs.iter().for_each(|r| text.push_str(&r.text));
                }
                Inline::Drawing { .. } => {}
            }
        }
        text
    }
}

/// Paragraph-level inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inline {
    Run(Run),
    Hyperlink {
        rel_id: String,
        #[serde(default)]
        runs: Vec<Run>,
    },
    Drawing {
        rel_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Character style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            style: None,
            text: text.into(),
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Every paragraph in document order, descending into table cells.
pub fn paragraphs(blocks: &[Block]) -> Vec<&Paragraph> {
    let mut found = Vec::new();
    collect_paragraphs(blocks, &mut found);
    found
}

fn collect_paragraphs<'a>(blocks: &'a [Block], found: &mut Vec<&'a Paragraph>) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => found.push(paragraph),
            Block::Table(table) => {
                for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                    collect_paragraphs(&cell.blocks, found);
                }
            }
        }
    }
}

/// Every table in document order, nested tables included.
pub fn tables(blocks: &[Block]) -> Vec<&Table> {
    let mut found = Vec::new();
    collect_tables(blocks, &mut found);
    found
}

fn collect_tables<'a>(blocks: &'a [Block], found: &mut Vec<&'a Table>) {
    for block in blocks {
        if let Block::Table(table) = block {
            found.push(table);
            for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                collect_tables(&cell.blocks, found);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_body() -> Vec<Block> {
        vec![
            Block::Paragraph(Paragraph::new().with_text("first")),
            Block::Table(Table {
                style: Some("TableGrid".to_string()),
                rows: vec![TableRow {
                    cells: vec![TableCell {
                        blocks: vec![
                            Block::Paragraph(Paragraph::new().with_text("in cell")),
                            Block::Table(Table::default()),
                        ],
                    }],
                }],
            }),
            Block::Paragraph(Paragraph::new().with_text("last")),
        ]
    }

    #[test]
    fn test_paragraphs_in_document_order() {
        let body = nested_body();
        let texts: Vec<String> = paragraphs(&body).iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["first", "in cell", "last"]);
    }

    #[test]
    fn test_tables_include_nested() {
        let body = nested_body();
        assert_eq!(tables(&body).len(), 2);
    }

    #[test]
    fn test_paragraph_text_includes_hyperlinks() {
        let paragraph = Paragraph::new()
            .with_text("see ")
            .with_inline(Inline::Hyperlink {
                rel_id: "rId3".to_string(),
                runs: vec![Run::new("here")],
            })
            .with_inline(Inline::Drawing {
                rel_id: "rId4".to_string(),
                description: None,
            });
        assert_eq!(paragraph.text(), "see here");
    }

    #[test]
    fn test_block_yaml_shape() {
        let yaml = r#"
- paragraph:
    style: Heading1
    content:
      - run:
          text: Title
- table:
    style: TableGrid
    rows: []
"#;
        let blocks: Vec<Block> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Paragraph(p) => {
                assert_eq!(p.style.as_deref(), Some("Heading1"));
                assert_eq!(p.text(), "Title");
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }
}
