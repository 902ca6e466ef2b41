//! Locale-independent identity of predefined styles.
//!
//! A document authored in German calls its first heading style
//! `berschrift1` and displays it as "Überschrift 1", yet it plays exactly the
//! same role as `Heading1` in an English document. The package format keeps
//! that role in the style's internal name (`heading 1`), which never gets
//! translated. `BuiltinRole` captures the role so built-in detection never
//! has to compare ids or display names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed semantic role of a predefined style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BuiltinRole {
    Normal,
    /// Heading levels 1 through 9.
    Heading(u8),
    Title,
    Subtitle,
    Quote,
    IntenseQuote,
    Strong,
    Emphasis,
    ListParagraph,
    ListBullet,
    ListNumber,
    Caption,
    Header,
    Footer,
    FootnoteText,
    FootnoteReference,
    Hyperlink,
    /// Table of contents levels 1 through 9.
    Toc(u8),
    TocHeading,
    NoSpacing,
    DefaultParagraphFont,
    NormalTable,
    TableGrid,
    NoList,
    BalloonText,
}

impl BuiltinRole {
    /// The internal style name the package format uses for this role.
    pub fn canonical_name(&self) -> String {
        match self {
            BuiltinRole::Heading(level) => format!("heading {}", level),
            BuiltinRole::Toc(level) => format!("toc {}", level),
            other => other.fixed_name().to_string(),
        }
    }

    /// The style id an English-authored document uses for this role.
    pub fn canonical_id(&self) -> String {
        match self {
            BuiltinRole::Heading(level) => format!("Heading{}", level),
            BuiltinRole::Toc(level) => format!("TOC{}", level),
            BuiltinRole::Normal => "Normal".to_string(),
            BuiltinRole::Title => "Title".to_string(),
            BuiltinRole::Subtitle => "Subtitle".to_string(),
            BuiltinRole::Quote => "Quote".to_string(),
            BuiltinRole::IntenseQuote => "IntenseQuote".to_string(),
            BuiltinRole::Strong => "Strong".to_string(),
            BuiltinRole::Emphasis => "Emphasis".to_string(),
            BuiltinRole::ListParagraph => "ListParagraph".to_string(),
            BuiltinRole::ListBullet => "ListBullet".to_string(),
            BuiltinRole::ListNumber => "ListNumber".to_string(),
            BuiltinRole::Caption => "Caption".to_string(),
            BuiltinRole::Header => "Header".to_string(),
            BuiltinRole::Footer => "Footer".to_string(),
            BuiltinRole::FootnoteText => "FootnoteText".to_string(),
            BuiltinRole::FootnoteReference => "FootnoteReference".to_string(),
            BuiltinRole::Hyperlink => "Hyperlink".to_string(),
            BuiltinRole::TocHeading => "TOCHeading".to_string(),
            BuiltinRole::NoSpacing => "NoSpacing".to_string(),
            BuiltinRole::DefaultParagraphFont => "DefaultParagraphFont".to_string(),
            BuiltinRole::NormalTable => "TableNormal".to_string(),
            BuiltinRole::TableGrid => "TableGrid".to_string(),
            BuiltinRole::NoList => "NoList".to_string(),
            BuiltinRole::BalloonText => "BalloonText".to_string(),
        }
    }

    /// Look up a role by its internal style name, ignoring case.
    pub fn from_canonical_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();

        if let Some(level) = name.strip_prefix("heading ") {
            return parse_level(level).map(BuiltinRole::Heading);
        }
        if let Some(level) = name.strip_prefix("toc ") {
            return parse_level(level).map(BuiltinRole::Toc);
        }

        FIXED_ROLES
            .iter()
            .copied()
            .find(|role| role.fixed_name().eq_ignore_ascii_case(&name))
    }

    fn fixed_name(&self) -> &'static str {
        match self {
            BuiltinRole::Normal => "Normal",
            BuiltinRole::Title => "Title",
            BuiltinRole::Subtitle => "Subtitle",
            BuiltinRole::Quote => "Quote",
            BuiltinRole::IntenseQuote => "Intense Quote",
            BuiltinRole::Strong => "Strong",
            BuiltinRole::Emphasis => "Emphasis",
            BuiltinRole::ListParagraph => "List Paragraph",
            BuiltinRole::ListBullet => "List Bullet",
            BuiltinRole::ListNumber => "List Number",
            BuiltinRole::Caption => "caption",
            BuiltinRole::Header => "header",
            BuiltinRole::Footer => "footer",
            BuiltinRole::FootnoteText => "footnote text",
            BuiltinRole::FootnoteReference => "footnote reference",
            BuiltinRole::Hyperlink => "Hyperlink",
            BuiltinRole::TocHeading => "TOC Heading",
            BuiltinRole::NoSpacing => "No Spacing",
            BuiltinRole::DefaultParagraphFont => "Default Paragraph Font",
            BuiltinRole::NormalTable => "Normal Table",
            BuiltinRole::TableGrid => "Table Grid",
            BuiltinRole::NoList => "No List",
            BuiltinRole::BalloonText => "Balloon Text",
            BuiltinRole::Heading(_) | BuiltinRole::Toc(_) => "",
        }
    }
}

const FIXED_ROLES: &[BuiltinRole] = &[
    BuiltinRole::Normal,
    BuiltinRole::Title,
    BuiltinRole::Subtitle,
    BuiltinRole::Quote,
    BuiltinRole::IntenseQuote,
    BuiltinRole::Strong,
    BuiltinRole::Emphasis,
    BuiltinRole::ListParagraph,
    BuiltinRole::ListBullet,
    BuiltinRole::ListNumber,
    BuiltinRole::Caption,
    BuiltinRole::Header,
    BuiltinRole::Footer,
    BuiltinRole::FootnoteText,
    BuiltinRole::FootnoteReference,
    BuiltinRole::Hyperlink,
    BuiltinRole::TocHeading,
    BuiltinRole::NoSpacing,
    BuiltinRole::DefaultParagraphFont,
    BuiltinRole::NormalTable,
    BuiltinRole::TableGrid,
    BuiltinRole::NoList,
    BuiltinRole::BalloonText,
];

fn parse_level(level: &str) -> Option<u8> {
    level
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|level| (1..=9).contains(level))
}

impl fmt::Display for BuiltinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl TryFrom<String> for BuiltinRole {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        BuiltinRole::from_canonical_name(&value)
            .ok_or_else(|| format!("unknown built-in style role '{}'", value))
    }
}

impl From<BuiltinRole> for String {
    fn from(role: BuiltinRole) -> Self {
        role.canonical_name()
    }
}
