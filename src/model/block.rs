//! Block and text-run types.

use super::Table;
use serde::{Deserialize, Serialize};

/// One normalized content unit, in source document order.
///
/// The loader resolves `page_break_before` exactly once, before blocks
/// reach the flow engine; the engine never inspects raw markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading with its level and inline runs.
    Heading {
        /// Heading level (1 = largest)
        level: u8,
        /// Inline runs making up the heading text
        runs: Vec<TextRun>,
    },

    /// A body paragraph.
    Paragraph {
        /// Inline runs in source order
        runs: Vec<TextRun>,
        /// Author-inserted forced page boundary before this paragraph
        #[serde(default)]
        page_break_before: bool,
    },

    /// A table, always placed as one atomic unit.
    Table(Table),

    /// An originally-empty paragraph, retained as a spacing signal.
    Spacer,
}

impl Block {
    /// Create a heading block from plain text.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            runs: vec![TextRun::new(text)],
        }
    }

    /// Create a paragraph block from plain text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![TextRun::new(text)],
            page_break_before: false,
        }
    }

    /// Create a paragraph block with styled runs.
    pub fn paragraph_with_runs(runs: Vec<TextRun>) -> Self {
        Block::Paragraph {
            runs,
            page_break_before: false,
        }
    }

    /// Create a paragraph preceded by a forced page break.
    pub fn paragraph_after_break(text: impl Into<String>) -> Self {
        Block::Paragraph {
            runs: vec![TextRun::new(text)],
            page_break_before: true,
        }
    }

    /// Get the plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs, .. } => {
                runs.iter().map(|r| r.text.as_str()).collect()
            }
            Block::Table(table) => table.plain_text(),
            Block::Spacer => String::new(),
        }
    }

    /// Check if this block carries a forced page break.
    pub fn has_page_break(&self) -> bool {
        matches!(
            self,
            Block::Paragraph {
                page_break_before: true,
                ..
            }
        )
    }

    /// Check if this block is a paragraph with visible text.
    ///
    /// Only these paragraphs advance the image interleaving cadence.
    pub fn is_flow_paragraph(&self) -> bool {
        match self {
            Block::Paragraph { runs, .. } => runs.iter().any(|r| !r.text.trim().is_empty()),
            _ => false,
        }
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

/// A run of text with consistent inline emphasis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Bold emphasis
    #[serde(default)]
    pub bold: bool,

    /// Italic emphasis
    #[serde(default)]
    pub italic: bool,
}

impl TextRun {
    /// Create a new plain text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
