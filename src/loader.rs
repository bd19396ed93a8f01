//! Loading adapter: canonical block lists from pre-parsed input.
//!
//! Container extraction (reading a zip-based package, pulling media
//! streams) happens upstream of this crate. The adapter receives the
//! loader's output (ordered raw paragraphs and table grids with break
//! flags already resolved) and normalizes it into the [`Block`] model.
//! The flow engine never sees raw markup: `page_break_before` is a
//! load-time fact, resolved exactly once, canonical from here on.

use crate::error::{Error, Result};
use crate::model::{Block, Image, Table, TextRun};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One document handed to the engine: ordered content plus extracted
/// media, in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInput {
    /// Document title, if known
    #[serde(default)]
    pub title: Option<String>,

    /// Raw content blocks in source document order
    #[serde(default)]
    pub blocks: Vec<InputBlock>,

    /// Extracted images in source media order
    #[serde(default)]
    pub images: Vec<Image>,
}

impl DocumentInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a document input from a JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|e| Error::MalformedInput(e.to_string()))
    }

    /// Read and parse a document input from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let payload = fs::read_to_string(path)?;
        Self::from_json(&payload)
    }
}

/// A raw content unit as produced by the upstream loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputBlock {
    /// A raw paragraph with its source style name and break flag
    Paragraph(InputParagraph),

    /// A raw table grid
    Table {
        /// Row-major cell texts, possibly ragged or blank
        rows: Vec<Vec<String>>,
    },
}

/// A raw paragraph: runs plus loader-resolved facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputParagraph {
    /// Inline runs in source order
    pub runs: Vec<TextRun>,

    /// Source style name (e.g. "Heading 1"), if any
    #[serde(default)]
    pub style_name: Option<String>,

    /// Forced page boundary before this paragraph, resolved at load time
    #[serde(default)]
    pub page_break_before: bool,
}

impl InputParagraph {
    /// Create a plain paragraph from text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::new(text)],
            ..Self::default()
        }
    }

    /// Set the source style name and return self.
    pub fn with_style(mut self, style_name: impl Into<String>) -> Self {
        self.style_name = Some(style_name.into());
        self
    }

    /// Mark a forced page break before this paragraph and return self.
    pub fn with_page_break(mut self) -> Self {
        self.page_break_before = true;
        self
    }
}

/// Normalize raw input blocks into the canonical block sequence.
///
/// Source order is preserved exactly. Paragraphs with a heading style
/// name become [`Block::Heading`]; paragraphs with no visible text
/// become [`Block::Spacer`]; table grids run through the table block
/// builder and are dropped, with a warning, when nothing survives.
pub fn normalize(input: &DocumentInput) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(input.blocks.len());
    for (index, raw) in input.blocks.iter().enumerate() {
        match raw {
            InputBlock::Paragraph(p) => {
                let visible = p.runs.iter().any(|r| !r.text.trim().is_empty());
                if !visible {
                    blocks.push(Block::Spacer);
                    continue;
                }
                match p.style_name.as_deref().and_then(heading_level) {
                    Some(level) => blocks.push(Block::Heading {
                        level,
                        runs: p.runs.clone(),
                    }),
                    None => blocks.push(Block::Paragraph {
                        runs: p.runs.clone(),
                        page_break_before: p.page_break_before,
                    }),
                }
            }
            InputBlock::Table { rows } => match Table::from_grid(rows) {
                Some(table) => blocks.push(Block::Table(table)),
                None => log::warn!("dropping table at block {index}: no non-empty rows"),
            },
        }
    }
    blocks
}

/// Parse a heading level from a source style name.
///
/// Accepts "Heading", "Heading 1", "heading2" and similar; a bare
/// "Heading" maps to level 1.
fn heading_level(style_name: &str) -> Option<u8> {
    let trimmed = style_name.trim();
    let prefix = trimmed.get(..7)?;
    if !prefix.eq_ignore_ascii_case("heading") {
        return None;
    }
    let rest = trimmed[7..].trim();
    if rest.is_empty() {
        return Some(1);
    }
    rest.parse::<u8>().ok().filter(|&level| level >= 1)
}

/// Probe raw media bytes for image dimensions.
///
/// A unit that cannot be decoded is skipped with a warning; extraction
/// continues, and later images keep their source order. Skipping a unit
/// shifts the planned interleaving cadence by one.
pub fn load_images<I>(media: I) -> Vec<Image>
where
    I: IntoIterator<Item = Vec<u8>>,
{
    let mut images = Vec::new();
    for (index, bytes) in media.into_iter().enumerate() {
        match Image::from_bytes(bytes) {
            Ok(image) => images.push(image),
            Err(e) => log::warn!("could not extract image {index}: {e}"),
        }
    }
    images
}
