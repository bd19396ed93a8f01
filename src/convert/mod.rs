//! Document conversion: normalize, paginate, report.
//!
//! A single conversion is one synchronous pass over one document; batch
//! conversion runs documents in parallel with no shared mutable state,
//! and a fatal failure for one document never prevents the others from
//! completing.

use crate::error::Result;
use crate::layout::{FlowEngine, LayoutOptions};
use crate::loader::{self, DocumentInput};
use crate::model::{Block, PagedDocument};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Layout calibration and page geometry
    pub layout: LayoutOptions,

    /// Prepend a title heading derived from the input's title
    pub include_title: bool,

    /// Collect layout statistics during conversion
    pub collect_stats: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Enable or disable the prepended title heading.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

/// Result of one document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The paginated document
    pub document: PagedDocument,

    /// Layout statistics (if collected)
    pub stats: Option<LayoutStats>,
}

impl ConvertResult {
    /// Get the output page count.
    pub fn page_count(&self) -> u32 {
        self.document.page_count()
    }
}

/// Counters describing one conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Canonical blocks handed to the engine
    pub blocks: usize,

    /// Paragraphs with visible text
    pub paragraphs: usize,

    /// Tables that survived the block builder
    pub tables: usize,

    /// Blocks carrying a forced page break
    pub forced_breaks: usize,

    /// Images placed into the output
    pub images_placed: usize,

    /// Output page count
    pub pages: u32,
}

impl LayoutStats {
    fn collect(blocks: &[Block], document: &PagedDocument) -> Self {
        Self {
            blocks: blocks.len(),
            paragraphs: blocks.iter().filter(|b| b.is_flow_paragraph()).count(),
            tables: blocks.iter().filter(|b| b.is_table()).count(),
            forced_breaks: blocks.iter().filter(|b| b.has_page_break()).count(),
            images_placed: document
                .pages
                .iter()
                .map(|p| p.images().count())
                .sum(),
            pages: document.page_count(),
        }
    }
}

/// Convert one document input into a paginated document.
///
/// Either runs to completion or fails atomically; no partial output is
/// returned on failure.
pub fn convert(input: &DocumentInput, options: &ConvertOptions) -> Result<ConvertResult> {
    let mut blocks = loader::normalize(input);

    if options.include_title {
        if let Some(title) = input.title.as_deref() {
            if blocks.is_empty() {
                blocks.push(Block::paragraph(format!(
                    "The document '{title}' appears to be empty or could not be \
                     processed. Ensure it contains readable text, tables, or images."
                )));
            }
            blocks.insert(0, Block::Spacer);
            blocks.insert(0, Block::heading(1, format!("Document: {title}")));
        }
    }

    let engine = FlowEngine::new(&options.layout)?;
    let document = engine.paginate(&blocks, &input.images)?;
    let stats = options
        .collect_stats
        .then(|| LayoutStats::collect(&blocks, &document));

    Ok(ConvertResult { document, stats })
}

/// Parse a JSON document payload and convert it.
pub fn convert_json(payload: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    let input = DocumentInput::from_json(payload)?;
    convert(&input, options)
}

/// Convert a batch of JSON document payloads in parallel.
///
/// Each document converts independently on the rayon pool, owning its
/// page accumulator and image references; results come back in input
/// order, one per payload, and a failure in one document leaves the
/// others untouched.
pub fn convert_json_batch<S>(payloads: &[S], options: &ConvertOptions) -> Vec<Result<ConvertResult>>
where
    S: AsRef<str> + Sync,
{
    payloads
        .par_iter()
        .map(|payload| convert_json(payload.as_ref(), options))
        .collect()
}
