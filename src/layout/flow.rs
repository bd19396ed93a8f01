//! The flow/pagination engine.

use super::emit;
use super::estimate;
use super::interleave::{ImageInterleaver, SizedImage};
use super::style::{self, Style};
use super::LayoutOptions;
use crate::error::Result;
use crate::model::{Block, Image, PagedDocument, PlacedBlock, TextRun};

/// Placeholder text emitted for a document with no content.
pub const EMPTY_DOCUMENT_NOTICE: &str =
    "This document appears to be empty or could not be processed. \
     Ensure it contains readable text, tables, or images.";

/// The pagination state machine.
///
/// Consumes the block sequence in order, accumulates per-page used
/// height, and decides break points. One engine instance is the scope of
/// all running state (used height, image cursor, paragraph count); it is
/// consumed by a single conversion and never shared.
pub struct FlowEngine<'a> {
    options: &'a LayoutOptions,
    threshold: f32,
    pages: Vec<Vec<PlacedBlock>>,
    current: Vec<PlacedBlock>,
    used_height: f32,
    keep_with_current: bool,
}

impl<'a> FlowEngine<'a> {
    /// Create an engine for one conversion.
    ///
    /// Fails with [`crate::Error::InvalidLayout`] when the options cannot
    /// produce any valid placement.
    pub fn new(options: &'a LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            threshold: options.break_threshold(),
            pages: Vec::new(),
            current: Vec::new(),
            used_height: 0.0,
            keep_with_current: false,
        })
    }

    /// Distribute the block sequence across fixed-size pages.
    ///
    /// Single forward pass, no backtracking. For each block, in order:
    /// a forced break finalizes the current page (even an empty one); the
    /// keep-with-next guard pins a block to its predecessor's page; an
    /// automatic break triggers when accumulated height would pass the
    /// threshold, unless the block is last in the sequence. Images are
    /// interleaved after every Nth non-empty paragraph; leftovers are
    /// appended to the final open page. An empty sequence yields exactly
    /// one page holding one placeholder notice block.
    pub fn paginate(mut self, blocks: &[Block], images: &[Image]) -> Result<PagedDocument> {
        if blocks.is_empty() {
            self.current.push(PlacedBlock::Text {
                runs: vec![TextRun::new(EMPTY_DOCUMENT_NOTICE)],
                style: style::body(),
            });
            self.finalize_page();
            return Ok(emit::assemble(self.pages, &self.options.geometry));
        }

        let mut interleaver = ImageInterleaver::new(images, self.options);
        for (index, block) in blocks.iter().enumerate() {
            let is_last = index + 1 == blocks.len();

            if block.has_page_break() {
                self.finalize_page();
            }

            let style = style::resolve(block);
            let height = estimate::block_height(block, &style, self.options);
            if !self.keep_with_current && !is_last && self.overflows(height) {
                self.finalize_page();
            }
            self.place(placed(block, &style), height);
            self.keep_with_current = style.keep_with_next;

            if block.is_flow_paragraph() {
                if let Some(sized) = interleaver.after_paragraph() {
                    self.place_image(sized);
                }
            }
        }

        // Leftover images go to the final open page, in order, with no
        // further break checks.
        while let Some(sized) = interleaver.next_remaining() {
            let height = estimate::image_height(self.options);
            self.place(
                PlacedBlock::Image {
                    index: sized.index,
                    width: sized.width,
                    height: sized.height,
                },
                height,
            );
        }

        self.finalize_page();
        Ok(emit::assemble(self.pages, &self.options.geometry))
    }

    /// Would placing `height` more units overrun the page budget?
    ///
    /// A break from an empty page can free no space, so an unfilled page
    /// never overflows.
    fn overflows(&self, height: f32) -> bool {
        self.used_height > 0.0 && self.used_height + height > self.threshold
    }

    /// Place an image atomically: it either fits or triggers a break
    /// before itself, never across the boundary.
    fn place_image(&mut self, sized: SizedImage) {
        let height = estimate::image_height(self.options);
        if !self.keep_with_current && self.overflows(height) {
            self.finalize_page();
        }
        self.place(
            PlacedBlock::Image {
                index: sized.index,
                width: sized.width,
                height: sized.height,
            },
            height,
        );
        self.keep_with_current = false;
    }

    fn place(&mut self, unit: PlacedBlock, height: f32) {
        self.current.push(unit);
        self.used_height += height;
    }

    /// Finalize the open page and start accumulating a fresh one.
    /// Finalized pages are never reopened.
    fn finalize_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.used_height = 0.0;
        self.keep_with_current = false;
    }
}

fn placed(block: &Block, style: &Style) -> PlacedBlock {
    match block {
        Block::Heading { runs, .. } | Block::Paragraph { runs, .. } => PlacedBlock::Text {
            runs: runs.clone(),
            style: *style,
        },
        Block::Table(table) => PlacedBlock::Table(table.clone()),
        Block::Spacer => PlacedBlock::Spacer {
            height: style.leading,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PageGeometry;

    fn engine(options: &LayoutOptions) -> FlowEngine<'_> {
        FlowEngine::new(options).unwrap()
    }

    #[test]
    fn test_empty_sequence_yields_placeholder_page() {
        let options = LayoutOptions::default();
        let doc = engine(&options).paginate(&[], &[]).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].block_count(), 1);
        assert!(doc.plain_text().contains("appears to be empty"));
    }

    #[test]
    fn test_single_block_single_page() {
        let options = LayoutOptions::default();
        let blocks = vec![Block::paragraph("hello")];
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].block_count(), 1);
    }

    #[test]
    fn test_forced_break_finalizes_even_empty_page() {
        let options = LayoutOptions::default();
        let blocks = vec![Block::paragraph_after_break("starts on page two")];
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        assert_eq!(doc.page_count(), 2);
        assert!(doc.pages[0].is_empty());
        assert_eq!(doc.pages[1].block_count(), 1);
    }

    #[test]
    fn test_automatic_break_on_overflow() {
        // usable_height 650, threshold 552.5; each 800-char paragraph
        // estimates 10 lines * 14.4 = 144 units.
        let options = LayoutOptions::default()
            .with_geometry(PageGeometry::new(595.0, 750.0, 50.0))
            .with_chars_per_line(80);
        let blocks: Vec<Block> = (0..7).map(|_| Block::paragraph("x".repeat(800))).collect();
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        assert!(doc.page_count() >= 2);
        for page in &doc.pages {
            assert!(!page.is_empty());
        }
    }

    #[test]
    fn test_no_break_before_last_block() {
        let options = LayoutOptions::default()
            .with_geometry(PageGeometry::new(595.0, 750.0, 50.0))
            .with_chars_per_line(80);
        // Fill close to the threshold, then add one final tall paragraph.
        let mut blocks: Vec<Block> =
            (0..3).map(|_| Block::paragraph("x".repeat(800))).collect();
        blocks.push(Block::paragraph("y".repeat(1600)));
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        // The last block is placed on the open page rather than breaking.
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn test_keep_with_next_holds_heading_and_successor() {
        let options = LayoutOptions::default()
            .with_geometry(PageGeometry::new(595.0, 750.0, 50.0))
            .with_chars_per_line(80);
        // Three paragraphs fill 432 of 552.5; the heading (36) fits at
        // 468, and the following paragraph must stay with it despite
        // overflowing the threshold.
        let mut blocks: Vec<Block> =
            (0..3).map(|_| Block::paragraph("x".repeat(800))).collect();
        blocks.push(Block::heading(1, "Section"));
        blocks.push(Block::paragraph("z".repeat(800)));
        blocks.push(Block::paragraph("w".repeat(800)));
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        let heading_page = doc
            .pages
            .iter()
            .position(|p| p.plain_text().contains("Section"))
            .unwrap();
        assert!(doc.pages[heading_page]
            .plain_text()
            .contains(&"z".repeat(800)));
    }

    #[test]
    fn test_table_is_atomic() {
        let options = LayoutOptions::default()
            .with_geometry(PageGeometry::new(595.0, 750.0, 50.0));
        let grid: Vec<Vec<String>> = (0..4)
            .map(|i| vec![format!("r{i}c0"), format!("r{i}c1")])
            .collect();
        let table = crate::model::Table::from_grid(&grid).unwrap();
        let mut blocks: Vec<Block> =
            (0..3).map(|_| Block::paragraph("x".repeat(800))).collect();
        blocks.push(Block::Table(table));
        blocks.push(Block::paragraph("tail"));
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        // Exactly one page holds the table, with all four rows.
        let table_pages: Vec<_> = doc
            .pages
            .iter()
            .filter(|p| p.elements.iter().any(|b| b.is_table()))
            .collect();
        assert_eq!(table_pages.len(), 1);
        let placed = table_pages[0]
            .elements
            .iter()
            .find_map(|b| match b {
                PlacedBlock::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(placed.row_count(), 4);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = LayoutOptions::default().with_chars_per_line(0);
        assert!(FlowEngine::new(&options).is_err());
    }

    #[test]
    fn test_spacer_is_placed() {
        let options = LayoutOptions::default();
        let blocks = vec![
            Block::paragraph("above"),
            Block::Spacer,
            Block::paragraph("below"),
        ];
        let doc = engine(&options).paginate(&blocks, &[]).unwrap();

        assert_eq!(doc.pages[0].block_count(), 3);
        assert!(matches!(
            doc.pages[0].elements[1],
            PlacedBlock::Spacer { .. }
        ));
    }
}
