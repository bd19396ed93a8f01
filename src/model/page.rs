//! Page-level output types.

use super::{Table, TextRun};
use crate::layout::Style;
use serde::{Deserialize, Serialize};

/// The paginated intermediate produced by the flow engine.
///
/// A downstream renderer must treat each page as atomic and must not
/// re-flow content across the boundaries the engine decided. Pages are
/// never merged or reopened after finalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedDocument {
    /// Pages in order
    pub pages: Vec<Page>,
}

impl PagedDocument {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A single finalized page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in layout units
    pub width: f32,

    /// Page height in layout units
    pub height: f32,

    /// Placed units on the page, in order
    pub elements: Vec<PlacedBlock>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|block| match block {
                PlacedBlock::Text { runs, .. } => {
                    Some(runs.iter().map(|r| r.text.as_str()).collect::<String>())
                }
                PlacedBlock::Table(table) => Some(table.plain_text()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page has no content.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of placed units on the page.
    pub fn block_count(&self) -> usize {
        self.elements.len()
    }

    /// Iterate the placed images on this page, in order.
    pub fn images(&self) -> impl Iterator<Item = (usize, f32, f32)> + '_ {
        self.elements.iter().filter_map(|block| match block {
            PlacedBlock::Image {
                index,
                width,
                height,
            } => Some((*index, *width, *height)),
            _ => None,
        })
    }
}

/// A placed, fully-styled unit on a finalized page.
///
/// There is no break variant: explicit and automatic break directives are
/// consumed by the flow engine and cannot survive into a page's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacedBlock {
    /// A styled text block (heading or paragraph)
    Text {
        /// Inline runs in source order
        runs: Vec<TextRun>,
        /// Resolved layout style
        style: Style,
    },

    /// A table, wholly contained on this page
    Table(Table),

    /// A sized image reference
    Image {
        /// Index into the source media sequence
        index: usize,
        /// Draw width in layout units
        width: f32,
        /// Draw height in layout units
        height: f32,
    },

    /// Vertical spacing carried over from an empty source paragraph
    Spacer {
        /// Spacer height in layout units
        height: f32,
    },
}

impl PlacedBlock {
    /// Check if this unit is a text block.
    pub fn is_text(&self) -> bool {
        matches!(self, PlacedBlock::Text { .. })
    }

    /// Check if this unit is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, PlacedBlock::Table(_))
    }

    /// Check if this unit is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, PlacedBlock::Image { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;

    #[test]
    fn test_page_plain_text() {
        let mut page = Page::new(1, 595.0, 842.0);
        page.elements.push(PlacedBlock::Text {
            runs: vec![TextRun::new("Hello "), TextRun::bold("world")],
            style: layout::body(),
        });
        page.elements.push(PlacedBlock::Spacer { height: 6.0 });

        assert_eq!(page.plain_text(), "Hello world");
        assert_eq!(page.block_count(), 2);
    }

    #[test]
    fn test_get_page_is_one_indexed() {
        let doc = PagedDocument {
            pages: vec![Page::new(1, 595.0, 842.0), Page::new(2, 595.0, 842.0)],
        };

        assert_eq!(doc.page_count(), 2);
        assert!(doc.get_page(0).is_none());
        assert_eq!(doc.get_page(1).unwrap().number, 1);
        assert_eq!(doc.get_page(2).unwrap().number, 2);
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_page_images_iterator() {
        let mut page = Page::new(1, 595.0, 842.0);
        page.elements.push(PlacedBlock::Image {
            index: 0,
            width: 288.0,
            height: 216.0,
        });
        page.elements.push(PlacedBlock::Image {
            index: 1,
            width: 100.0,
            height: 50.0,
        });

        let images: Vec<_> = page.images().collect();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].0, 0);
        assert_eq!(images[1].0, 1);
    }
}
