//! Image interleaving.

use super::LayoutOptions;
use crate::model::Image;

/// An image with its computed draw size, ready for placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedImage {
    /// Index into the source media sequence
    pub index: usize,

    /// Draw width in layout units
    pub width: f32,

    /// Draw height in layout units
    pub height: f32,
}

/// Decides where extracted images are inserted relative to text blocks.
///
/// After every Nth non-empty paragraph (the cadence), the next unplaced
/// image is handed out. Images keep source media order and are never
/// reordered or duplicated. A degenerate (zero-dimension) image is
/// skipped with a warning; its cadence slot is lost, and later images do
/// not renumber to fill the gap.
pub struct ImageInterleaver<'a> {
    images: &'a [Image],
    cursor: usize,
    paragraphs_seen: usize,
    cadence: usize,
    max_width: f32,
    max_height: f32,
}

impl<'a> ImageInterleaver<'a> {
    /// Create an interleaver over the document's extracted images.
    pub fn new(images: &'a [Image], options: &LayoutOptions) -> Self {
        Self {
            images,
            cursor: 0,
            paragraphs_seen: 0,
            cadence: options.image_cadence,
            max_width: options.max_image_width,
            max_height: options.max_image_height,
        }
    }

    /// Record a placed non-empty paragraph; on a cadence hit, hand out
    /// the next unplaced image.
    ///
    /// A cadence slot consumes exactly one candidate image. When the
    /// candidate is unusable the slot hands out nothing.
    pub fn after_paragraph(&mut self) -> Option<SizedImage> {
        self.paragraphs_seen += 1;
        if self.paragraphs_seen % self.cadence != 0 || !self.has_remaining() {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        self.size(index)
    }

    /// Hand out the next usable unplaced image, if any.
    ///
    /// Used to append leftovers to the final page once the block sequence
    /// is exhausted.
    pub fn next_remaining(&mut self) -> Option<SizedImage> {
        while self.has_remaining() {
            let index = self.cursor;
            self.cursor += 1;
            if let Some(sized) = self.size(index) {
                return Some(sized);
            }
        }
        None
    }

    /// Check whether unplaced images remain.
    pub fn has_remaining(&self) -> bool {
        self.cursor < self.images.len()
    }

    fn size(&self, index: usize) -> Option<SizedImage> {
        let (width, height) = self.images[index].scaled_to_fit(self.max_width, self.max_height);
        if width <= 0.0 || height <= 0.0 {
            log::warn!("skipping image {index}: no usable dimensions");
            return None;
        }
        Some(SizedImage {
            index,
            width,
            height,
        })
    }
}
