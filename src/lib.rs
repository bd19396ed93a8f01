//! # pageflow
//!
//! Flow layout and pagination engine for structured documents.
//!
//! This library converts a structured flow document (headings, paragraphs
//! with inline emphasis, tables, embedded images, explicit break markers)
//! into a sequence of fixed-size pages, deciding automatically where
//! content breaks across page boundaries when no explicit break is
//! present.
//!
//! ## Quick Start
//!
//! ```
//! use pageflow::{paginate, Block};
//!
//! fn main() -> pageflow::Result<()> {
//!     let blocks = vec![
//!         Block::heading(1, "Introduction"),
//!         Block::paragraph("Body text flows onto the first page."),
//!         Block::paragraph_after_break("This starts a new page."),
//!     ];
//!
//!     let doc = paginate(&blocks, &[])?;
//!     println!("Pages: {}", doc.page_count());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Height-accumulation pagination**: greedy single-pass placement
//!   with a configurable fill threshold
//! - **Break-avoidance rules**: keep-with-next headings, atomic tables
//!   and images, no break before the final block
//! - **Image interleaving**: extracted images flow in after every Nth
//!   non-empty paragraph, scaled to fit, in source media order
//! - **Calibrated estimation**: character-count line heuristics instead
//!   of font metrics, with every constant named and tunable
//! - **Parallel batch conversion**: independent documents convert
//!   concurrently via Rayon

pub mod convert;
pub mod error;
pub mod export;
pub mod layout;
pub mod loader;
pub mod model;

// Re-export commonly used types
pub use convert::{
    convert, convert_json, convert_json_batch, ConvertOptions, ConvertResult, LayoutStats,
};
pub use error::{Error, Result};
pub use export::{to_json, JsonFormat};
pub use layout::{FlowEngine, LayoutOptions, PageGeometry, Style};
pub use loader::{load_images, normalize, DocumentInput, InputBlock, InputParagraph};
pub use model::{
    Block, Image, Page, PagedDocument, PlacedBlock, Table, TableRow, TableStyle, TextRun,
};

/// Paginate a block sequence with default layout options.
///
/// # Example
///
/// ```
/// use pageflow::{paginate, Block};
///
/// let doc = paginate(&[Block::paragraph("Hello")], &[]).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn paginate(blocks: &[Block], images: &[Image]) -> Result<PagedDocument> {
    paginate_with_options(blocks, images, &LayoutOptions::default())
}

/// Paginate a block sequence with custom layout options.
pub fn paginate_with_options(
    blocks: &[Block],
    images: &[Image],
    options: &LayoutOptions,
) -> Result<PagedDocument> {
    FlowEngine::new(options)?.paginate(blocks, images)
}

/// Builder for configuring and running document conversions.
///
/// # Example
///
/// ```
/// use pageflow::{DocumentInput, Pageflow};
///
/// let input = DocumentInput::new().with_title("Report");
/// let result = Pageflow::new()
///     .with_title(true)
///     .with_chars_per_line(72)
///     .convert(&input)?;
/// assert_eq!(result.page_count(), 1);
/// # Ok::<(), pageflow::Error>(())
/// ```
pub struct Pageflow {
    options: ConvertOptions,
}

impl Pageflow {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.options.layout = self.options.layout.with_geometry(geometry);
        self
    }

    /// Set the characters-per-line calibration constant.
    pub fn with_chars_per_line(mut self, chars: usize) -> Self {
        self.options.layout = self.options.layout.with_chars_per_line(chars);
        self
    }

    /// Set the automatic-break threshold fraction.
    pub fn with_fill_threshold(mut self, fraction: f32) -> Self {
        self.options.layout = self.options.layout.with_fill_threshold(fraction);
        self
    }

    /// Set the image interleaving cadence.
    pub fn with_image_cadence(mut self, cadence: usize) -> Self {
        self.options.layout = self.options.layout.with_image_cadence(cadence);
        self
    }

    /// Prepend a title heading derived from the input's title.
    pub fn with_title(mut self, include: bool) -> Self {
        self.options = self.options.with_title(include);
        self
    }

    /// Collect layout statistics.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.options = self.options.with_stats(collect);
        self
    }

    /// Convert a document input.
    pub fn convert(&self, input: &DocumentInput) -> Result<ConvertResult> {
        convert::convert(input, &self.options)
    }

    /// Paginate an already-normalized block sequence.
    pub fn paginate(&self, blocks: &[Block], images: &[Image]) -> Result<PagedDocument> {
        paginate_with_options(blocks, images, &self.options.layout)
    }
}

impl Default for Pageflow {
    fn default() -> Self {
        Self::new()
    }
}
