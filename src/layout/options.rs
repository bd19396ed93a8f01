//! Layout options and page geometry.
//!
//! Every calibration constant the engine relies on lives here as a named,
//! tunable field rather than an inline number. The estimates they drive
//! are approximations: the engine has no font metrics or rendering
//! backend, and a mismatch against a true renderer's output is expected
//! slack, not a defect.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Page size and margins, from which the usable content area derives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width in layout units (points)
    pub page_width: f32,

    /// Page height in layout units
    pub page_height: f32,

    /// Margin applied on all four sides
    pub margin: f32,
}

impl PageGeometry {
    /// Create a page geometry from explicit dimensions.
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            page_width,
            page_height,
            margin,
        }
    }

    /// A4 geometry (210 x 297 mm) with standard one-inch margins.
    pub fn a4() -> Self {
        Self::new(595.0, 842.0, 72.0)
    }

    /// Letter geometry (8.5 x 11 inches) with standard one-inch margins.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0, 72.0)
    }

    /// Set the margin and return self.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Height available for content: page height minus margins.
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Width available for content: page width minus margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Calibration constants for the flow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Page geometry
    pub geometry: PageGeometry,

    /// Characters assumed to fit on one text line
    pub chars_per_line: usize,

    /// Fraction of the usable height at which an automatic break triggers
    pub fill_threshold: f32,

    /// An image is interleaved after every Nth non-empty paragraph
    pub image_cadence: usize,

    /// Maximum image draw width
    pub max_image_width: f32,

    /// Maximum image draw height
    pub max_image_height: f32,

    /// Fixed estimated height of a heading, independent of its text
    pub heading_height: f32,

    /// Fixed conservative estimated height of a table
    pub table_height: f32,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the characters-per-line calibration constant.
    pub fn with_chars_per_line(mut self, chars: usize) -> Self {
        self.chars_per_line = chars;
        self
    }

    /// Set the automatic-break threshold fraction.
    pub fn with_fill_threshold(mut self, fraction: f32) -> Self {
        self.fill_threshold = fraction;
        self
    }

    /// Set the image interleaving cadence.
    pub fn with_image_cadence(mut self, cadence: usize) -> Self {
        self.image_cadence = cadence;
        self
    }

    /// Set the maximum image draw bounds.
    pub fn with_max_image_size(mut self, width: f32, height: f32) -> Self {
        self.max_image_width = width;
        self.max_image_height = height;
        self
    }

    /// The absolute height budget at which an automatic break triggers.
    pub fn break_threshold(&self) -> f32 {
        self.fill_threshold * self.geometry.usable_height()
    }

    /// Check that the configuration can produce valid placements.
    pub fn validate(&self) -> Result<()> {
        if self.chars_per_line == 0 {
            return Err(Error::InvalidLayout("chars_per_line must be > 0".into()));
        }
        if !(self.fill_threshold > 0.0 && self.fill_threshold <= 1.0) {
            return Err(Error::InvalidLayout(format!(
                "fill_threshold must be in (0, 1], got {}",
                self.fill_threshold
            )));
        }
        if self.image_cadence == 0 {
            return Err(Error::InvalidLayout("image_cadence must be > 0".into()));
        }
        let usable = self.geometry.usable_height();
        if !usable.is_finite() || usable <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "usable page height must be positive, got {usable}"
            )));
        }
        if self.max_image_width <= 0.0 || self.max_image_height <= 0.0 {
            return Err(Error::InvalidLayout(
                "maximum image draw bounds must be positive".into(),
            ));
        }
        if self.heading_height <= 0.0 || self.table_height <= 0.0 {
            return Err(Error::InvalidLayout(
                "fixed block height estimates must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            chars_per_line: 80,
            fill_threshold: 0.85,
            image_cadence: 3,
            // 4 x 3 inches in points
            max_image_width: 288.0,
            max_image_height: 216.0,
            heading_height: 36.0,
            table_height: 180.0,
        }
    }
}
