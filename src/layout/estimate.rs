//! Heuristic height estimation.
//!
//! The engine has no access to true font metrics, so every estimate is a
//! calibrated character-count approximation. Headings, tables, and images
//! use fixed per-role heights from [`LayoutOptions`]; paragraphs estimate
//! a line count from their character count.

use super::{LayoutOptions, Style};
use crate::model::Block;

/// Vertical gap reserved above and below an interleaved image.
pub const IMAGE_GAP: f32 = 12.0;

/// Estimate the vertical extent a block will occupy.
pub fn block_height(block: &Block, style: &Style, options: &LayoutOptions) -> f32 {
    match block {
        // Headings are assumed short; their height is text-length
        // independent.
        Block::Heading { .. } => options.heading_height,
        Block::Paragraph { .. } => {
            let lines = paragraph_lines(&block.plain_text(), options.chars_per_line);
            lines as f32 * style.leading
        }
        // Tables are atomic and never fractionally estimated.
        Block::Table(_) => options.table_height,
        Block::Spacer => style.leading,
    }
}

/// Estimate the line count of a paragraph's text.
///
/// Each explicit embedded line break forces a new line count unit; every
/// segment contributes at least one line.
pub fn paragraph_lines(text: &str, chars_per_line: usize) -> usize {
    text.split('\n')
        .map(|segment| segment.chars().count().div_ceil(chars_per_line).max(1))
        .sum()
}

/// Estimated vertical extent of an interleaved image placement.
pub fn image_height(options: &LayoutOptions) -> f32 {
    options.max_image_height + 2.0 * IMAGE_GAP
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{self, resolve};

    #[test]
    fn test_paragraph_lines() {
        assert_eq!(paragraph_lines("", 80), 1);
        assert_eq!(paragraph_lines("short", 80), 1);
        assert_eq!(paragraph_lines(&"x".repeat(80), 80), 1);
        assert_eq!(paragraph_lines(&"x".repeat(81), 80), 2);
        assert_eq!(paragraph_lines(&"x".repeat(800), 80), 10);
    }

    #[test]
    fn test_embedded_breaks_force_lines() {
        // Three segments, each under one line.
        assert_eq!(paragraph_lines("a\nb\nc", 80), 3);
        // A trailing break still yields a (blank) line unit.
        assert_eq!(paragraph_lines("a\n", 80), 2);
    }

    #[test]
    fn test_paragraph_height_uses_leading() {
        let options = LayoutOptions::default();
        let block = crate::model::Block::paragraph("x".repeat(800));
        let style = resolve(&block);

        let height = block_height(&block, &style, &options);
        assert!((height - 10.0 * style.leading).abs() < 1e-3);
    }

    #[test]
    fn test_heading_height_is_text_independent() {
        let options = LayoutOptions::default();
        let short = crate::model::Block::heading(1, "A");
        let long = crate::model::Block::heading(1, "A much longer heading title");

        let h1 = block_height(&short, &resolve(&short), &options);
        let h2 = block_height(&long, &resolve(&long), &options);
        assert_eq!(h1, h2);
        assert_eq!(h1, options.heading_height);
    }

    #[test]
    fn test_table_height_is_fixed() {
        let options = LayoutOptions::default();
        let grid = vec![vec!["a"], vec!["b"], vec!["c"]];
        let block = crate::model::Block::Table(crate::model::Table::from_grid(&grid).unwrap());

        assert_eq!(
            block_height(&block, &resolve(&block), &options),
            options.table_height
        );
    }

    #[test]
    fn test_spacer_height() {
        let options = LayoutOptions::default();
        let style = resolve(&crate::model::Block::Spacer);
        let height = block_height(&crate::model::Block::Spacer, &style, &options);
        assert_eq!(height, style.leading);
        assert!(height < layout::body().leading);
    }

    #[test]
    fn test_image_height_is_conservative() {
        let options = LayoutOptions::default();
        assert!(image_height(&options) > options.max_image_height);
    }
}
