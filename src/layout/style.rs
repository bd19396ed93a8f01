//! Style resolution: mapping a block's semantic role to a layout style.

use crate::model::Block;
use serde::{Deserialize, Serialize};

/// Body text font size.
pub const BODY_FONT_SIZE: f32 = 12.0;

/// Font size of a level-1 heading.
pub const HEADING_BASE_FONT_SIZE: f32 = 16.0;

/// Font size decrease per heading level.
pub const HEADING_FONT_STEP: f32 = 2.0;

/// Floor below which heading font sizes never shrink.
pub const MIN_HEADING_FONT_SIZE: f32 = 12.0;

/// Leading as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Height of a spacer left by an originally-empty paragraph.
const SPACER_LEADING: f32 = 6.0;

/// Heading levels beyond this reuse the deepest heading style.
const MAX_HEADING_LEVEL: u8 = 3;

/// An immutable layout style descriptor for one block role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Font size in layout units
    pub font_size: f32,

    /// Vertical distance between line baselines
    pub leading: f32,

    /// Space before the block
    pub space_before: f32,

    /// Space after the block
    pub space_after: f32,

    /// The next block must stay on the same page as this one
    pub keep_with_next: bool,
}

/// The body paragraph style.
pub fn body() -> Style {
    Style {
        font_size: BODY_FONT_SIZE,
        leading: BODY_FONT_SIZE * LINE_HEIGHT_FACTOR,
        space_before: 0.0,
        space_after: 12.0,
        keep_with_next: false,
    }
}

/// The heading style for a level.
///
/// Levels shrink monotonically from the base size down to a readable
/// floor; levels beyond 3 reuse the level-3 style. A heading must never
/// be stranded alone at the bottom of a page, so every heading style
/// keeps with its successor.
pub fn heading(level: u8) -> Style {
    let level = level.clamp(1, MAX_HEADING_LEVEL);
    let font_size =
        (HEADING_BASE_FONT_SIZE - HEADING_FONT_STEP * (level - 1) as f32).max(MIN_HEADING_FONT_SIZE);
    Style {
        font_size,
        leading: font_size * LINE_HEIGHT_FACTOR,
        space_before: 12.0,
        space_after: 16.0,
        keep_with_next: true,
    }
}

fn spacer() -> Style {
    Style {
        font_size: BODY_FONT_SIZE,
        leading: SPACER_LEADING,
        space_before: 0.0,
        space_after: 0.0,
        keep_with_next: false,
    }
}

/// Resolve a block's semantic role to its layout style.
///
/// Resolution is total over the block variant set; there is no error
/// condition. A paragraph whose non-empty runs are all bold is promoted
/// to the deepest heading style: bold-only paragraphs in source documents
/// often stand in for unmarked headings.
pub fn resolve(block: &Block) -> Style {
    match block {
        Block::Heading { level, .. } => heading(*level),
        Block::Paragraph { runs, .. } => {
            let visible: Vec<_> = runs.iter().filter(|r| !r.text.trim().is_empty()).collect();
            if !visible.is_empty() && visible.iter().all(|r| r.bold) {
                heading(MAX_HEADING_LEVEL)
            } else {
                body()
            }
        }
        Block::Table(_) => body(),
        Block::Spacer => spacer(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    #[test]
    fn test_heading_sizes_shrink_monotonically() {
        let sizes: Vec<f32> = (1..=3).map(|l| heading(l).font_size).collect();
        assert_eq!(sizes, vec![16.0, 14.0, 12.0]);
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_deep_levels_reuse_level_three() {
        assert_eq!(heading(4), heading(3));
        assert_eq!(heading(9), heading(3));
        // Never below the readable floor.
        assert!(heading(9).font_size >= MIN_HEADING_FONT_SIZE);
    }

    #[test]
    fn test_headings_keep_with_next() {
        assert!(heading(1).keep_with_next);
        assert!(!body().keep_with_next);
    }

    #[test]
    fn test_resolve_heading() {
        let style = resolve(&Block::heading(2, "Section"));
        assert_eq!(style, heading(2));
    }

    #[test]
    fn test_bold_only_paragraph_promoted() {
        let block = Block::paragraph_with_runs(vec![
            TextRun::bold("UNMARKED"),
            TextRun::bold("HEADING"),
        ]);
        let style = resolve(&block);
        assert!(style.keep_with_next);
        assert_eq!(style, heading(3));
    }

    #[test]
    fn test_mixed_runs_stay_body() {
        let block = Block::paragraph_with_runs(vec![
            TextRun::bold("partly"),
            TextRun::new("bold"),
        ]);
        assert_eq!(resolve(&block), body());
    }

    #[test]
    fn test_whitespace_runs_do_not_block_promotion() {
        // A blank unstyled run between bold runs is not visible text.
        let block = Block::paragraph_with_runs(vec![
            TextRun::bold("Summary"),
            TextRun::new("  "),
            TextRun::bold("Findings"),
        ]);
        assert_eq!(resolve(&block), heading(3));
    }

    #[test]
    fn test_empty_paragraph_not_promoted() {
        let block = Block::paragraph_with_runs(vec![TextRun::new("   ")]);
        assert_eq!(resolve(&block), body());
    }

    #[test]
    fn test_resolve_is_total() {
        let grid = vec![vec!["a", "b"]];
        let table = Block::Table(crate::model::Table::from_grid(&grid).unwrap());
        assert_eq!(resolve(&table), body());
        assert!(!resolve(&Block::Spacer).keep_with_next);
    }
}
