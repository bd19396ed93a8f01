//! Page emission: materializing finalized page contents.

use super::PageGeometry;
use crate::model::{Page, PagedDocument, PlacedBlock};

/// Assemble finalized page contents into the numbered output document.
///
/// Break directives were consumed by the engine: [`PlacedBlock`] has no
/// break variant, so no residual markers can appear inside a page. This
/// step performs no I/O.
pub(crate) fn assemble(contents: Vec<Vec<PlacedBlock>>, geometry: &PageGeometry) -> PagedDocument {
    let pages = contents
        .into_iter()
        .enumerate()
        .map(|(i, elements)| Page {
            number: i as u32 + 1,
            width: geometry.page_width,
            height: geometry.page_height,
            elements,
        })
        .collect();
    PagedDocument { pages }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;
    use crate::model::TextRun;

    #[test]
    fn test_assemble_numbers_pages() {
        let contents = vec![
            vec![PlacedBlock::Text {
                runs: vec![TextRun::new("one")],
                style: layout::body(),
            }],
            Vec::new(),
            vec![PlacedBlock::Spacer { height: 6.0 }],
        ];
        let doc = assemble(contents, &PageGeometry::a4());

        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[2].number, 3);
        assert!(doc.pages[1].is_empty());
    }

    #[test]
    fn test_assemble_carries_geometry() {
        let geometry = PageGeometry::letter();
        let doc = assemble(vec![Vec::new()], &geometry);

        assert_eq!(doc.pages[0].width, geometry.page_width);
        assert_eq!(doc.pages[0].height, geometry.page_height);
    }
}
