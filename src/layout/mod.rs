pub mod paginator;
pub mod title_page;
pub mod types;

use crate::config::Geometry;
use crate::parser::types::Screenplay;
use paginator::Paginator;
use types::Document;

/// Lay out a parsed screenplay: an optional title page followed by the body.
pub fn layout_screenplay(screenplay: Screenplay, geometry: &Geometry) -> Document {
    let mut pages = Vec::new();
    if let Some(page) = title_page::render_title_page(&screenplay.title_page, geometry) {
        pages.push(page);
    }
    pages.extend(Paginator::new(screenplay.elements, geometry).run());
    Document { pages }
}
