pub mod annotations;
pub mod classifier;
pub mod title_page;
pub mod types;

use crate::config::Geometry;
use types::Screenplay;

/// Parse screenplay markup into a title page and a typed element sequence.
pub fn parse_screenplay(input: &str, geometry: &Geometry) -> Screenplay {
    let input = input.replace("\r\n", "\n");
    let lines: Vec<&str> = input.split('\n').collect();
    let (title_page, content_start) = title_page::extract_title_page(&lines);

    let body = annotations::strip_annotations(&lines[content_start..].join("\n"));
    let body_lines = body.split('\n').map(String::from).collect();
    let elements = classifier::classify(body_lines, geometry);

    Screenplay {
        title_page,
        elements,
    }
}
