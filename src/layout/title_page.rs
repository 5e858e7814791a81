use crate::config::Geometry;
use crate::layout::types::Page;
use crate::parser::types::TitlePage;

/// Lay out the title page, or `None` when the screenplay has no title block.
///
/// Title, credit, author and source are centered from a fixed line
/// downward. Copyright, contact and draft date stack upward from the bottom
/// left; notes stack upward on the right, starting above the left block.
pub fn render_title_page(title_page: &TitlePage, geometry: &Geometry) -> Option<Page> {
    let author = title_page.author.as_ref().or(title_page.authors.as_ref());
    let center = collect_lines([
        title_page.title.as_ref(),
        title_page.credit.as_ref(),
        author,
        title_page.source.as_ref(),
    ]);
    let left = collect_lines([
        title_page.copyright.as_ref(),
        title_page.contact.as_ref(),
        title_page.draft_date.as_ref(),
    ]);
    let right = collect_lines([title_page.notes.as_ref()]);

    if center.is_empty() && left.is_empty() && right.is_empty() {
        return None;
    }

    let left_edge = geometry.action.left;
    let body_width = geometry.body_width();
    let mut page = Page::default();

    for (n, line) in center.iter().enumerate() {
        let chars = line.chars().count();
        let x = round_tenth(left_edge + (body_width - geometry.text_width(chars)) / 2.0);
        let y = geometry.line_from_bottom(geometry.title_center_line.saturating_sub(n));
        page.push(geometry.to_points(x), y, *line);
    }

    for (n, line) in left.iter().rev().enumerate() {
        let y = geometry.line_from_bottom(geometry.title_bottom_line + n);
        page.push(geometry.to_points(left_edge), y, *line);
    }

    // Notes continue the line count of the left block.
    let notes_base = geometry.title_bottom_line + left.len();
    for (n, line) in right.iter().rev().enumerate() {
        let chars = line.chars().count();
        let x = left_edge + body_width - geometry.text_width(chars.saturating_sub(1));
        let y = geometry.line_from_bottom(notes_base + n);
        page.push(geometry.to_points(x), y, *line);
    }

    Some(page)
}

fn collect_lines<'a, const N: usize>(values: [Option<&'a String>; N]) -> Vec<&'a str> {
    values
        .into_iter()
        .flatten()
        .flat_map(|v| v.split('\n'))
        .filter(|l| !l.is_empty())
        .collect()
}

fn round_tenth(inches: f64) -> f64 {
    (inches * 10.0).round() / 10.0
}
