use tracing::{debug, trace};

use crate::config::Geometry;
use crate::layout::types::Page;
use crate::parser::types::{CONTINUED_SUFFIX, Element, ElementType, MORE_MARKER};

/// Lay out body elements onto pages.
///
/// The element sequence is owned by the paginator and grows while it is
/// walked: overflowing elements are split, headings are pushed to the next
/// page and dialogue gets `(MORE)` / `(CONT'D)` markers. Inserted elements
/// always land after the cursor, so each is visited exactly once.
pub struct Paginator<'g> {
    geometry: &'g Geometry,
    elements: Vec<Element>,
    pages: Vec<Page>,
    current: Page,
    page_number: u32,
    /// Line within the current page.
    line: usize,
    /// Set once a scene heading has been rendered; pages are numbered from then on.
    has_header: bool,
    skip_next_blank: bool,
    pending_break: bool,
}

impl<'g> Paginator<'g> {
    pub fn new(elements: Vec<Element>, geometry: &'g Geometry) -> Self {
        Self {
            geometry,
            elements,
            pages: Vec::new(),
            current: Page::default(),
            page_number: 1,
            line: 0,
            has_header: false,
            skip_next_blank: false,
            pending_break: false,
        }
    }

    pub fn run(mut self) -> Vec<Page> {
        let mut index = 0;
        while index < self.elements.len() {
            self.step(index);
            index += 1;
        }

        // A trailing break leaves an empty page behind; don't emit it.
        if !self.current.is_empty() || self.pages.is_empty() {
            self.finish_page();
        }

        debug!(
            pages = self.pages.len(),
            elements = self.elements.len(),
            "pagination complete"
        );
        self.pages
    }

    fn step(&mut self, index: usize) {
        let element = self.elements[index].clone();
        trace!(index, line = self.line, %element, "laying out");

        if element.is_page_break() {
            self.pending_break = true;
        }
        if self.pending_break {
            self.break_page();
        }
        if element.is_page_break() {
            return;
        }

        if element.is_blank() {
            if !self.skip_next_blank {
                self.line += 1;
            }
            return;
        }
        self.skip_next_blank = false;

        match element.kind {
            ElementType::Scene | ElementType::Character => self.lay_out_heading(index, &element),
            ElementType::Dialogue | ElementType::Parenthetical => {
                self.lay_out_speech(index, &element)
            }
            ElementType::Action | ElementType::Transition | ElementType::Centered => {
                self.lay_out_body(index, &element)
            }
        }
    }

    /// Scene headings and character cues are never split and never left at
    /// the bottom of a page.
    fn lay_out_heading(&mut self, index: usize, element: &Element) {
        if self.line >= self.geometry.soft_limit {
            debug!(kind = %element.kind, line = self.line, "moving heading to next page");
            self.elements.insert(index + 1, element.clone());
            self.pending_break = true;
            return;
        }

        if element.kind == ElementType::Scene {
            self.has_header = true;
        }

        let x = self.geometry.to_points(element_margin(self.geometry, element));
        for text in element.lines() {
            self.emit(x, text);
        }
    }

    fn lay_out_body(&mut self, index: usize, element: &Element) {
        let lines = element.lines();
        let total = lines.len();
        let hard = self.geometry.hard_limit;

        // The marker closes its page and is never moved off it.
        let is_marker = element.is_more_marker();
        if is_marker {
            self.pending_break = true;
        }

        for (j, text) in lines.iter().enumerate() {
            if !is_marker {
                let remaining = total - j;
                if self.line >= self.geometry.soft_limit
                    && self.line < hard
                    && remaining <= hard - self.line
                {
                    self.pending_break = true;
                }
                if self.line >= hard {
                    debug!(kind = %element.kind, at_line = j, "splitting element across pages");
                    let rest = Element::new(element.kind, lines[j..].join("\n"), self.geometry);
                    self.elements.insert(index + 1, rest);
                    self.pending_break = true;
                    return;
                }
            }

            let x = if element.kind == ElementType::Centered {
                self.centered_x(element, text)
            } else {
                self.geometry.to_points(element_margin(self.geometry, element))
            };
            self.emit(x, text);
        }
    }

    fn lay_out_speech(&mut self, index: usize, element: &Element) {
        let lines = element.lines();
        let total = lines.len();
        let margin = element_margin(self.geometry, element);
        let is_paren = element.kind == ElementType::Parenthetical;

        for (j, text) in lines.iter().enumerate() {
            if self.line >= self.geometry.dialogue_limit {
                let remaining = total - j;
                let hard = self.geometry.hard_limit;
                // Keep the last page line free for `(MORE)`.
                let fits = self.line < hard && remaining < hard - self.line;
                let next_is_paren = self
                    .elements
                    .get(index + 1)
                    .is_some_and(|e| e.kind == ElementType::Parenthetical);
                if !fits || !next_is_paren {
                    self.continue_on_next_page(index, element.kind, &lines[j..]);
                    return;
                }
            }

            if is_paren && j == 0 {
                let open_x = margin - self.geometry.paren_glyph_offset_in;
                let y = self.geometry.line_y(self.line);
                self.current.push(self.geometry.to_points(open_x), y, "(");
            }

            let mut text = text.to_string();
            if is_paren && j == total - 1 {
                text.push(')');
            }
            self.emit(self.geometry.to_points(margin), &text);
        }
    }

    /// Queue `(MORE)`, the speaker's cue with `(CONT'D)` and the rest of the
    /// speech right after the current element.
    fn continue_on_next_page(&mut self, index: usize, kind: ElementType, rest: &[&str]) {
        let mut at = index + 1;
        let more = Element::new(ElementType::Centered, MORE_MARKER, self.geometry);
        self.elements.insert(at, more);
        at += 1;

        if let Some(cue) = self.continued_cue(index) {
            debug!(cue = %cue.text, "continuing dialogue on next page");
            self.elements.insert(at, cue);
            at += 1;
        }

        let rest = Element::new(kind, rest.join("\n"), self.geometry);
        self.elements.insert(at, rest);
    }

    /// The most recent character cue, marked as continued.
    fn continued_cue(&self, index: usize) -> Option<Element> {
        let speaker = self.elements[..=index]
            .iter()
            .rev()
            .find(|e| e.kind == ElementType::Character)?;

        let name = speaker.text.trim_end();
        let text = if name.to_uppercase().ends_with(CONTINUED_SUFFIX) {
            speaker.text.clone()
        } else {
            format!("{name} {CONTINUED_SUFFIX}")
        };
        Some(Element::new(ElementType::Character, text, self.geometry))
    }

    fn centered_x(&self, element: &Element, text: &str) -> f64 {
        let margins = self.geometry.margins(element.kind);
        let text_width = text.chars().count() as f64 * self.geometry.centered_char_in;
        let x = margins.left + (element.width - text_width) / 2.0;
        self.geometry.to_points((x * 10.0).round() / 10.0)
    }

    fn emit(&mut self, x: f64, text: &str) {
        let y = self.geometry.line_y(self.line);
        self.current.push(x, y, text);
        self.line += 1;
    }

    fn break_page(&mut self) {
        self.finish_page();
        debug!(page = self.pages.len() + 1, "page break");
        self.skip_next_blank = true;
        self.line = 0;
        self.pending_break = false;
    }

    fn finish_page(&mut self) {
        let mut page = std::mem::take(&mut self.current);
        if self.has_header {
            let label = format!("{}.", self.page_number);
            let right_edge = self.geometry.page_width_in - self.geometry.action.right;
            let width = (label.chars().count() - 1) as f64 * self.geometry.header_char_pt;
            page.push(
                self.geometry.to_points(right_edge) - width,
                self.geometry.header_y_pt,
                label,
            );
            page.number = Some(self.page_number);
            self.page_number += 1;
        }
        self.pages.push(page);
    }
}

fn element_margin(geometry: &Geometry, element: &Element) -> f64 {
    geometry.margins(element.kind).left
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g() -> Geometry {
        Geometry::default()
    }

    fn el(kind: ElementType, text: &str) -> Element {
        Element::new(kind, text, &g())
    }

    fn numbered_lines(prefix: &str, count: usize) -> String {
        (0..count)
            .map(|i| format!("{prefix}{i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paginate(elements: Vec<Element>) -> Vec<Page> {
        let geometry = g();
        Paginator::new(elements, &geometry).run()
    }

    #[test]
    fn test_single_page_positions() {
        let pages = paginate(vec![
            el(ElementType::Action, "First."),
            Element::blank(&g()),
            el(ElementType::Action, "Second."),
        ]);
        assert_eq!(pages.len(), 1);
        let runs = &pages[0].runs;
        assert_eq!(runs.len(), 2);
        assert_eq!((runs[0].x, runs[0].y), (108.0, 708.0));
        assert_eq!((runs[1].x, runs[1].y), (108.0, 684.0));
        assert_eq!(pages[0].number, None);
    }

    #[test]
    fn test_empty_sequence_yields_one_page() {
        let pages = paginate(vec![]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_forced_break_never_rendered() {
        let pages = paginate(vec![
            el(ElementType::Action, "A."),
            Element::blank(&g()),
            el(ElementType::Action, "==="),
            Element::blank(&g()),
            el(ElementType::Action, "B."),
        ]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].texts(), vec!["A."]);
        // The blank after the break is swallowed
        assert_eq!(pages[1].texts(), vec!["B."]);
        assert_eq!(pages[1].runs[0].y, 708.0);
    }

    #[test]
    fn test_trailing_break_adds_no_page() {
        let pages = paginate(vec![
            el(ElementType::Action, "A."),
            Element::blank(&g()),
            el(ElementType::Action, "==="),
            Element::blank(&g()),
        ]);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_long_action_splits_at_hard_limit() {
        let pages = paginate(vec![el(ElementType::Action, &numbered_lines("line ", 70))]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].runs.len(), 57);
        assert_eq!(pages[0].runs[56].text, "line 56");
        assert_eq!(pages[1].runs[0].text, "line 57");
        assert_eq!(pages[1].runs[0].y, 708.0);
        assert_eq!(pages[1].runs.len(), 13);
    }

    #[test]
    fn test_split_when_running_count_reaches_limit() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("a", 40)),
            Element::blank(&g()),
            el(ElementType::Action, &numbered_lines("b", 30)),
        ]);
        // Lines 0..40 hold `a`, line 40 is blank, `b` fills 41..57
        assert_eq!(pages[0].runs.len(), 56);
        assert_eq!(pages[0].runs.last().unwrap().text, "b15");
        assert_eq!(pages[0].runs.last().unwrap().y, 708.0 - 12.0 * 56.0);
        assert_eq!(pages[1].runs[0].text, "b16");
    }

    #[test]
    fn test_page_closes_early_when_element_fits_past_soft_limit() {
        let mut elements = Vec::new();
        for n in 0..6 {
            elements.push(el(ElementType::Action, &numbered_lines(&format!("p{n}-"), 10)));
            elements.push(Element::blank(&g()));
        }
        let pages = paginate(elements);
        // Five paragraphs reach line 53; the page closes after the fifth
        assert_eq!(pages[0].runs.len(), 50);
        assert_eq!(pages[1].texts()[0], "p5-0");
    }

    #[test]
    fn test_scene_heading_moves_to_next_page() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 52)),
            el(ElementType::Scene, "INT. HOUSE - DAY"),
            Element::blank(&g()),
            el(ElementType::Action, "Quiet."),
        ]);
        assert_eq!(pages.len(), 2);
        assert!(!pages[0].texts().contains(&"INT. HOUSE - DAY"));
        assert_eq!(pages[1].runs[0].text, "INT. HOUSE - DAY");
        assert_eq!(pages[1].runs[0].y, 708.0);
        // Numbering starts once a scene has been rendered
        assert_eq!(pages[0].number, None);
        assert_eq!(pages[1].number, Some(1));
    }

    #[test]
    fn test_page_numbers_after_scene() {
        let pages = paginate(vec![
            el(ElementType::Scene, "INT. HOUSE - DAY"),
            Element::blank(&g()),
            el(ElementType::Action, "==="),
            el(ElementType::Action, "Later."),
        ]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, Some(1));
        assert_eq!(pages[1].number, Some(2));
        let header = pages[0].runs.last().unwrap();
        assert_eq!(header.text, "1.");
        assert_eq!(header.y, 744.0);
        assert_eq!(header.x, 530.0);
    }

    #[test]
    fn test_dialogue_continues_with_more_and_contd() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 50)),
            Element::blank(&g()),
            el(ElementType::Character, "SARAH"),
            el(ElementType::Dialogue, &numbered_lines("d", 10)),
            Element::blank(&g()),
        ]);
        assert_eq!(pages.len(), 2);

        let first = pages[0].texts();
        assert_eq!(
            &first[first.len() - 5..first.len() - 1],
            &["SARAH", "d0", "d1", "d2"][..]
        );
        let more = pages[0].runs.last().unwrap();
        assert_eq!(more.text, "(MORE)");
        assert_eq!(more.y, 708.0 - 12.0 * 55.0);

        let second = pages[1].texts();
        assert_eq!(second[0], "SARAH (CONT'D)");
        assert_eq!(pages[1].runs[0].x, 3.5 * 72.0);
        assert_eq!(&second[1..], &["d3", "d4", "d5", "d6", "d7", "d8", "d9"][..]);
    }

    #[test]
    fn test_contd_not_doubled() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 50)),
            Element::blank(&g()),
            el(ElementType::Character, "SARAH (cont'd)"),
            el(ElementType::Dialogue, &numbered_lines("d", 10)),
        ]);
        assert_eq!(pages[1].runs[0].text, "SARAH (cont'd)");
    }

    #[test]
    fn test_character_cue_not_orphaned() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 52)),
            el(ElementType::Character, "BOB"),
            el(ElementType::Dialogue, "Hi."),
        ]);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].texts(), vec!["BOB", "Hi."]);
    }

    #[test]
    fn test_parenthetical_glyphs() {
        let pages = paginate(vec![
            el(ElementType::Character, "BOB"),
            el(ElementType::Parenthetical, "quietly"),
            el(ElementType::Dialogue, "Hi."),
        ]);
        let runs = &pages[0].runs;
        assert_eq!(runs[1].text, "(");
        assert!((runs[1].x - 2.9 * 72.0).abs() < 1e-9);
        assert_eq!(runs[1].y, runs[2].y);
        assert_eq!(runs[2].text, "quietly)");
        assert_eq!(runs[2].x, 216.0);
        assert_eq!(runs[3].x, 180.0);
    }

    #[test]
    fn test_centered_offset() {
        let pages = paginate(vec![el(ElementType::Centered, "THE END!")]);
        let run = &pages[0].runs[0];
        // 1.5 + (6.0 - 8 * 5/36) / 2 = 3.94, rounded to 3.9in
        assert!((run.x - 3.9 * 72.0).abs() < 1e-6);
        assert_eq!(run.y, 708.0);
    }

    #[test]
    fn test_page_label_width_grows_with_digits() {
        let mut elements = vec![el(ElementType::Scene, "INT. HOUSE - DAY")];
        for n in 0..10 {
            elements.push(el(ElementType::Action, "==="));
            elements.push(el(ElementType::Action, &format!("Page {n}.")));
        }
        let pages = paginate(elements);
        assert_eq!(pages.len(), 11);
        let header = pages[9].runs.last().unwrap();
        assert_eq!(header.text, "10.");
        assert_eq!(header.x, 520.0);
    }

    #[test]
    fn test_dialogue_runs_past_limit_before_parenthetical() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 51)),
            el(ElementType::Character, "BOB"),
            el(ElementType::Dialogue, &numbered_lines("d", 4)),
            el(ElementType::Parenthetical, "beat"),
            el(ElementType::Dialogue, "Go on."),
        ]);
        assert_eq!(pages.len(), 2);

        // d3 lands on line 55 because a parenthetical follows
        let first = pages[0].texts();
        assert_eq!(&first[first.len() - 2..], &["d3", "(MORE)"][..]);
        let runs = &pages[0].runs;
        assert_eq!(runs[runs.len() - 2].y, 708.0 - 12.0 * 55.0);
        assert_eq!(runs[runs.len() - 1].y, 36.0);

        assert_eq!(pages[1].texts(), vec!["BOB (CONT'D)", "(", "beat)", "Go on."]);
    }

    #[test]
    fn test_more_stays_within_page_when_dialogue_fills_it() {
        let pages = paginate(vec![
            el(ElementType::Action, &numbered_lines("x", 51)),
            el(ElementType::Character, "BOB"),
            el(ElementType::Dialogue, &numbered_lines("d", 5)),
            el(ElementType::Parenthetical, "beat"),
        ]);
        assert_eq!(pages.len(), 2);
        assert!(pages[0].runs.iter().all(|r| r.y >= 36.0));

        let more = pages[0].runs.last().unwrap();
        assert_eq!(more.text, "(MORE)");
        assert_eq!(more.y, 708.0 - 12.0 * 55.0);
        assert_eq!(
            pages[1].texts(),
            vec!["BOB (CONT'D)", "d3", "d4", "(", "beat)"]
        );
    }

    #[test]
    fn test_blank_lines_advance_cursor() {
        let pages = paginate(vec![
            Element::blank(&g()),
            Element::blank(&g()),
            el(ElementType::Action, "After two blanks."),
        ]);
        assert_eq!(pages[0].runs[0].y, 708.0 - 24.0);
    }
}
