use serde::{Deserialize, Serialize};

use crate::parser::types::ElementType;

/// Left and right page margins, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
}

impl Margins {
    const fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// Page geometry shared by the classifier (for wrap widths) and the paginator.
///
/// The line budget thresholds are tuned for US-Letter with 12pt Courier and
/// are kept as literal values rather than derived from the page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub page_width_in: f64,
    pub points_per_inch: f64,
    pub chars_per_inch: f64,
    pub line_height_pt: f64,
    /// Baseline of line 0, measured from the page bottom.
    pub top_origin_pt: f64,
    pub header_y_pt: f64,
    /// From this line on, a page may be closed early to avoid splitting.
    pub soft_limit: usize,
    /// From this line on, dialogue is continued on the next page.
    pub dialogue_limit: usize,
    /// Lines available on a page.
    pub hard_limit: usize,
    pub scene: Margins,
    pub action: Margins,
    pub character: Margins,
    pub parenthetical: Margins,
    pub dialogue: Margins,
    pub transition: Margins,
    pub centered: Margins,
    /// How far left of the parenthetical margin the opening `(` sits.
    pub paren_glyph_offset_in: f64,
    /// Per-character width used to center `centered` lines.
    pub centered_char_in: f64,
    /// Per-character step used to right-align the page number label.
    pub header_char_pt: f64,
    /// Title page center block top line, in lines up from the page bottom.
    pub title_center_line: usize,
    /// Title page bottom blocks base line, in lines up from the page bottom.
    pub title_bottom_line: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            page_width_in: 8.5,
            points_per_inch: 72.0,
            chars_per_inch: 10.0,
            line_height_pt: 12.0,
            top_origin_pt: 708.0,
            header_y_pt: 744.0,
            soft_limit: 52,
            dialogue_limit: 55,
            hard_limit: 57,
            scene: Margins::new(1.5, 1.0),
            action: Margins::new(1.5, 1.0),
            character: Margins::new(3.5, 1.0),
            parenthetical: Margins::new(3.0, 3.0),
            dialogue: Margins::new(2.5, 2.5),
            transition: Margins::new(5.5, 1.0),
            centered: Margins::new(1.5, 1.0),
            paren_glyph_offset_in: 0.1,
            centered_char_in: 5.0 / 36.0,
            header_char_pt: 10.0,
            title_center_line: 50,
            title_bottom_line: 6,
        }
    }
}

impl Geometry {
    pub fn margins(&self, kind: ElementType) -> Margins {
        match kind {
            ElementType::Scene => self.scene,
            ElementType::Action => self.action,
            ElementType::Character => self.character,
            ElementType::Parenthetical => self.parenthetical,
            ElementType::Dialogue => self.dialogue,
            ElementType::Transition => self.transition,
            ElementType::Centered => self.centered,
        }
    }

    /// Printable width in inches for an element type.
    pub fn width(&self, kind: ElementType) -> f64 {
        let m = self.margins(kind);
        self.page_width_in - m.left - m.right
    }

    /// Maximum number of characters on one line of `width` inches.
    pub fn chars_in(&self, width: f64) -> usize {
        // Widths are multiples of a tenth of an inch; the epsilon keeps
        // 3.5 * 10 from flooring to 34.
        (width * self.chars_per_inch + 1e-9).floor().max(0.0) as usize
    }

    pub fn to_points(&self, inches: f64) -> f64 {
        inches * self.points_per_inch
    }

    /// Estimated width in inches of `chars` monospaced characters.
    pub fn text_width(&self, chars: usize) -> f64 {
        chars as f64 / self.chars_per_inch
    }

    /// Baseline of body line `n`.
    pub fn line_y(&self, n: usize) -> f64 {
        self.top_origin_pt - self.line_height_pt * n as f64
    }

    /// Baseline `n` lines up from the page bottom.
    pub fn line_from_bottom(&self, n: usize) -> f64 {
        self.line_height_pt * n as f64
    }

    /// Printable width of the body column (action margins).
    pub fn body_width(&self) -> f64 {
        self.width(ElementType::Action)
    }
}
