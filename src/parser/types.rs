use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Geometry;
use crate::wrap::wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Scene,
    Action,
    Character,
    Parenthetical,
    Dialogue,
    Transition,
    Centered,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Scene => "scene",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Dialogue => "dialogue",
            ElementType::Transition => "transition",
            ElementType::Centered => "centered",
        };
        f.write_str(name)
    }
}

/// One classified unit of screenplay content.
///
/// `text` is always wrapped to `width`; build a new element rather than
/// editing `text` in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementType,
    pub text: String,
    /// Printable width in inches.
    pub width: f64,
}

impl Element {
    pub fn new(kind: ElementType, text: impl Into<String>, geometry: &Geometry) -> Self {
        let width = geometry.width(kind);
        let text = wrap(&text.into(), geometry.chars_in(width));
        Self { kind, text, width }
    }

    pub fn blank(geometry: &Geometry) -> Self {
        Self::new(ElementType::Action, "", geometry)
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// `===` on its own paragraph: a page break that is never rendered.
    pub fn is_page_break(&self) -> bool {
        self.kind == ElementType::Action && self.text.starts_with("===")
    }

    /// The synthetic bottom-of-page marker for split dialogue.
    pub fn is_more_marker(&self) -> bool {
        self.kind == ElementType::Centered && self.text == MORE_MARKER
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.text.replace('\n', " / "))
    }
}

pub const MORE_MARKER: &str = "(MORE)";
pub const CONTINUED_SUFFIX: &str = "(CONT'D)";

/// Key/value front matter of a screenplay. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitlePage {
    pub title: Option<String>,
    pub credit: Option<String>,
    pub author: Option<String>,
    pub authors: Option<String>,
    pub source: Option<String>,
    pub copyright: Option<String>,
    pub contact: Option<String>,
    pub draft_date: Option<String>,
    pub notes: Option<String>,
}

impl TitlePage {
    pub fn is_empty(&self) -> bool {
        self == &TitlePage::default()
    }

    /// Slot for a recognized key, `None` for keys that are ignored.
    pub fn field_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "Title" => Some(&mut self.title),
            "Credit" => Some(&mut self.credit),
            "Author" => Some(&mut self.author),
            "Authors" => Some(&mut self.authors),
            "Source" => Some(&mut self.source),
            "Copyright" => Some(&mut self.copyright),
            "Contact" => Some(&mut self.contact),
            "Draft date" => Some(&mut self.draft_date),
            "Notes" => Some(&mut self.notes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenplay {
    pub title_page: TitlePage,
    pub elements: Vec<Element>,
}
