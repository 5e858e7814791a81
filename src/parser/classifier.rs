use std::collections::VecDeque;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::types::{Element, ElementType};
use crate::config::Geometry;

static SCENE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\.[^.]|int|ext|est|int\./ext|int/ext|i/e)").unwrap());

/// Turn preprocessed screenplay lines into typed elements.
///
/// Every line ends up in some element; unrecognized lines become action.
pub fn classify(lines: Vec<String>, geometry: &Geometry) -> Vec<Element> {
    let elements = Classifier::new(lines, geometry).run();
    debug!(count = elements.len(), "classified screenplay elements");
    elements
}

struct Classifier<'g> {
    geometry: &'g Geometry,
    queue: VecDeque<String>,
    /// The raw line consumed just before the current one.
    previous: Option<String>,
    elements: Vec<Element>,
}

impl<'g> Classifier<'g> {
    fn new(lines: Vec<String>, geometry: &'g Geometry) -> Self {
        Self {
            geometry,
            queue: lines.into(),
            previous: None,
            elements: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Element> {
        while let Some(raw) = self.queue.pop_front() {
            let element = self.classify_line(raw);
            trace!(%element, "classified");
            self.elements.push(element);
        }
        self.elements
    }

    fn classify_line(&mut self, raw: String) -> Element {
        let line = raw.trim_end().to_string();
        let stripped = line.trim_start();

        let prev_blank = self.previous.as_deref().is_some_and(is_blank);
        let next_blank = self.queue.front().map(|l| is_blank(l));
        let in_dialogue = matches!(
            self.elements.last().map(|e| e.kind),
            Some(ElementType::Character | ElementType::Parenthetical)
        );
        let after_speech = matches!(
            self.elements.last().map(|e| e.kind),
            Some(ElementType::Character | ElementType::Dialogue)
        );

        self.previous = Some(raw);

        if stripped.is_empty() {
            return Element::blank(self.geometry);
        }

        // `!` forces action whatever the context
        if stripped.starts_with('!') {
            return self.element(ElementType::Action, without_sigil(&line));
        }

        // `\` suppresses pattern matching on this line only
        if let Some(rest) = stripped.strip_prefix('\\') {
            if in_dialogue {
                return self.dialogue(rest.trim_start().to_string());
            }
            return self.element(ElementType::Action, without_sigil(&line));
        }

        if next_blank == Some(true) && SCENE_RE.is_match(stripped) {
            let heading = stripped.strip_prefix('.').unwrap_or(stripped).trim_start();
            return self.element(ElementType::Scene, heading.to_uppercase());
        }

        let forced_transition = stripped.starts_with('>') && !stripped.ends_with('<');
        if forced_transition
            || (is_upper(stripped)
                && stripped.ends_with("TO:")
                && prev_blank
                && next_blank == Some(true))
        {
            let text = match stripped.strip_prefix('>') {
                Some(rest) => rest.trim_start(),
                None => stripped,
            };
            return self.element(ElementType::Transition, text.to_string());
        }

        if let Some(rest) = stripped.strip_prefix('@') {
            return self.element(ElementType::Character, rest.trim_start().to_string());
        }
        if is_upper(without_extension(stripped))
            && next_blank == Some(false)
            && prev_blank
            && stripped.chars().next().is_some_and(char::is_alphabetic)
        {
            return self.element(ElementType::Character, stripped.to_string());
        }

        if after_speech && is_parenthetical(stripped) {
            let inner = &stripped[1..stripped.len() - 1];
            return self.element(ElementType::Parenthetical, inner.to_string());
        }

        if in_dialogue {
            return self.dialogue(stripped.to_string());
        }

        if stripped.len() >= 2 && stripped.starts_with('>') && stripped.ends_with('<') {
            let inner = stripped[1..stripped.len() - 1].trim();
            return self.element(ElementType::Centered, inner.to_string());
        }

        self.element(ElementType::Action, line.clone())
    }

    /// Collect dialogue lines up to a blank line or a parenthetical.
    fn dialogue(&mut self, first: String) -> Element {
        let mut text = first;

        while let Some(next) = self.queue.front() {
            let trimmed = next.trim();
            if trimmed.is_empty() || is_parenthetical(trimmed) {
                break;
            }
            let content = trimmed.strip_prefix('\\').map_or(trimmed, str::trim_start);
            text.push('\n');
            text.push_str(content);
            self.previous = self.queue.pop_front();
        }

        self.element(ElementType::Dialogue, text)
    }

    fn element(&self, kind: ElementType, text: String) -> Element {
        Element::new(kind, text, self.geometry)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_upper(text: &str) -> bool {
    text.to_uppercase() == text
}

fn is_parenthetical(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('(') && text.ends_with(')')
}

/// Drop a trailing `(V.O.)`-style extension from a character cue.
fn without_extension(text: &str) -> &str {
    if !text.ends_with(')') {
        return text;
    }
    match text.find('(') {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Remove the one-character sigil after any indentation.
fn without_sigil(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    format!("{}{}", &line[..indent], &line[indent + 1..])
}
