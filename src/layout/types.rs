use serde::{Deserialize, Serialize};

/// A single positioned string, in points from the bottom-left page corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Printed page number, if the page carries a header.
    pub number: Option<u32>,
    pub runs: Vec<TextRun>,
}

impl Page {
    pub fn push(&mut self, x: f64, y: f64, text: impl Into<String>) {
        self.runs.push(TextRun {
            x,
            y,
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}
