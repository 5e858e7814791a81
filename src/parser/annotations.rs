use std::sync::LazyLock;

use regex::Regex;

// The leading group keeps the character before an unescaped opener.
static BONEYARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(^|[^\\])/\*.*?[^\\]\*/").unwrap());
static NOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(^|[^\\])\[\[.*?[^\\]\]\]").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Remove author-only annotations from screenplay body text.
///
/// Strips `/* boneyard */` regions, `#` section lines, `=` synopsis lines
/// (but not `===` page breaks) and `[[notes]]`, then collapses runs of blank
/// lines to a single blank line and drops leading whitespace.
pub fn strip_annotations(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = BONEYARD_RE.replace_all(&text, "$1");

    let text = text
        .split('\n')
        .filter(|line| !is_section(line) && !is_synopsis(line))
        .collect::<Vec<_>>()
        .join("\n");

    let text = NOTE_RE.replace_all(&text, "$1");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");

    text.trim_start().to_string()
}

fn is_section(line: &str) -> bool {
    line.starts_with('#')
}

fn is_synopsis(line: &str) -> bool {
    line.starts_with('=') && !line.starts_with("===")
}
