use std::sync::LazyLock;

use regex::Regex;

use super::types::TitlePage;

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^:]+):\s*(.*)$").unwrap());
static CONTINUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s{3,}|\t)(.+)$").unwrap());

/// Read the title block at the top of a screenplay.
///
/// Returns the parsed block and the index of the first body line. A document
/// whose first line is not `Key: value` has no title block and starts at 0.
pub fn extract_title_page(lines: &[&str]) -> (TitlePage, usize) {
    let block_end = lines
        .iter()
        .position(|l| l.is_empty())
        .unwrap_or(lines.len());
    let block = &lines[..block_end];

    let mut title_page = TitlePage::default();
    let mut found_key = false;
    let mut idx = 0;

    while idx < block.len() {
        let Some(caps) = KEY_RE.captures(block[idx]) else {
            break;
        };
        found_key = true;
        let key = caps[1].to_string();
        let value = caps[2].trim().to_string();
        idx += 1;

        if !value.is_empty() {
            append_value(&mut title_page, &key, &value);
            continue;
        }

        // Empty inline value: the value is on indented lines below
        while idx < block.len() {
            let Some(cont) = CONTINUATION_RE.captures(block[idx]) else {
                break;
            };
            let value = cont[1].trim();
            if !value.is_empty() {
                append_value(&mut title_page, &key, value);
            }
            idx += 1;
        }
    }

    if !found_key {
        return (TitlePage::default(), 0);
    }

    (title_page, (block_end + 1).min(lines.len()))
}

fn append_value(title_page: &mut TitlePage, key: &str, value: &str) {
    // Unknown keys are read but not kept
    let Some(slot) = title_page.field_mut(key) else {
        return;
    };
    match slot {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(value);
        }
        None => *slot = Some(value.to_string()),
    }
}
