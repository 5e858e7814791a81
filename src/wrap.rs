/// Wrap `text` so that no line is longer than `limit` characters.
///
/// Over-long lines break at the last whitespace at or before `limit` (the
/// whole whitespace run is dropped), otherwise right after the last hyphen
/// that fits, otherwise at `limit - 1` with an inserted hyphen. Continuation
/// lines never start with whitespace. Text that already fits is returned
/// unchanged.
pub fn wrap(text: &str, limit: usize) -> String {
    assert!(limit >= 2, "wrap limit must be at least two characters, got {limit}");

    let mut lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();

    // Each step shortens or de-indents the offending line, so this terminates.
    while let Some(idx) = lines.iter().position(|l| l.len() > limit) {
        let pieces = break_line(&lines[idx], limit);
        lines.splice(idx..=idx, pieces);
    }

    lines
        .iter()
        .map(|l| l.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn break_line(line: &[char], limit: usize) -> Vec<Vec<char>> {
    let indent = line.iter().take_while(|c| c.is_whitespace()).count();

    // Only break after the indentation, so the head is never blank.
    for x in (indent..=limit).rev() {
        let c = line[x];
        if c.is_whitespace() {
            return split_at(trim_end(&line[..x]), &line[x..]);
        }
        if c == '-' && x < limit {
            return split_at(&line[..=x], &line[x + 1..]);
        }
    }

    if indent > 0 {
        return vec![line[indent..].to_vec()];
    }

    let mut head = line[..limit - 1].to_vec();
    head.push('-');
    vec![head, line[limit - 1..].to_vec()]
}

fn split_at(head: &[char], tail: &[char]) -> Vec<Vec<char>> {
    let tail: Vec<char> = tail.iter().copied().skip_while(|c| c.is_whitespace()).collect();
    if tail.is_empty() {
        vec![head.to_vec()]
    } else {
        vec![head.to_vec(), tail]
    }
}

fn trim_end(chars: &[char]) -> &[char] {
    let len = chars.len() - chars.iter().rev().take_while(|c| c.is_whitespace()).count();
    &chars[..len]
}
