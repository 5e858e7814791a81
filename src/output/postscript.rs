use crate::layout::types::Document;

const PREAMBLE: &str = "%!PS-Adobe-3.0\n\
/Courier findfont\n\
0 dict copy begin\n\
/Encoding ISOLatin1Encoding def\n\
/Courier-latin /FontName def\n\
currentdict end\n\
dup /FID undef\n\
/Courier-latin exch definefont pop\n\
/Courier-latin 12 selectfont\n\
/PageSize [612 792]\n";

/// Encode a laid-out document as PostScript in ISO Latin-1.
pub fn encode(document: &Document) -> Vec<u8> {
    let mut ps = String::from(PREAMBLE);

    let page_count = document.pages.len().max(1);
    for index in 0..page_count {
        let ordinal = index + 1;
        ps.push_str(&format!("%%Page: {ordinal} {ordinal}\n"));
        if let Some(page) = document.pages.get(index) {
            for run in &page.runs {
                let (x, y) = (format_coord(run.x), format_coord(run.y));
                ps.push_str(&format!("{x} {y} moveto\n({}) show\n", escape(&run.text)));
            }
        }
        ps.push_str("showpage\n");
    }

    to_latin1(&ps)
}

/// Escape the characters that are special inside a PostScript string.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Coordinates to two decimals, without trailing zeros.
fn format_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}
