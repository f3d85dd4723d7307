//! Line stage: every source line becomes one heading or one paragraph.

use once_cell::sync::Lazy;
use regex::Regex;

use super::escape::escape_html;

// Inline spans never cross a line terminator.
static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\r\x{2028}\x{2029}]*?)\*\*").expect("valid bold regex")
});
static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^\r\x{2028}\x{2029}]*?)\*").expect("valid italic regex")
});
static LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\r\x{2028}\x{2029}]*?)\]\(([^\r\x{2028}\x{2029}]*?)\)")
        .expect("valid link regex")
});
static HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(#{{1,6}}){SPACE_CLASS}")).expect("valid heading regex")
});

// Heading whitespace: ASCII blanks, Unicode space separators, U+2028/U+2029
// and the byte order mark. NEL (U+0085) is not whitespace here.
const SPACE_CLASS: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

fn is_space(c: char) -> bool {
    matches!(
        c,
        '\t'
            | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Render each line of `source` on its own and join the results with `\n`.
pub(crate) fn render_lines(source: &str) -> String {
    source
        .split('\n')
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_line(line: &str) -> String {
    if let Some(heading) = HEADING.captures(line) {
        let level = heading[1].len();
        let consumed = heading.get(0).map_or(line.len(), |marker| marker.end());
        let text = escape_html(line[consumed..].trim_matches(is_space));
        return format!("<h{level}>{text}</h{level}>");
    }

    format!("<p>{}</p>", render_inline(&escape_html(line)))
}

/// Apply bold, italic and link substitutions, in that order, to escaped text.
///
/// Link targets are copied into `href` as they are; quotes are not escaped, so
/// the result is not safe to embed when the source is untrusted.
fn render_inline(escaped: &str) -> String {
    let bold = BOLD.replace_all(escaped, "<strong>${1}</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>${1}</em>");
    LINK.replace_all(
        &italic,
        r#"<a href="${2}" target="_blank" rel="noreferrer">${1}</a>"#,
    )
    .into_owned()
}
