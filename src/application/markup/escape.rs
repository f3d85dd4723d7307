/// Escape the characters that would otherwise open markup. `&` goes first so
/// entities produced for `<` and `>` are never escaped twice.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Reverse only the angle-bracket entities; `&amp;` is left alone.
pub(crate) fn unescape_angle_brackets(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">")
}
