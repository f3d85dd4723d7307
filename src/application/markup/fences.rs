//! Fence stage: runs after the line stage over its joined output.

use super::escape::unescape_angle_brackets;

pub(crate) const FENCE: &str = "```";

/// Split rendered lines on the fence delimiter. Odd-indexed segments become
/// code blocks with their angle brackets restored; even-indexed segments pass
/// through untouched. An unpaired fence leaves a trailing code block.
pub(crate) fn render_fences(rendered: &str) -> String {
    let mut html = String::with_capacity(rendered.len());
    for (index, segment) in rendered.split(FENCE).enumerate() {
        if index % 2 == 0 {
            html.push_str(segment);
        } else {
            html.push_str("<pre class=\"notebook-code\"><code>");
            html.push_str(&unescape_angle_brackets(segment));
            html.push_str("</code></pre>");
        }
    }
    html
}
