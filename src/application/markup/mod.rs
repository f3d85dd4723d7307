//! Minimal markdown-to-HTML conversion for notebook markdown cells.
//!
//! Conversion runs in two separate stages. The line stage turns every line
//! into a heading or paragraph (escaping and inline markup included), then
//! the fence stage splits the joined result on triple backticks and turns the
//! odd segments into code blocks. Because fencing happens last, `#` lines
//! inside a fence still come out as heading elements inside the code block.

mod escape;
mod fences;
mod lines;

use std::sync::Arc;

use once_cell::sync::Lazy;

/// Converts markdown source into markup. Implementations are total: any input
/// yields output, and the same input always yields the same output.
pub trait MarkupConverter: Send + Sync {
    fn convert(&self, source: &str) -> String;
}

/// Line-oriented converter with fence-aware code blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMarkupConverter;

impl MarkupConverter for LineMarkupConverter {
    fn convert(&self, source: &str) -> String {
        convert(source)
    }
}

static MARKUP_CONVERTER: Lazy<Arc<LineMarkupConverter>> =
    Lazy::new(|| Arc::new(LineMarkupConverter));

/// Access the shared converter instance.
pub fn markup_converter() -> Arc<LineMarkupConverter> {
    Arc::clone(&MARKUP_CONVERTER)
}

/// Convert markdown source into markup.
pub fn convert(source: &str) -> String {
    if source.is_empty() {
        return String::new();
    }

    let rendered = line_stage(source);
    fence_stage(&rendered)
}

/// First stage: per-line headings and paragraphs, joined with `\n`.
pub fn line_stage(source: &str) -> String {
    lines::render_lines(source)
}

/// Second stage: fence splitting over the line stage's output.
pub fn fence_stage(rendered: &str) -> String {
    fences::render_fences(rendered)
}
