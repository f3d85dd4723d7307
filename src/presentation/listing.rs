use std::fmt::Write as _;

use crate::application::preview::{DisplayPayload, PresentedCell};

/// Pretty-printed JSON array of presented cells.
pub fn render_json_listing(cells: &[PresentedCell]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(cells)
}

/// Human-readable listing with one block per cell.
pub fn render_text_listing(cells: &[PresentedCell]) -> String {
    let mut listing = String::new();
    for (position, cell) in cells.iter().enumerate() {
        if position > 0 {
            listing.push('\n');
        }
        let _ = writeln!(listing, "== {} ==", cell.label);
        match &cell.payload {
            DisplayPayload::Markup { html } => {
                let _ = writeln!(listing, "{html}");
            }
            DisplayPayload::Code { code, output_text } => {
                let _ = writeln!(listing, "{code}");
                if !output_text.is_empty() {
                    let _ = writeln!(listing, "-- Outputs --");
                    let _ = writeln!(listing, "{output_text}");
                }
            }
            DisplayPayload::Unknown { .. } => {}
        }
    }
    listing
}

/// One line per written file followed by an indented excerpt of its content.
pub fn render_export_summary<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut summary = String::new();
    for (path, excerpt) in entries {
        let _ = writeln!(summary, "wrote {path}");
        for line in excerpt.lines() {
            let _ = writeln!(summary, "    {line}");
        }
    }
    summary
}
