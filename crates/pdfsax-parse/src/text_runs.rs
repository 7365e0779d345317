//! Replay of decoded page text as handler callbacks.
//!
//! Decoders that recover a page as plain text lines use [`replay_page`] to
//! drive a [`DecoderHandler`]. Boundary decisions are made here, on the
//! decoder side of the callback interface:
//!
//! - blank lines separate paragraphs
//! - consecutive non-blank lines of a paragraph are separated by a line break
//! - runs of whitespace within a line become a single word break
//! - every paragraph is followed by a line break, so paragraph text does not
//!   run together once the markup is stripped
//!
//! Glyph positions are synthetic: `x` is the column of the character within
//! its line and `y` is the line index within the page.

use pdfsax_core::ExtractError;

use crate::handler::{DecoderHandler, Glyph, PageInfo};

/// Nominal font size assigned to replayed glyphs.
const REPLAY_FONT_SIZE: f64 = 12.0;

/// Emit a complete page (start, paragraphs, end) for `text`.
pub fn replay_page<H: DecoderHandler + ?Sized>(
    handler: &mut H,
    page: &PageInfo,
    text: &str,
) -> Result<(), ExtractError> {
    handler.on_page_start(page)?;
    for paragraph in paragraphs(text) {
        handler.on_paragraph_start()?;
        for (i, (row, line)) in paragraph.iter().enumerate() {
            if i > 0 {
                handler.on_line_break()?;
            }
            replay_line(handler, *row, line)?;
        }
        handler.on_paragraph_end()?;
        handler.on_line_break()?;
    }
    handler.on_page_end(page)
}

/// Group a page's lines into paragraphs of `(row, line)` pairs.
fn paragraphs(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (row, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push((row, line));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn replay_line<H: DecoderHandler + ?Sized>(
    handler: &mut H,
    row: usize,
    line: &str,
) -> Result<(), ExtractError> {
    let mut previous: Option<Glyph> = None;
    let mut gap = false;
    for (col, ch) in line.chars().enumerate() {
        if ch.is_whitespace() {
            gap = true;
            continue;
        }
        let glyph = Glyph::new(ch, col as f64, row as f64).with_font_size(REPLAY_FONT_SIZE);
        if gap {
            if let Some(before) = &previous {
                handler.on_word_break(before, &glyph)?;
            }
        }
        gap = false;
        handler.on_glyph(&glyph)?;
        previous = Some(glyph);
    }
    Ok(())
}
