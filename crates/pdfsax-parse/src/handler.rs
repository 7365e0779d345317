//! Decoder callback trait.
//!
//! Defines the [`DecoderHandler`] trait that bridges a page-oriented document
//! decoder and structural transduction. The decoder calls handler methods as
//! it walks pages, paragraphs and positioned glyphs; it also decides where
//! words and lines break and reports those decisions as separator callbacks.

use pdfsax_core::ExtractError;

/// A rendered glyph with the position context used to detect boundaries.
///
/// Produced by the decoder and consumed within a single callback; handlers
/// must not assume glyphs outlive the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Unicode text of the glyph (usually one `char`, more for ligatures).
    pub text: String,
    /// Horizontal position in decoder units.
    pub x: f64,
    /// Vertical position in decoder units.
    pub y: f64,
    /// Font size in decoder units.
    pub font_size: f64,
}

impl Glyph {
    /// Create a glyph for one character at the given position.
    pub fn new(ch: char, x: f64, y: f64) -> Self {
        Self {
            text: ch.to_string(),
            x,
            y,
            font_size: 1.0,
        }
    }

    /// Set the font size, returning the modified glyph (builder pattern).
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Identity of a page being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Page number (1-based).
    pub number: usize,
}

impl PageInfo {
    pub fn new(number: usize) -> Self {
        Self { number }
    }
}

/// Callback handler driven by a document decoder.
///
/// Every method may fail; a failure aborts the remaining callback sequence and
/// the decoder must return it unchanged. All methods default to accepting the
/// callback and doing nothing.
///
/// # Structure
///
/// Documents contain pages, pages contain paragraphs. Decoders must balance
/// every start with an end.
///
/// # Text
///
/// [`on_glyph`](DecoderHandler::on_glyph) is called for each glyph.
/// [`on_word_break`](DecoderHandler::on_word_break) and
/// [`on_line_break`](DecoderHandler::on_line_break) report separators the
/// decoder inferred from glyph positions.
pub trait DecoderHandler {
    fn on_document_start(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    fn on_document_end(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    fn on_page_start(&mut self, _page: &PageInfo) -> Result<(), ExtractError> {
        Ok(())
    }

    fn on_page_end(&mut self, _page: &PageInfo) -> Result<(), ExtractError> {
        Ok(())
    }

    fn on_paragraph_start(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    fn on_paragraph_end(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    /// Called for each rendered glyph.
    fn on_glyph(&mut self, _glyph: &Glyph) -> Result<(), ExtractError> {
        Ok(())
    }

    /// Called where the decoder detected the end of a line.
    fn on_line_break(&mut self) -> Result<(), ExtractError> {
        Ok(())
    }

    /// Called between the last glyph of one word and the first of the next.
    fn on_word_break(&mut self, _before: &Glyph, _after: &Glyph) -> Result<(), ExtractError> {
        Ok(())
    }
}

impl<H: DecoderHandler + ?Sized> DecoderHandler for &mut H {
    fn on_document_start(&mut self) -> Result<(), ExtractError> {
        (**self).on_document_start()
    }

    fn on_document_end(&mut self) -> Result<(), ExtractError> {
        (**self).on_document_end()
    }

    fn on_page_start(&mut self, page: &PageInfo) -> Result<(), ExtractError> {
        (**self).on_page_start(page)
    }

    fn on_page_end(&mut self, page: &PageInfo) -> Result<(), ExtractError> {
        (**self).on_page_end(page)
    }

    fn on_paragraph_start(&mut self) -> Result<(), ExtractError> {
        (**self).on_paragraph_start()
    }

    fn on_paragraph_end(&mut self) -> Result<(), ExtractError> {
        (**self).on_paragraph_end()
    }

    fn on_glyph(&mut self, glyph: &Glyph) -> Result<(), ExtractError> {
        (**self).on_glyph(glyph)
    }

    fn on_line_break(&mut self) -> Result<(), ExtractError> {
        (**self).on_line_break()
    }

    fn on_word_break(&mut self, before: &Glyph, after: &Glyph) -> Result<(), ExtractError> {
        (**self).on_word_break(before, after)
    }
}
