//! Structural transduction of decoder callbacks into markup events.
//!
//! [`StructuralTransducer`] implements [`DecoderHandler`] and forwards a
//! properly nested document → page (`div`) → paragraph (`p`) → text stream to
//! a [`ContentSink`]. It validates call nesting instead of repairing it: an
//! unbalanced sequence is reported as a protocol violation, and any sink
//! failure is wrapped with the phase that was being forwarded.

use std::mem;

use pdfsax_core::{
    ContentSink, ExtractError, PAGE_ELEMENT, PARAGRAPH_ELEMENT, Phase, SinkResultExt,
    TransducerOptions,
};
use tracing::{trace, warn};

use crate::handler::{DecoderHandler, Glyph, PageInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    NotStarted,
    Open,
    Ended,
}

/// Converts decoder callbacks into a nested structural event stream.
///
/// Nesting rules:
/// - the document starts exactly once, before anything else, and ends once
/// - pages do not nest; a page end must match the open page
/// - paragraphs live inside a page and do not nest
/// - text (glyphs, word and line breaks) requires an open page but not an
///   open paragraph
/// - a page cannot end with a paragraph open, and the document cannot end
///   with a page open
#[derive(Debug)]
pub struct StructuralTransducer<S> {
    sink: S,
    options: TransducerOptions,
    state: DocumentState,
    open_page: Option<usize>,
    paragraph_open: bool,
    pending: String,
}

impl<S: ContentSink> StructuralTransducer<S> {
    /// Create a transducer forwarding one event per callback.
    pub fn new(sink: S) -> Self {
        Self::with_options(sink, TransducerOptions::default())
    }

    pub fn with_options(sink: S, options: TransducerOptions) -> Self {
        Self {
            sink,
            options,
            state: DocumentState::NotStarted,
            open_page: None,
            paragraph_open: false,
            pending: String::new(),
        }
    }

    /// The downstream sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the transducer, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Returns `true` once the document has been ended.
    pub fn is_finished(&self) -> bool {
        self.state == DocumentState::Ended
    }

    /// Number of the currently open page, if any.
    pub fn open_page(&self) -> Option<usize> {
        self.open_page
    }

    fn violation(&self, phase: Phase, reason: String) -> ExtractError {
        warn!(%phase, %reason, "decoder protocol violation");
        ExtractError::protocol(phase, reason)
    }

    fn require_open_document(&self, phase: Phase) -> Result<(), ExtractError> {
        match self.state {
            DocumentState::Open => Ok(()),
            DocumentState::NotStarted => {
                Err(self.violation(phase, "the document has not been started".to_string()))
            }
            DocumentState::Ended => {
                Err(self.violation(phase, "the document has already ended".to_string()))
            }
        }
    }

    fn require_open_page(&self, phase: Phase) -> Result<usize, ExtractError> {
        self.require_open_document(phase)?;
        self.open_page
            .ok_or_else(|| self.violation(phase, "no page is open".to_string()))
    }

    /// Forward character data, or buffer it when coalescing.
    fn emit(&mut self, text: &str, phase: Phase) -> Result<(), ExtractError> {
        if self.options.coalesce_glyphs {
            self.pending.push_str(text);
            Ok(())
        } else {
            self.sink.characters(text).during(phase)
        }
    }

    /// Deliver buffered character data before a structural event.
    fn flush(&mut self) -> Result<(), ExtractError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.pending);
        self.sink.characters(&text).during(Phase::WriteCharacters)
    }
}

impl<S: ContentSink> DecoderHandler for StructuralTransducer<S> {
    fn on_document_start(&mut self) -> Result<(), ExtractError> {
        if self.state != DocumentState::NotStarted {
            return Err(self.violation(
                Phase::StartDocument,
                "the document was already started".to_string(),
            ));
        }
        self.sink.start_document().during(Phase::StartDocument)?;
        self.state = DocumentState::Open;
        trace!("document started");
        Ok(())
    }

    fn on_document_end(&mut self) -> Result<(), ExtractError> {
        self.require_open_document(Phase::EndDocument)?;
        if let Some(open) = self.open_page {
            return Err(self.violation(
                Phase::EndDocument,
                format!("page {open} is still open"),
            ));
        }
        self.flush()?;
        self.sink.end_document().during(Phase::EndDocument)?;
        self.state = DocumentState::Ended;
        trace!("document ended");
        Ok(())
    }

    fn on_page_start(&mut self, page: &PageInfo) -> Result<(), ExtractError> {
        self.require_open_document(Phase::StartPage)?;
        if let Some(open) = self.open_page {
            return Err(self.violation(
                Phase::StartPage,
                format!("page {} started while page {open} is still open", page.number),
            ));
        }
        self.flush()?;
        self.sink.start_element(PAGE_ELEMENT).during(Phase::StartPage)?;
        self.open_page = Some(page.number);
        trace!(page = page.number, "page started");
        Ok(())
    }

    fn on_page_end(&mut self, page: &PageInfo) -> Result<(), ExtractError> {
        let open = self.require_open_page(Phase::EndPage)?;
        if open != page.number {
            return Err(self.violation(
                Phase::EndPage,
                format!("page {} ended while page {open} is open", page.number),
            ));
        }
        if self.paragraph_open {
            return Err(self.violation(
                Phase::EndPage,
                format!("page {open} ended with a paragraph still open"),
            ));
        }
        self.flush()?;
        self.sink.end_element(PAGE_ELEMENT).during(Phase::EndPage)?;
        self.open_page = None;
        trace!(page = open, "page ended");
        Ok(())
    }

    fn on_paragraph_start(&mut self) -> Result<(), ExtractError> {
        self.require_open_page(Phase::StartParagraph)?;
        if self.paragraph_open {
            return Err(self.violation(
                Phase::StartParagraph,
                "a paragraph is already open".to_string(),
            ));
        }
        self.flush()?;
        self.sink
            .start_element(PARAGRAPH_ELEMENT)
            .during(Phase::StartParagraph)?;
        self.paragraph_open = true;
        Ok(())
    }

    fn on_paragraph_end(&mut self) -> Result<(), ExtractError> {
        self.require_open_page(Phase::EndParagraph)?;
        if !self.paragraph_open {
            return Err(self.violation(
                Phase::EndParagraph,
                "no paragraph is open".to_string(),
            ));
        }
        self.flush()?;
        self.sink
            .end_element(PARAGRAPH_ELEMENT)
            .during(Phase::EndParagraph)?;
        self.paragraph_open = false;
        Ok(())
    }

    fn on_glyph(&mut self, glyph: &Glyph) -> Result<(), ExtractError> {
        self.require_open_page(Phase::WriteCharacters)?;
        self.emit(&glyph.text, Phase::WriteCharacters)
    }

    fn on_line_break(&mut self) -> Result<(), ExtractError> {
        self.require_open_page(Phase::WriteNewline)?;
        self.emit("\n", Phase::WriteNewline)
    }

    fn on_word_break(&mut self, _before: &Glyph, _after: &Glyph) -> Result<(), ExtractError> {
        self.require_open_page(Phase::WriteSpace)?;
        self.emit(" ", Phase::WriteSpace)
    }
}
