//! Plain-text decoder.

use std::io::Read;

use pdfsax_core::metadata::PAGE_COUNT;
use pdfsax_core::{DecodeOptions, ExtractError, Metadata};
use tracing::debug;

use crate::backend::DocumentDecoder;
use crate::error::BackendError;
use crate::handler::{DecoderHandler, PageInfo};
use crate::text_runs::replay_page;

/// Page separator in plain-text input.
const FORM_FEED: char = '\x0C';

/// Decoder for UTF-8 text, with form feeds separating pages.
///
/// Invalid UTF-8 is replaced rather than rejected. Empty input yields a
/// document with no pages; a trailing form feed does not start a new page.
#[derive(Debug, Clone, Default)]
pub struct PlainTextDecoder {
    options: DecodeOptions,
}

impl PlainTextDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }
}

/// Split text into pages at form feeds.
fn split_pages(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix(FORM_FEED).unwrap_or(text);
    body.split(FORM_FEED).collect()
}

impl DocumentDecoder for PlainTextDecoder {
    fn name(&self) -> &'static str {
        "text"
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        handler: &mut dyn DecoderHandler,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes).map_err(BackendError::from)?;
        let text = String::from_utf8_lossy(&bytes);

        let pages = split_pages(&text);
        let limit = self.options.max_pages.unwrap_or(pages.len());
        debug!(pages = pages.len(), limit, "decoding plain text");
        metadata.set(PAGE_COUNT, pages.len().to_string());

        handler.on_document_start()?;
        for (index, page_text) in pages.iter().take(limit).enumerate() {
            replay_page(handler, &PageInfo::new(index + 1), page_text)?;
        }
        handler.on_document_end()
    }
}
