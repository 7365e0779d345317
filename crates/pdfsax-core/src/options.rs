//! Options controlling decoding, transduction and post-processing.

use crate::links::LINK_PATTERN;

/// Default number of characters kept in the `summary` field.
pub const DEFAULT_SUMMARY_CHARS: usize = 500;

/// Options for the decoders shipped with pdfsax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of pages to decode (default: None = no limit).
    pub max_pages: Option<usize>,
}

/// Options for the structural transducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransducerOptions {
    /// Coalesce consecutive glyph, space and newline text into a single
    /// `characters` call (default: false).
    ///
    /// The concatenated text is identical either way; only the number of
    /// `characters` calls reaching the sink changes.
    pub coalesce_glyphs: bool,
}

/// Options for the capture-and-derive post-processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessOptions {
    /// Maximum number of characters copied into `summary` (default: 500).
    pub summary_chars: usize,
    /// Regular expression used to find outlinks (default: [`LINK_PATTERN`]).
    pub link_pattern: String,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self {
            summary_chars: DEFAULT_SUMMARY_CHARS,
            link_pattern: LINK_PATTERN.to_string(),
        }
    }
}
