//! Document decoder trait.
//!
//! Defines the [`DocumentDecoder`] trait that abstracts the page-oriented
//! decoder feeding a [`DecoderHandler`]. This enables pluggable decoders
//! (lopdf-backed PDF, plain text, or an external engine) behind one pipeline.

use std::io::Read;

use pdfsax_core::{ExtractError, Metadata};

use crate::handler::DecoderHandler;

/// Trait abstracting a document decoder.
///
/// A decoder reads a byte stream, copies any document properties it knows
/// about into the caller's [`Metadata`] record, and replays the document's
/// content as [`DecoderHandler`] callbacks.
///
/// # Usage
///
/// ```ignore
/// let decoder = PlainTextDecoder::default();
/// let mut transducer = StructuralTransducer::new(sink);
/// decoder.decode(&mut input, &mut transducer, &mut metadata)?;
/// ```
pub trait DocumentDecoder {
    /// Short name used in log output (e.g. `"pdf"`).
    fn name(&self) -> &'static str;

    /// Decode `input`, driving `handler`.
    ///
    /// Implementations must balance every start callback with its end
    /// callback, and must return handler failures unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceDecode`] if the input cannot be decoded,
    /// or whatever error the handler raised.
    fn decode(
        &self,
        input: &mut dyn Read,
        handler: &mut dyn DecoderHandler,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError>;
}

impl<D: DocumentDecoder + ?Sized> DocumentDecoder for &D {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        handler: &mut dyn DecoderHandler,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        (**self).decode(input, handler, metadata)
    }
}

impl<D: DocumentDecoder + ?Sized> DocumentDecoder for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        handler: &mut dyn DecoderHandler,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        (**self).decode(input, handler, metadata)
    }
}
