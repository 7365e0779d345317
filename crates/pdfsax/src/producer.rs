//! Content producers.
//!
//! A [`ContentProducer`] turns an input stream into structured-content sink
//! events, optionally adding fields to a [`Metadata`] record. The usual
//! producer is a [`DecoderProducer`]: a document decoder driving a
//! [`StructuralTransducer`].

use std::io::Read;

use pdfsax_core::{ContentSink, ExtractError, Metadata, Phase, TransducerOptions};
use pdfsax_parse::{DocumentDecoder, LopdfDecoder, PlainTextDecoder, StructuralTransducer};
use tracing::debug;

/// Anything that can turn an input stream into sink events.
///
/// Implementations are synchronous and must not retain `sink` or `metadata`
/// beyond the call.
pub trait ContentProducer {
    /// Produce content from `input` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] if decoding fails, the sink rejects an
    /// event, or the event sequence is malformed.
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError>;
}

impl<P: ContentProducer + ?Sized> ContentProducer for &P {
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        (**self).produce(input, sink, metadata)
    }
}

impl<P: ContentProducer + ?Sized> ContentProducer for Box<P> {
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        (**self).produce(input, sink, metadata)
    }
}

/// Producer backed by a closure. Created with [`from_fn`].
#[derive(Debug, Clone)]
pub struct FnProducer<F> {
    f: F,
}

/// Wrap a closure as a [`ContentProducer`].
pub fn from_fn<F>(f: F) -> FnProducer<F>
where
    F: Fn(&mut dyn Read, &mut dyn ContentSink, &mut Metadata) -> Result<(), ExtractError>,
{
    FnProducer { f }
}

impl<F> ContentProducer for FnProducer<F>
where
    F: Fn(&mut dyn Read, &mut dyn ContentSink, &mut Metadata) -> Result<(), ExtractError>,
{
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        (self.f)(input, sink, metadata)
    }
}

/// A document decoder driving a structural transducer.
#[derive(Debug, Clone, Default)]
pub struct DecoderProducer<D> {
    decoder: D,
    options: TransducerOptions,
}

/// PDF producer using the lopdf decoder.
pub type PdfProducer = DecoderProducer<LopdfDecoder>;

/// Plain-text producer.
pub type TextProducer = DecoderProducer<PlainTextDecoder>;

impl<D: DocumentDecoder> DecoderProducer<D> {
    pub fn new(decoder: D) -> Self {
        Self::with_options(decoder, TransducerOptions::default())
    }

    pub fn with_options(decoder: D, options: TransducerOptions) -> Self {
        Self { decoder, options }
    }

    /// The wrapped decoder.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }
}

impl<D: DocumentDecoder> ContentProducer for DecoderProducer<D> {
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        debug!(decoder = self.decoder.name(), "producing structured content");
        // Decoder fields are staged so a failed decode leaves `metadata` as it was.
        let mut staged = Metadata::new();
        let mut transducer = StructuralTransducer::with_options(sink, self.options.clone());
        self.decoder.decode(input, &mut transducer, &mut staged)?;
        if !transducer.is_finished() {
            return Err(ExtractError::protocol(
                Phase::EndDocument,
                format!("{} decoder returned without ending the document", self.decoder.name()),
            ));
        }
        metadata.merge(staged);
        Ok(())
    }
}
