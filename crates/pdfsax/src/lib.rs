//! pdfsax: Stream document content as nested markup events and derive
//! full-text metadata from the same stream.
//!
//! This is the public API facade crate. It re-exports the core types and ties
//! decoders, the structural transducer and the post-processor together.
//!
//! # Architecture
//!
//! - **pdfsax-core**: events, sinks, metadata record, link grammar, errors
//! - **pdfsax-parse**: decoder callbacks, structural transducer, decoders
//! - **pdfsax** (this crate): content producers and the post-processor
//!
//! # Example
//!
//! ```no_run
//! use pdfsax::{Metadata, NullSink, PostProcessor, ContentProducer, TextProducer};
//!
//! let producer = PostProcessor::new(TextProducer::default());
//! let mut metadata = Metadata::new();
//! let mut input: &[u8] = b"see http://example.com/a";
//! producer.produce(&mut input, &mut NullSink, &mut metadata)?;
//! assert_eq!(metadata.get_values("outlinks"), ["http://example.com/a"]);
//! # Ok::<(), pdfsax::ExtractError>(())
//! ```

pub mod post_processor;
pub mod producer;

pub use pdfsax_core;
pub use pdfsax_core::metadata;
pub use pdfsax_core::{
    ContentSink, DEFAULT_SUMMARY_CHARS, DecodeOptions, DocumentMetadata, ErrorKind,
    EventRecorder, ExtractError, LINK_PATTERN, LinkExtractor, Metadata, NullSink, PatternError,
    Phase, PostProcessOptions, SinkError, StructuralEvent, TeeSink, TextCollector,
    TransducerOptions, XhtmlWriter,
};
pub use pdfsax_parse;
pub use pdfsax_parse::{
    DecoderHandler, DocumentDecoder, Glyph, LopdfDecoder, PageInfo, PlainTextDecoder,
    StructuralTransducer,
};
pub use post_processor::{DerivedFields, PostProcessor, extract_with_post_processing, summarize};
pub use producer::{
    ContentProducer, DecoderProducer, FnProducer, PdfProducer, TextProducer, from_fn,
};
