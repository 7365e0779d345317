//! pdfsax-core: Backend-independent types for the pdfsax pipeline.
//!
//! This crate provides the structural event model, the [`ContentSink`]
//! capability and its stock implementations (tee, text capture, recorder,
//! XHTML serializer), the [`Metadata`] record, the link grammar, and the
//! error and option types shared by the parse and facade crates.

pub mod error;
pub mod event;
pub mod links;
pub mod metadata;
pub mod options;
pub mod sink;
pub mod text_sink;
pub mod xhtml;

pub use error::{BoxError, ErrorKind, ExtractError, Phase, SinkError, SinkResultExt};
pub use event::{PAGE_ELEMENT, PARAGRAPH_ELEMENT, StructuralEvent, concat_text};
pub use links::{LINK_PATTERN, LinkExtractor, PatternError};
pub use metadata::{DocumentMetadata, Metadata};
pub use options::{DEFAULT_SUMMARY_CHARS, DecodeOptions, PostProcessOptions, TransducerOptions};
pub use sink::{ContentSink, EventRecorder, NullSink, TeeSink};
pub use text_sink::TextCollector;
pub use xhtml::XhtmlWriter;
