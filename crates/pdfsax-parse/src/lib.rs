//! pdfsax-parse: Decoder boundary and structural transduction.
//!
//! This crate defines the [`DecoderHandler`] callbacks a page-oriented
//! document decoder drives, the [`StructuralTransducer`] that turns those
//! callbacks into a well-nested markup stream, the [`DocumentDecoder`] backend
//! trait, and two decoders: [`LopdfDecoder`] for PDF input and
//! [`PlainTextDecoder`] for plain text.

pub mod backend;
pub mod error;
pub mod handler;
pub mod lopdf_backend;
pub mod text_backend;
pub mod text_runs;
pub mod transducer;

pub use backend::DocumentDecoder;
pub use error::BackendError;
pub use handler::{DecoderHandler, Glyph, PageInfo};
pub use lopdf_backend::LopdfDecoder;
pub use pdfsax_core;
pub use text_backend::PlainTextDecoder;
pub use transducer::StructuralTransducer;
