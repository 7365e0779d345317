//! Error types for pdfsax.
//!
//! Provides [`ExtractError`] for fatal failures that abort an extraction,
//! [`ErrorKind`] for matching on the failure category without destructuring,
//! [`Phase`] for labelling which structural transition failed, and
//! [`SinkError`] for failures raised by a [`ContentSink`](crate::ContentSink).

use std::fmt;

use thiserror::Error;

/// Boxed error type used to carry an opaque underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure category of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Malformed start/end nesting presented to the transducer.
    ProtocolViolation,
    /// The structured-content sink rejected an event.
    DownstreamSinkFailure,
    /// The document decoder could not produce further callbacks.
    SourceDecodeFailure,
    /// The link grammar failed to compile.
    ConfigurationDefect,
}

impl ErrorKind {
    /// Returns the string tag for this error kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ProtocolViolation => "PROTOCOL_VIOLATION",
            ErrorKind::DownstreamSinkFailure => "DOWNSTREAM_SINK_FAILURE",
            ErrorKind::SourceDecodeFailure => "SOURCE_DECODE_FAILURE",
            ErrorKind::ConfigurationDefect => "CONFIGURATION_DEFECT",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structural transition or derivation step an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    StartDocument,
    EndDocument,
    StartPage,
    EndPage,
    StartParagraph,
    EndParagraph,
    /// Forwarding glyph text.
    WriteCharacters,
    /// Forwarding a reconstructed line break.
    WriteNewline,
    /// Forwarding a reconstructed word separator.
    WriteSpace,
    /// Scanning the captured text for link tokens.
    ScanLinks,
}

impl Phase {
    /// Human-readable label, e.g. `"starting a page"`.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::StartDocument => "starting a document",
            Phase::EndDocument => "ending a document",
            Phase::StartPage => "starting a page",
            Phase::EndPage => "ending a page",
            Phase::StartParagraph => "starting a paragraph",
            Phase::EndParagraph => "ending a paragraph",
            Phase::WriteCharacters => "writing characters",
            Phase::WriteNewline => "writing a newline",
            Phase::WriteSpace => "writing a space",
            Phase::ScanLinks => "scanning for links",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error raised by a structured-content sink when it rejects an event.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SinkError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl SinkError {
    /// Create a sink error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a sink error wrapping a lower-level cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The sink's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::with_source(format!("I/O error: {err}"), err)
    }
}

/// Fatal error for a single extraction call.
///
/// Every variant corresponds to one [`ErrorKind`]. Errors carry their
/// underlying cause through [`std::error::Error::source`] rather than by
/// flattening it into the message.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The decoder presented a start/end sequence that is not properly nested.
    #[error("protocol violation while {phase}: {reason}")]
    ProtocolViolation {
        /// Transition that was attempted.
        phase: Phase,
        /// What was wrong with the call sequence.
        reason: String,
    },

    /// The downstream sink failed while an event was being forwarded.
    #[error("sink failed while {phase}: {source}")]
    DownstreamSink {
        /// Transition that was being forwarded.
        phase: Phase,
        /// The sink's failure.
        #[source]
        source: SinkError,
    },

    /// The document decoder failed.
    #[error("unable to extract document content: {source}")]
    SourceDecode {
        /// The decoder's failure.
        #[source]
        source: BoxError,
    },

    /// The link grammar could not be compiled.
    #[error("Malformed URL pattern")]
    ConfigurationDefect {
        /// The pattern compiler's failure.
        #[source]
        source: regex::Error,
    },
}

impl ExtractError {
    /// Build a [`ExtractError::ProtocolViolation`].
    pub fn protocol(phase: Phase, reason: impl Into<String>) -> Self {
        ExtractError::ProtocolViolation {
            phase,
            reason: reason.into(),
        }
    }

    /// Build a [`ExtractError::DownstreamSink`] for the given phase.
    pub fn sink(phase: Phase, source: SinkError) -> Self {
        ExtractError::DownstreamSink { phase, source }
    }

    /// Build a [`ExtractError::SourceDecode`] from any decoder error.
    pub fn decode(source: impl Into<BoxError>) -> Self {
        ExtractError::SourceDecode {
            source: source.into(),
        }
    }

    /// The failure category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::ProtocolViolation { .. } => ErrorKind::ProtocolViolation,
            ExtractError::DownstreamSink { .. } => ErrorKind::DownstreamSinkFailure,
            ExtractError::SourceDecode { .. } => ErrorKind::SourceDecodeFailure,
            ExtractError::ConfigurationDefect { .. } => ErrorKind::ConfigurationDefect,
        }
    }

    /// The phase label, for the variants that carry one.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ExtractError::ProtocolViolation { phase, .. }
            | ExtractError::DownstreamSink { phase, .. } => Some(*phase),
            ExtractError::ConfigurationDefect { .. } => Some(Phase::ScanLinks),
            ExtractError::SourceDecode { .. } => None,
        }
    }
}

/// Extension for attaching a [`Phase`] to a sink result.
pub trait SinkResultExt<T> {
    /// Convert a sink failure into [`ExtractError::DownstreamSink`].
    fn during(self, phase: Phase) -> Result<T, ExtractError>;
}

impl<T> SinkResultExt<T> for Result<T, SinkError> {
    fn during(self, phase: Phase) -> Result<T, ExtractError> {
        self.map_err(|e| ExtractError::sink(phase, e))
    }
}
