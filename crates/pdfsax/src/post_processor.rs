//! Capture-and-derive post-processing.
//!
//! [`PostProcessor`] decorates any [`ContentProducer`]. Every event the
//! wrapped producer sends to the caller's sink is also delivered to a private
//! [`TextCollector`]. Once the producer succeeds, the captured text fills three
//! metadata fields:
//!
//! - `fulltext`: the captured text (overwrites)
//! - `summary`: its first [`PostProcessOptions::summary_chars`] characters (overwrites)
//! - `outlinks`: every link token found in it, in order of appearance (appends)
//!
//! The wrapped producer writes into a staged copy of the metadata record. The
//! copy replaces the caller's record only after the producer and derivation
//! both succeed, so the record is either fully updated or left as it was.

use std::io::Read;

use pdfsax_core::metadata::{FULLTEXT, OUTLINKS, SUMMARY};
use pdfsax_core::{
    ContentSink, ExtractError, LinkExtractor, Metadata, PatternError, PostProcessOptions,
    TeeSink, TextCollector,
};
use tracing::debug;

use crate::producer::ContentProducer;

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Truncation is by `char`, never splitting a UTF-8 sequence, and ignores
/// word boundaries.
pub fn summarize(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Metadata values derived from captured text, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFields {
    pub fulltext: String,
    pub summary: String,
    pub outlinks: Vec<String>,
}

impl DerivedFields {
    /// Derive all fields from `content`, keeping at most `summary_chars`
    /// characters in the summary.
    pub fn derive(content: String, links: &LinkExtractor, summary_chars: usize) -> Self {
        let outlinks = links.extract(&content);
        let summary = summarize(&content, summary_chars).to_string();
        Self {
            fulltext: content,
            summary,
            outlinks,
        }
    }

    /// Write the fields into `metadata`.
    pub fn apply_to(self, metadata: &mut Metadata) {
        metadata.set(FULLTEXT, self.fulltext);
        metadata.set(SUMMARY, self.summary);
        for link in self.outlinks {
            metadata.add(OUTLINKS, link);
        }
    }
}

/// Decorator adding full-text, summary and link fields to any producer.
///
/// The link pattern is compiled once, when the decorator is built. Holds no
/// per-call state; one instance may serve any number of calls.
#[derive(Debug, Clone)]
pub struct PostProcessor<P> {
    inner: P,
    options: PostProcessOptions,
    links: Result<LinkExtractor, PatternError>,
}

impl<P: ContentProducer> PostProcessor<P> {
    pub fn new(inner: P) -> Self {
        Self::with_options(inner, PostProcessOptions::default())
    }

    /// Wrap `inner` with custom options.
    ///
    /// A link pattern that does not compile is reported by every later
    /// [`produce`](ContentProducer::produce) call, before the wrapped
    /// producer runs.
    pub fn with_options(inner: P, options: PostProcessOptions) -> Self {
        let links = LinkExtractor::compile(&options.link_pattern);
        Self {
            inner,
            options,
            links,
        }
    }

    /// The wrapped producer.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn options(&self) -> &PostProcessOptions {
        &self.options
    }

    fn link_extractor(&self) -> Result<&LinkExtractor, ExtractError> {
        self.links
            .as_ref()
            .map_err(|source| ExtractError::ConfigurationDefect {
                source: source.clone(),
            })
    }
}

impl<P: ContentProducer> ContentProducer for PostProcessor<P> {
    fn produce(
        &self,
        input: &mut dyn Read,
        sink: &mut dyn ContentSink,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        let links = self.link_extractor().inspect_err(|err| {
            debug!(error = %err, pattern = %self.options.link_pattern, "link pattern rejected");
        })?;

        debug!("forwarding content through capture");
        let mut staged = metadata.clone();
        let mut tee = TeeSink::new(sink, TextCollector::new());
        if let Err(err) = self.inner.produce(input, &mut tee, &mut staged) {
            debug!(error = %err, kind = %err.kind(), "producer failed, metadata untouched");
            return Err(err);
        }

        let (_, captured) = tee.into_inner();
        debug!(chars = captured.char_count(), "deriving metadata");
        let derived =
            DerivedFields::derive(captured.into_text(), links, self.options.summary_chars);
        debug!(outlinks = derived.outlinks.len(), "committing derived metadata");
        derived.apply_to(&mut staged);
        *metadata = staged;
        Ok(())
    }
}

/// Run `producer` with post-processing under default options.
///
/// # Errors
///
/// Returns the producer's failure unchanged, or a configuration defect if
/// link scanning cannot start.
pub fn extract_with_post_processing<P: ContentProducer + ?Sized>(
    producer: &P,
    input: &mut dyn Read,
    sink: &mut dyn ContentSink,
    metadata: &mut Metadata,
) -> Result<(), ExtractError> {
    PostProcessor::new(producer).produce(input, sink, metadata)
}
