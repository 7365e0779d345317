//! Plain-text capture sink.

use crate::error::SinkError;
use crate::sink::ContentSink;

/// Sink that appends all character data to an in-memory string.
///
/// Structural events are accepted and ignored, so the collected text is the
/// exact concatenation of every `characters` call in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCollector {
    text: String,
}

impl TextCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text collected so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of `char`s collected so far.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Consume the collector, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl ContentSink for TextCollector {
    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        self.text.push_str(text);
        Ok(())
    }
}
