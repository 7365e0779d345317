//! Structural event model.
//!
//! A [`StructuralEvent`] is one step of the nested document → page →
//! paragraph → text stream. Sinks receive the same information through
//! [`ContentSink`](crate::ContentSink) calls; events are the owned form used
//! for recording.

/// Element name used for a page.
pub const PAGE_ELEMENT: &str = "div";

/// Element name used for a paragraph.
pub const PARAGRAPH_ELEMENT: &str = "p";

/// One structural event of the markup stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StructuralEvent {
    DocumentStart,
    DocumentEnd,
    PageStart,
    PageEnd,
    ParagraphStart,
    ParagraphEnd,
    /// Character data.
    Characters(String),
}

impl StructuralEvent {
    /// Map a start-element name to its event, if the name is known.
    pub fn start_of(name: &str) -> Option<Self> {
        match name {
            PAGE_ELEMENT => Some(StructuralEvent::PageStart),
            PARAGRAPH_ELEMENT => Some(StructuralEvent::ParagraphStart),
            _ => None,
        }
    }

    /// Map an end-element name to its event, if the name is known.
    pub fn end_of(name: &str) -> Option<Self> {
        match name {
            PAGE_ELEMENT => Some(StructuralEvent::PageEnd),
            PARAGRAPH_ELEMENT => Some(StructuralEvent::ParagraphEnd),
            _ => None,
        }
    }

    /// Returns `true` for [`StructuralEvent::Characters`].
    pub fn is_characters(&self) -> bool {
        matches!(self, StructuralEvent::Characters(_))
    }
}

/// Concatenate the character data of a sequence of events.
pub fn concat_text<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a StructuralEvent>,
{
    let mut out = String::new();
    for event in events {
        if let StructuralEvent::Characters(text) = event {
            out.push_str(text);
        }
    }
    out
}
