//! Structured-content sink capability.
//!
//! Defines the [`ContentSink`] trait that receives the nested markup stream,
//! together with the stock adapters: [`TeeSink`] fans one stream out to two
//! sinks, [`EventRecorder`] keeps an owned copy of every event, and
//! [`NullSink`] discards everything.

use crate::error::SinkError;
use crate::event::StructuralEvent;

/// Receiver of the structured markup stream.
///
/// Every method may fail to signal a downstream fault (a closed pipe, a
/// consumer-side parse error). All methods default to accepting the event
/// and doing nothing, so sinks only implement what they care about.
pub trait ContentSink {
    /// Called once before any other event.
    fn start_document(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called once after every other event.
    fn end_document(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called when an element (page `div`, paragraph `p`) opens.
    fn start_element(&mut self, _name: &str) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called when an element closes.
    fn end_element(&mut self, _name: &str) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called with character data.
    fn characters(&mut self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: ContentSink + ?Sized> ContentSink for &mut S {
    fn start_document(&mut self) -> Result<(), SinkError> {
        (**self).start_document()
    }

    fn end_document(&mut self) -> Result<(), SinkError> {
        (**self).end_document()
    }

    fn start_element(&mut self, name: &str) -> Result<(), SinkError> {
        (**self).start_element(name)
    }

    fn end_element(&mut self, name: &str) -> Result<(), SinkError> {
        (**self).end_element(name)
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).characters(text)
    }
}

impl<S: ContentSink + ?Sized> ContentSink for Box<S> {
    fn start_document(&mut self) -> Result<(), SinkError> {
        (**self).start_document()
    }

    fn end_document(&mut self) -> Result<(), SinkError> {
        (**self).end_document()
    }

    fn start_element(&mut self, name: &str) -> Result<(), SinkError> {
        (**self).start_element(name)
    }

    fn end_element(&mut self, name: &str) -> Result<(), SinkError> {
        (**self).end_element(name)
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).characters(text)
    }
}

/// Sink that fans every call out to a primary and a capture sink.
///
/// The primary sink is always invoked first. If it fails, the capture sink
/// does not see the event and the primary's error is returned; otherwise the
/// capture sink's result is returned.
#[derive(Debug)]
pub struct TeeSink<A, B> {
    primary: A,
    capture: B,
}

impl<A: ContentSink, B: ContentSink> TeeSink<A, B> {
    /// Create a tee over the two sinks.
    pub fn new(primary: A, capture: B) -> Self {
        Self { primary, capture }
    }

    /// The primary sink.
    pub fn primary(&self) -> &A {
        &self.primary
    }

    /// The capture sink.
    pub fn capture(&self) -> &B {
        &self.capture
    }

    /// Split the tee back into its two sinks.
    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.capture)
    }
}

impl<A: ContentSink, B: ContentSink> ContentSink for TeeSink<A, B> {
    fn start_document(&mut self) -> Result<(), SinkError> {
        self.primary.start_document()?;
        self.capture.start_document()
    }

    fn end_document(&mut self) -> Result<(), SinkError> {
        self.primary.end_document()?;
        self.capture.end_document()
    }

    fn start_element(&mut self, name: &str) -> Result<(), SinkError> {
        self.primary.start_element(name)?;
        self.capture.start_element(name)
    }

    fn end_element(&mut self, name: &str) -> Result<(), SinkError> {
        self.primary.end_element(name)?;
        self.capture.end_element(name)
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        self.primary.characters(text)?;
        self.capture.characters(text)
    }
}

/// Sink that accepts and discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ContentSink for NullSink {}

/// Sink that records every event it receives.
///
/// Element names other than the page and paragraph names are rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecorder {
    events: Vec<StructuralEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far, in arrival order.
    pub fn events(&self) -> &[StructuralEvent] {
        &self.events
    }

    /// Consume the recorder, returning its events.
    pub fn into_events(self) -> Vec<StructuralEvent> {
        self.events
    }

    /// Concatenated character data of all recorded events.
    pub fn text(&self) -> String {
        crate::event::concat_text(&self.events)
    }
}

impl ContentSink for EventRecorder {
    fn start_document(&mut self) -> Result<(), SinkError> {
        self.events.push(StructuralEvent::DocumentStart);
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), SinkError> {
        self.events.push(StructuralEvent::DocumentEnd);
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), SinkError> {
        let event = StructuralEvent::start_of(name)
            .ok_or_else(|| SinkError::new(format!("unsupported element <{name}>")))?;
        self.events.push(event);
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), SinkError> {
        let event = StructuralEvent::end_of(name)
            .ok_or_else(|| SinkError::new(format!("unsupported element </{name}>")))?;
        self.events.push(event);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        self.events.push(StructuralEvent::Characters(text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that fails on every call after accepting `remaining` calls.
    struct FailAfter {
        remaining: usize,
        calls: usize,
    }

    impl FailAfter {
        fn new(remaining: usize) -> Self {
            Self {
                remaining,
                calls: 0,
            }
        }

        fn tick(&mut self) -> Result<(), SinkError> {
            self.calls += 1;
            if self.remaining == 0 {
                return Err(SinkError::new("downstream closed"));
            }
            self.remaining -= 1;
            Ok(())
        }
    }

    impl ContentSink for FailAfter {
        fn start_document(&mut self) -> Result<(), SinkError> {
            self.tick()
        }

        fn characters(&mut self, _text: &str) -> Result<(), SinkError> {
            self.tick()
        }
    }

    #[test]
    fn tee_delivers_to_both_in_order() {
        let mut tee = TeeSink::new(EventRecorder::new(), EventRecorder::new());
        tee.start_document().unwrap();
        tee.start_element("div").unwrap();
        tee.characters("ab").unwrap();
        tee.end_element("div").unwrap();
        tee.end_document().unwrap();

        let (primary, capture) = tee.into_inner();
        assert_eq!(primary, capture);
        assert_eq!(primary.events().len(), 5);
        assert_eq!(primary.text(), "ab");
    }

    #[test]
    fn tee_stops_at_primary_failure() {
        let mut tee = TeeSink::new(FailAfter::new(0), EventRecorder::new());
        let err = tee.characters("x").unwrap_err();
        assert_eq!(err.message(), "downstream closed");
        assert!(tee.capture().events().is_empty());
    }

    #[test]
    fn tee_reports_capture_failure_after_primary() {
        let mut tee = TeeSink::new(EventRecorder::new(), FailAfter::new(1));
        tee.start_document().unwrap();
        assert!(tee.characters("x").is_err());
        assert_eq!(tee.primary().events().len(), 2);
        assert_eq!(tee.capture().calls, 2);
    }

    #[test]
    fn null_sink_accepts_everything() {
        let mut sink = NullSink;
        sink.start_document().unwrap();
        sink.start_element("anything").unwrap();
        sink.characters("text").unwrap();
        sink.end_element("anything").unwrap();
        sink.end_document().unwrap();
    }

    #[test]
    fn recorder_rejects_unknown_elements() {
        let mut recorder = EventRecorder::new();
        let err = recorder.start_element("table").unwrap_err();
        assert!(err.message().contains("<table>"));
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn sink_is_object_safe_and_forwards_through_references() {
        let mut recorder = EventRecorder::new();
        {
            let sink: &mut dyn ContentSink = &mut recorder;
            TeeSink::new(sink, NullSink).characters("a").unwrap();
        }
        let mut boxed: Box<dyn ContentSink> = Box::new(EventRecorder::new());
        boxed.characters("b").unwrap();
        assert_eq!(recorder.text(), "a");
    }
}
