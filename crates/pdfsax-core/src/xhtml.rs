//! XHTML serialization of the structural event stream.
//!
//! [`XhtmlWriter`] is a [`ContentSink`] that writes the markup it receives to
//! any [`std::io::Write`], producing a minimal XHTML document with one `<div>`
//! per page and one `<p>` per paragraph.

use std::io::Write;

use crate::error::SinkError;
use crate::sink::ContentSink;

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Sink that serializes events as XHTML markup.
#[derive(Debug)]
pub struct XhtmlWriter<W: Write> {
    out: W,
    title: Option<String>,
}

impl<W: Write> XhtmlWriter<W> {
    /// Create a writer over the given output.
    pub fn new(out: W) -> Self {
        Self { out, title: None }
    }

    /// Emit a `<title>` element in the document head.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the writer, returning the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ContentSink for XhtmlWriter<W> {
    fn start_document(&mut self) -> Result<(), SinkError> {
        write!(self.out, "<html xmlns=\"{XHTML_NAMESPACE}\">\n<head>\n")?;
        if let Some(title) = &self.title {
            writeln!(self.out, "<title>{}</title>", escape_text(title))?;
        }
        self.out.write_all(b"</head>\n<body>\n")?;
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), SinkError> {
        self.out.write_all(b"</body>\n</html>\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), SinkError> {
        write!(self.out, "<{name}>")?;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), SinkError> {
        writeln!(self.out, "</{name}>")?;
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), SinkError> {
        self.out.write_all(escape_text(text).as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters in character data.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
