//! lopdf-based PDF decoder.
//!
//! Implements [`DocumentDecoder`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. Page text is recovered with lopdf's text extraction and replayed as
//! handler callbacks; the /Info dictionary is copied into the metadata record.

use std::io::Read;

use pdfsax_core::metadata::PAGE_COUNT;
use pdfsax_core::{DecodeOptions, DocumentMetadata, ExtractError, Metadata};
use tracing::{debug, trace};

use crate::backend::DocumentDecoder;
use crate::error::BackendError;
use crate::handler::{DecoderHandler, PageInfo};
use crate::text_runs::replay_page;

/// PDF decoder backed by lopdf.
#[derive(Debug, Clone, Default)]
pub struct LopdfDecoder {
    options: DecodeOptions,
}

impl LopdfDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Read the /Info dictionary without decoding any page content.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceDecode`] if the bytes are not a readable,
    /// unencrypted PDF.
    pub fn document_metadata(&self, bytes: &[u8]) -> Result<DocumentMetadata, ExtractError> {
        let doc = open_document(bytes)?;
        Ok(extract_document_metadata(&doc))
    }
}

/// Parse PDF bytes, rejecting encrypted documents.
fn open_document(bytes: &[u8]) -> Result<lopdf::Document, BackendError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;
    if doc.is_encrypted() {
        return Err(BackendError::Encrypted);
    }
    Ok(doc)
}

impl DocumentDecoder for LopdfDecoder {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn decode(
        &self,
        input: &mut dyn Read,
        handler: &mut dyn DecoderHandler,
        metadata: &mut Metadata,
    ) -> Result<(), ExtractError> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes).map_err(BackendError::from)?;
        let doc = open_document(&bytes)?;

        extract_document_metadata(&doc).apply_to(metadata);

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let limit = self.options.max_pages.unwrap_or(page_numbers.len());
        debug!(pages = page_numbers.len(), limit, "decoding PDF");
        metadata.set(PAGE_COUNT, page_numbers.len().to_string());

        handler.on_document_start()?;
        for &number in page_numbers.iter().take(limit) {
            let text = doc.extract_text(&[number]).map_err(|e| {
                BackendError::Parse(format!("failed to extract text from page {number}: {e}"))
            })?;
            trace!(page = number, chars = text.len(), "page text extracted");
            replay_page(handler, &PageInfo::new(number as usize), &text)?;
        }
        handler.on_document_end()
    }
}

/// Extract a string value from a dictionary, resolving references.
fn extract_string_from_dict(
    doc: &lopdf::Document,
    dict: &lopdf::Dictionary,
    key: &[u8],
) -> Option<String> {
    let obj = dict.get(key).ok()?;
    let obj = match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    match obj {
        lopdf::Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Decode a PDF string, handling the UTF-16 BE BOM.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            // Latin-1 fallback
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Extract document-level metadata from the PDF /Info dictionary.
///
/// A missing or malformed /Info entry yields empty metadata.
fn extract_document_metadata(doc: &lopdf::Document) -> DocumentMetadata {
    let info_dict = match doc.trailer.get(b"Info") {
        Ok(lopdf::Object::Reference(id)) => match doc.get_object(*id).and_then(|o| o.as_dict()) {
            Ok(dict) => dict,
            Err(_) => return DocumentMetadata::default(),
        },
        Ok(lopdf::Object::Dictionary(dict)) => dict,
        _ => return DocumentMetadata::default(),
    };

    DocumentMetadata {
        title: extract_string_from_dict(doc, info_dict, b"Title"),
        author: extract_string_from_dict(doc, info_dict, b"Author"),
        subject: extract_string_from_dict(doc, info_dict, b"Subject"),
        keywords: extract_string_from_dict(doc, info_dict, b"Keywords"),
        creator: extract_string_from_dict(doc, info_dict, b"Creator"),
        producer: extract_string_from_dict(doc, info_dict, b"Producer"),
        creation_date: extract_string_from_dict(doc, info_dict, b"CreationDate"),
        mod_date: extract_string_from_dict(doc, info_dict, b"ModDate"),
    }
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use pdfsax_core::metadata::{AUTHOR, TITLE};
    use pdfsax_core::{ErrorKind, EventRecorder, StructuralEvent};

    use super::*;
    use crate::transducer::StructuralTransducer;

    /// Build a PDF with one page per entry in `pages`, each showing one line.
    fn pdf_with_pages(pages: &[&str], title: Option<&str>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title),
                "Author" => Object::String(
                    vec![0xFE, 0xFF, 0x00, b'J', 0x00, b'o'],
                    lopdf::StringFormat::Hexadecimal,
                ),
            });
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    fn decode(
        decoder: &LopdfDecoder,
        bytes: &[u8],
    ) -> Result<(Vec<StructuralEvent>, Metadata), ExtractError> {
        let mut metadata = Metadata::new();
        let mut transducer = StructuralTransducer::new(EventRecorder::new());
        let mut reader = bytes;
        decoder.decode(&mut reader, &mut transducer, &mut metadata)?;
        Ok((transducer.into_sink().into_events(), metadata))
    }

    #[test]
    fn decode_pdf_string_utf16_and_latin1() {
        assert_eq!(decode_pdf_string(&[0xFE, 0xFF, 0x00, b'H', 0x00, b'i']), "Hi");
        assert_eq!(decode_pdf_string(b"plain"), "plain");
        assert_eq!(decode_pdf_string(&[b'c', 0xE9]), "c\u{e9}");
    }

    #[test]
    fn decodes_pages_as_balanced_events() {
        let bytes = pdf_with_pages(&["Hello World", "Second page"], None);
        let (events, metadata) = decode(&LopdfDecoder::default(), &bytes).unwrap();

        let starts = events.iter().filter(|e| **e == StructuralEvent::PageStart).count();
        let ends = events.iter().filter(|e| **e == StructuralEvent::PageEnd).count();
        assert_eq!(starts, 2);
        assert_eq!(ends, 2);
        assert_eq!(events.first(), Some(&StructuralEvent::DocumentStart));
        assert_eq!(events.last(), Some(&StructuralEvent::DocumentEnd));

        let text = pdfsax_core::concat_text(&events);
        assert!(text.contains("Hello World"), "text was {text:?}");
        assert!(text.contains("Second page"), "text was {text:?}");
        assert_eq!(metadata.get(PAGE_COUNT), Some("2"));
    }

    #[test]
    fn copies_info_dictionary() {
        let bytes = pdf_with_pages(&["x"], Some("Quarterly Report"));
        let (_, metadata) = decode(&LopdfDecoder::default(), &bytes).unwrap();
        assert_eq!(metadata.get(TITLE), Some("Quarterly Report"));
        assert_eq!(metadata.get(AUTHOR), Some("Jo"));
    }

    #[test]
    fn reads_info_without_decoding_pages() {
        let bytes = pdf_with_pages(&["x"], Some("Quarterly Report"));
        let info = LopdfDecoder::default().document_metadata(&bytes).unwrap();
        assert_eq!(info.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(info.author.as_deref(), Some("Jo"));

        let err = LopdfDecoder::default()
            .document_metadata(b"not a pdf")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceDecodeFailure);
    }

    #[test]
    fn missing_info_leaves_metadata_without_title() {
        let bytes = pdf_with_pages(&["x"], None);
        let (_, metadata) = decode(&LopdfDecoder::default(), &bytes).unwrap();
        assert!(!metadata.contains(TITLE));
    }

    #[test]
    fn max_pages_limits_decoded_pages() {
        let bytes = pdf_with_pages(&["one", "two", "three"], None);
        let decoder = LopdfDecoder::new(DecodeOptions { max_pages: Some(2) });
        let (events, metadata) = decode(&decoder, &bytes).unwrap();
        let starts = events.iter().filter(|e| **e == StructuralEvent::PageStart).count();
        assert_eq!(starts, 2);
        assert_eq!(metadata.get(PAGE_COUNT), Some("3"));
    }

    #[test]
    fn garbage_input_is_source_decode_failure() {
        let err = decode(&LopdfDecoder::default(), b"not a pdf at all").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceDecodeFailure);
        assert!(err.to_string().contains("failed to parse PDF"));
    }
}
