//! Integration tests for the extraction pipeline.
//!
//! These tests exercise the full path:
//! bytes → decoder → StructuralTransducer → TeeSink → sink + TextCollector →
//! derived metadata.
//!
//! Test PDFs are created programmatically using lopdf.

use pdfsax::metadata::{FULLTEXT, OUTLINKS, PAGE_COUNT, SUMMARY, TITLE};
use pdfsax::{
    ContentProducer, DecodeOptions, DecoderProducer, ErrorKind, EventRecorder, Metadata,
    NullSink, PdfProducer, PlainTextDecoder, PostProcessor, StructuralEvent, TextProducer,
    TransducerOptions, XhtmlWriter, extract_with_post_processing,
};

// --- Test PDF creation helpers ---

/// Create a PDF with one page per entry; each entry's lines are drawn
/// top to bottom.
fn pdf_with_pages(pages: &[&[&str]], title: Option<&str>) -> Vec<u8> {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        // One text object per line, so each line ends up on its own row.
        let mut ops = String::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 720 - 14 * i;
            ops.push_str(&format!("BT\n/F1 12 Tf\n72 {y} Td\n({line}) Tj\nET\n"));
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, ops.into_bytes()));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        }));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    });
    for &pid in &page_ids {
        if let Ok(dict) = doc.get_object_mut(pid).and_then(Object::as_dict_mut) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    if let Some(title) = title {
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn extract<P: ContentProducer>(
    producer: &P,
    bytes: &[u8],
) -> (Vec<StructuralEvent>, Metadata) {
    let mut recorder = EventRecorder::new();
    let mut metadata = Metadata::new();
    let mut input = bytes;
    producer
        .produce(&mut input, &mut recorder, &mut metadata)
        .unwrap();
    (recorder.into_events(), metadata)
}

fn count(events: &[StructuralEvent], wanted: &StructuralEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

/// Every page closes before the next opens, and every paragraph closes
/// inside its page.
fn assert_well_nested(events: &[StructuralEvent]) {
    let mut page_open = false;
    let mut paragraph_open = false;
    for event in events {
        match event {
            StructuralEvent::PageStart => {
                assert!(!page_open, "nested page in {events:?}");
                page_open = true;
            }
            StructuralEvent::PageEnd => {
                assert!(page_open && !paragraph_open, "bad page end in {events:?}");
                page_open = false;
            }
            StructuralEvent::ParagraphStart => {
                assert!(page_open && !paragraph_open, "bad paragraph in {events:?}");
                paragraph_open = true;
            }
            StructuralEvent::ParagraphEnd => {
                assert!(paragraph_open, "orphan paragraph end in {events:?}");
                paragraph_open = false;
            }
            StructuralEvent::DocumentEnd => assert!(!page_open),
            _ => {}
        }
    }
}

// --- PDF input ---

#[test]
fn pdf_pipeline_fills_metadata() {
    let bytes = pdf_with_pages(
        &[
            &["Quarterly results", "see http://example.com/q3 for details"],
            &["Archive at ftp://files.example.org/q3.zip"],
        ],
        Some("Q3 Report"),
    );
    let producer = PostProcessor::new(PdfProducer::default());
    let (events, metadata) = extract(&producer, &bytes);

    assert_well_nested(&events);
    assert_eq!(count(&events, &StructuralEvent::PageStart), 2);
    assert_eq!(metadata.get(TITLE), Some("Q3 Report"));
    assert_eq!(metadata.get(PAGE_COUNT), Some("2"));

    let fulltext = metadata.get(FULLTEXT).unwrap();
    assert_eq!(fulltext, pdfsax::pdfsax_core::concat_text(&events));
    assert!(fulltext.contains("Quarterly results"), "fulltext: {fulltext:?}");

    let links = metadata.get_values(OUTLINKS);
    assert!(
        links.iter().any(|l| l == "http://example.com/q3"),
        "links: {links:?}"
    );
    assert!(
        links.iter().any(|l| l == "ftp://files.example.org/q3.zip"),
        "links: {links:?}"
    );
}

#[test]
fn pdf_max_pages() {
    let bytes = pdf_with_pages(&[&["one"], &["two"], &["three"]], None);
    let producer = PostProcessor::new(PdfProducer::new(pdfsax::LopdfDecoder::new(
        DecodeOptions { max_pages: Some(1) },
    )));
    let (events, metadata) = extract(&producer, &bytes);
    assert_eq!(count(&events, &StructuralEvent::PageStart), 1);
    assert_eq!(metadata.get(PAGE_COUNT), Some("3"));
    assert!(!metadata.get(FULLTEXT).unwrap().contains("three"));
}

#[test]
fn corrupt_pdf_fails_without_metadata() {
    let producer = PostProcessor::new(PdfProducer::default());
    let mut metadata = Metadata::new();
    let mut input: &[u8] = b"definitely not a pdf";
    let mut recorder = EventRecorder::new();
    let err = producer
        .produce(&mut input, &mut recorder, &mut metadata)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceDecodeFailure);
    assert!(metadata.is_empty());
    assert!(recorder.events().is_empty());
}

// --- Plain text input ---

#[test]
fn text_pipeline_structure_and_fields() {
    let text = b"see http://example.com/a#frag and ftp://x.y/z more\n\nsecond paragraph\x0Cpage two";
    let producer = PostProcessor::new(TextProducer::default());
    let (events, metadata) = extract(&producer, text);

    assert_well_nested(&events);
    assert_eq!(count(&events, &StructuralEvent::PageStart), 2);
    assert_eq!(count(&events, &StructuralEvent::ParagraphStart), 3);
    assert_eq!(
        metadata.get(FULLTEXT),
        Some("see http://example.com/a#frag and ftp://x.y/z more\nsecond paragraph\npage two\n")
    );
    assert_eq!(
        metadata.get_values(OUTLINKS),
        ["http://example.com/a#frag", "ftp://x.y/z"]
    );
}

#[test]
fn long_text_summary_is_truncated() {
    let text = "word ".repeat(300);
    let producer = PostProcessor::new(TextProducer::default());
    let (_, metadata) = extract(&producer, text.as_bytes());
    let fulltext = metadata.get(FULLTEXT).unwrap();
    let summary = metadata.get(SUMMARY).unwrap();
    assert_eq!(summary.chars().count(), 500);
    assert!(fulltext.starts_with(summary));
}

#[test]
fn coalescing_does_not_change_text() {
    let text = b"alpha beta\ngamma\n\ndelta http://e.example/x\x0Cepsilon";
    let per_glyph = PostProcessor::new(TextProducer::default());
    let coalesced = PostProcessor::new(DecoderProducer::with_options(
        PlainTextDecoder::default(),
        TransducerOptions {
            coalesce_glyphs: true,
        },
    ));
    let (fine, fine_meta) = extract(&per_glyph, text);
    let (coarse, coarse_meta) = extract(&coalesced, text);

    assert!(coarse.len() < fine.len());
    assert_eq!(
        pdfsax::pdfsax_core::concat_text(&fine),
        pdfsax::pdfsax_core::concat_text(&coarse)
    );
    assert_eq!(fine_meta, coarse_meta);
}

#[test]
fn xhtml_output_and_metadata_from_one_pass() {
    let producer = TextProducer::default();
    let mut writer = XhtmlWriter::new(Vec::new());
    let mut metadata = Metadata::new();
    let mut input: &[u8] = b"a < b & c\x0Cnext";
    extract_with_post_processing(&producer, &mut input, &mut writer, &mut metadata).unwrap();

    let xhtml = String::from_utf8(writer.into_inner()).unwrap();
    assert!(xhtml.starts_with("<html xmlns=\"http://www.w3.org/1999/xhtml\">"));
    assert!(xhtml.contains("<div><p>a &lt; b &amp; c</p>\n"), "xhtml: {xhtml}");
    assert!(xhtml.contains("<p>next</p>\n"), "xhtml: {xhtml}");
    assert!(xhtml.trim_end().ends_with("</html>"));
    assert_eq!(metadata.get(FULLTEXT), Some("a < b & c\nnext\n"));
}

#[test]
fn empty_input_yields_empty_fields() {
    let producer = PostProcessor::new(TextProducer::default());
    let mut metadata = Metadata::new();
    let mut input: &[u8] = b"";
    producer
        .produce(&mut input, &mut NullSink, &mut metadata)
        .unwrap();
    assert_eq!(metadata.get(FULLTEXT), Some(""));
    assert_eq!(metadata.get(SUMMARY), Some(""));
    assert!(!metadata.contains(OUTLINKS));
    assert_eq!(metadata.get(PAGE_COUNT), Some("0"));
}
