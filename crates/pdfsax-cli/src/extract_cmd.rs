use std::io::{self, BufWriter, Write};
use std::path::Path;

use pdfsax::metadata::FULLTEXT;
use pdfsax::{
    ContentProducer, DecodeOptions, Metadata, NullSink, PostProcessOptions, PostProcessor,
    TransducerOptions, XhtmlWriter,
};

use crate::cli::{ExtractFormat, InputType};
use crate::shared::{document_title, producer_for, read_input, report};

pub fn run(
    file: &Path,
    format: ExtractFormat,
    input: InputType,
    summary_chars: usize,
    max_pages: Option<usize>,
    coalesce: bool,
) -> Result<(), i32> {
    let bytes = read_input(file)?;
    let inner = producer_for(
        &bytes,
        input,
        DecodeOptions { max_pages },
        TransducerOptions {
            coalesce_glyphs: coalesce,
        },
    );
    let options = PostProcessOptions {
        summary_chars,
        ..Default::default()
    };
    let producer = PostProcessor::with_options(inner, options);
    let mut metadata = Metadata::new();

    match format {
        ExtractFormat::Xhtml => {
            let mut writer = XhtmlWriter::new(BufWriter::new(io::stdout().lock()));
            if let Some(title) = document_title(&bytes, input) {
                writer = writer.with_title(title);
            }
            producer
                .produce(&mut bytes.as_slice(), &mut writer, &mut metadata)
                .map_err(report)?;
        }
        ExtractFormat::Text => {
            producer
                .produce(&mut bytes.as_slice(), &mut NullSink, &mut metadata)
                .map_err(report)?;
            let mut out = io::stdout().lock();
            write_or_fail(&mut out, metadata.get(FULLTEXT).unwrap_or_default())?;
        }
        ExtractFormat::Json => {
            producer
                .produce(&mut bytes.as_slice(), &mut NullSink, &mut metadata)
                .map_err(report)?;
            let json = serde_json::to_string_pretty(&metadata).map_err(|e| {
                eprintln!("Error: failed to serialize metadata: {e}");
                1
            })?;
            println!("{json}");
        }
    }
    Ok(())
}

fn write_or_fail(out: &mut impl Write, text: &str) -> Result<(), i32> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| {
            eprintln!("Error: failed to write output: {e}");
            1
        })
}
