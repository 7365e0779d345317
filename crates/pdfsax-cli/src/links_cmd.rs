use std::path::Path;

use pdfsax::metadata::OUTLINKS;
use pdfsax::{
    ContentProducer, DecodeOptions, Metadata, NullSink, PostProcessor, TransducerOptions,
};

use crate::cli::{InputType, LinksFormat};
use crate::shared::{producer_for, read_input, report};

pub fn run(
    file: &Path,
    format: LinksFormat,
    input: InputType,
    max_pages: Option<usize>,
) -> Result<(), i32> {
    let bytes = read_input(file)?;
    let producer = PostProcessor::new(producer_for(
        &bytes,
        input,
        DecodeOptions { max_pages },
        TransducerOptions {
            coalesce_glyphs: true,
        },
    ));
    let mut metadata = Metadata::new();
    producer
        .produce(&mut bytes.as_slice(), &mut NullSink, &mut metadata)
        .map_err(report)?;

    let links = metadata.get_values(OUTLINKS);
    match format {
        LinksFormat::Text => {
            for link in links {
                println!("{link}");
            }
        }
        LinksFormat::Json => {
            let json = serde_json::to_string(links).map_err(|e| {
                eprintln!("Error: failed to serialize links: {e}");
                1
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
