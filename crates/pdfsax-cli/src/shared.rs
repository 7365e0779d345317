use std::fs;
use std::io;
use std::path::Path;

use pdfsax::{
    ContentProducer, DecodeOptions, DecoderProducer, ExtractError, LopdfDecoder,
    PlainTextDecoder, TransducerOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::InputType;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug
/// output when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Read an input file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing
/// or unreadable.
pub fn read_input(file: &Path) -> Result<Vec<u8>, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    fs::read(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })
}

/// Resolve [`InputType::Auto`] by sniffing the PDF header.
pub fn detect_input(bytes: &[u8], requested: InputType) -> InputType {
    match requested {
        InputType::Auto if bytes.starts_with(PDF_MAGIC) => InputType::Pdf,
        InputType::Auto => InputType::Text,
        explicit => explicit,
    }
}

/// Build the content producer for the given input.
pub fn producer_for(
    bytes: &[u8],
    requested: InputType,
    decode: DecodeOptions,
    transduce: TransducerOptions,
) -> Box<dyn ContentProducer> {
    let input = detect_input(bytes, requested);
    debug!(?requested, ?input, "selected decoder");
    match input {
        InputType::Pdf => Box::new(DecoderProducer::with_options(
            LopdfDecoder::new(decode),
            transduce,
        )),
        _ => Box::new(DecoderProducer::with_options(
            PlainTextDecoder::new(decode),
            transduce,
        )),
    }
}

/// Title from the PDF /Info dictionary, if the input is a PDF that has one.
///
/// Unreadable PDFs yield `None`; extraction reports the failure itself.
pub fn document_title(bytes: &[u8], requested: InputType) -> Option<String> {
    if detect_input(bytes, requested) != InputType::Pdf {
        return None;
    }
    LopdfDecoder::default().document_metadata(bytes).ok()?.title
}

/// Print an extraction failure and map it to the process exit code.
pub fn report(err: ExtractError) -> i32 {
    debug!(kind = %err.kind(), "extraction failed");
    eprintln!("Error: {err}");
    1
}
