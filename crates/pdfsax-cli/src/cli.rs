use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pdfsax::PostProcessOptions;

/// Stream PDF or text content as XHTML and extract full text, summary and links.
#[derive(Debug, Parser)]
#[command(name = "pdfsax", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log pipeline progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract content and derived metadata from a document
    Extract {
        /// Path to the input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExtractFormat::Xhtml)]
        format: ExtractFormat,

        /// Input type
        #[arg(long, value_enum, default_value_t = InputType::Auto)]
        input: InputType,

        /// Number of characters kept in the summary field
        #[arg(long, default_value_t = PostProcessOptions::default().summary_chars)]
        summary_chars: usize,

        /// Decode at most this many pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Merge consecutive characters into one text event
        #[arg(long)]
        coalesce: bool,
    },

    /// List link tokens found in a document's text
    Links {
        /// Path to the input file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = LinksFormat::Text)]
        format: LinksFormat,

        /// Input type
        #[arg(long, value_enum, default_value_t = InputType::Auto)]
        input: InputType,

        /// Decode at most this many pages
        #[arg(long)]
        max_pages: Option<usize>,
    },
}

/// Output format for the extract subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExtractFormat {
    /// XHTML markup, one div per page and one p per paragraph
    Xhtml,
    /// Captured full text
    Text,
    /// Metadata record as JSON
    Json,
}

/// Output format for the links subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinksFormat {
    /// One link per line
    Text,
    /// JSON array of links
    Json,
}

/// How to decode the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    /// PDF if the file starts with `%PDF-`, plain text otherwise
    Auto,
    Pdf,
    /// UTF-8 text, form feeds separating pages
    Text,
}
