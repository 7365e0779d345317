mod cli;
mod extract_cmd;
mod links_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Extract {
            ref file,
            format,
            input,
            summary_chars,
            max_pages,
            coalesce,
        } => extract_cmd::run(file, format, input, summary_chars, max_pages, coalesce),
        cli::Commands::Links {
            ref file,
            format,
            input,
            max_pages,
        } => links_cmd::run(file, format, input, max_pages),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
