//! imgtext: print the text found in an image file.

mod cli;
mod output;

use clap::error::ErrorKind;
use clap::Parser;
use imgtext_engine::Extractor;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::{Cli, USAGE};
use output::Output;

fn main() {
    // Initialize logging; stdout is reserved for the extracted text
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!("Argument error: {}", e);
            println!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Extraction failures are printed, not reflected in the exit status.
fn run(cli: Cli) -> anyhow::Result<()> {
    let output = Output::new(cli.json);
    let extractor = Extractor::new(cli.engine_config());

    let rendered = match extractor.extract(&cli.image) {
        Ok(report) => output.render_report(report)?,
        Err(e) => {
            debug!("Extraction failed: {}", e);
            output.render_error(&e)?
        }
    };

    println!("{}", rendered);
    Ok(())
}
