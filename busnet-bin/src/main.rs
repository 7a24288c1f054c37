use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use busnet_core::prelude::*;
use clap::Parser;
use log::{error, info};

/// Transit catalogue query processor: reads a JSON document describing
/// a bus network and its queries, writes the JSON response array.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Input document; stdin when omitted
    #[arg(short, long, value_name = "*.json")]
    input: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long, value_name = "*.json")]
    output: Option<PathBuf>,
}

fn run(args: &CliArgs) -> Result<(), Error> {
    let document = match &args.input {
        Some(path) => InputDocument::from_reader(File::open(path)?)?,
        None => InputDocument::from_reader(io::stdin().lock())?,
    };

    let instant = Instant::now();
    let responses = process_requests(&document)?;
    info!(
        "answered {} requests in {:?}",
        responses.len(),
        instant.elapsed()
    );

    match &args.output {
        Some(path) => write_responses(File::create(path)?, &responses),
        None => write_responses(io::stdout().lock(), &responses),
    }
}

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
