mod args;
mod compose;
mod error;
mod generator;
mod logo;
mod qr;
mod style;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use error::GenerateError;
use generator::generate;
use image::RgbImage;
use std::io::{self, Write};
use std::path::Path;
use tracing::level_filters::LevelFilter;

const RULE: &str = "============================================";

fn init_tracing(args: &Args) {
    let level = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reports the outcome and decides the exit status. A missing logo is printed
/// and swallowed unless `strict` is set; every other failure is returned.
fn finish(
    out: &mut impl Write,
    result: Result<RgbImage, GenerateError>,
    strict: bool,
    output: &Path,
    payload: &str,
) -> Result<()> {
    match result {
        Ok(img) => {
            tracing::info!(width = img.width(), height = img.height(), "composed image");
            writeln!(out, "✓ QR code saved as '{}'", output.display())?;
            writeln!(out, "✓ QR code links to: {}", payload)?;
            writeln!(out, "\n{RULE}\n✓ DONE! QR code generated:")?;
            writeln!(out, "  1. {}\n{RULE}\n", output.display())?;
            Ok(())
        }
        Err(e) if e.is_recoverable() && !strict => {
            writeln!(out, "✗ Error: {:#}", anyhow::Error::new(e))?;
            Ok(())
        }
        Err(e) => Err(e).context("QR code generation failed"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    let request = args.request();
    let style = args.style();

    println!("\n{RULE}\nGENERATING QR CODE\n{RULE}\n");
    println!("Generating QR code for: {}", request.payload);

    let result = generate(&request, &style, &args.logo, &args.output);
    finish(
        &mut io::stdout().lock(),
        result,
        args.strict,
        &args.output,
        &request.payload,
    )
}
