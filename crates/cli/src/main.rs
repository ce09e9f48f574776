//! CLI tool for extracting speaker notes from PowerPoint files.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use notes_core::Error;
use notes_pptx::{ExtractionReport, NotesArchive, NotesExtractor};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Message printed on stdout once every notes entry has been processed.
const COMPLETION_MESSAGE: &str = "ノートの抽出が完了しました";

/// Extract speaker notes from a .pptx file into a plain text file.
#[derive(Parser, Debug)]
#[command(name = "slide-notes")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    #[arg(long, value_parser = parse_path)]
    input: PathBuf,

    /// Output text file (created or truncated)
    #[arg(long, value_parser = parse_path)]
    output: PathBuf,
}

/// Reject empty path arguments.
fn parse_path(value: &str) -> std::result::Result<PathBuf, String> {
    if value.is_empty() {
        Err("path must not be empty".to_string())
    } else {
        Ok(PathBuf::from(value))
    }
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(report) => {
            if !report.skipped.is_empty() {
                log::info!("{} notes entries skipped", report.skipped.len());
            }
            println!("{}", COMPLETION_MESSAGE);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one extraction; every error returned here is fatal.
fn run() -> Result<ExtractionReport> {
    let args = parse_args()?;
    log::debug!(
        "Extracting notes from {} into {}",
        args.input.display(),
        args.output.display()
    );

    // The archive is opened first so a bad input never truncates the output.
    let mut archive = NotesArchive::open(&args.input)?;
    let mut out = create_output(&args.output)?;

    let report = NotesExtractor::new().extract(&mut archive, &mut out)?;
    out.flush()
        .map_err(Error::OutputWrite)
        .with_context(|| format!("Failed to finish {}", args.output.display()))?;

    Ok(report)
}

/// Parse arguments, letting clap print help and version itself.
fn parse_args() -> Result<Args, Error> {
    Args::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let message = e.to_string();
            Error::Argument(message.trim_start_matches("error: ").trim_end().to_string())
        }
    })
}

/// Create or truncate the output file.
fn create_output(path: &Path) -> Result<BufWriter<File>, Error> {
    let file = File::create(path).map_err(|source| Error::OutputCreate {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}
