//! # threadscope - Main Entry Point
//!
//! Supports three output modes:
//! - **TUI** (default): Interactive thread browser
//! - **JSON** (`--json` / `--export FILE`): Thread list for scripts and the web frontend
//! - **Headless** (`--headless`): Plain-text report for CI logs and tickets

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{self, Read, Write};

use threadscope::analysis::{analyze_dump, parse_checked};
use threadscope::cli::{write_report, Args, TOP_THREADS};
use threadscope::domain::AnalyzeError;
use threadscope::export::{error_json, ThreadJsonExporter};
use threadscope::thread_data::ThreadRecord;
use threadscope::tui;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
/// `EX_DATAERR` from sysexits.h
const EXIT_DATAERR: i32 = 65;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AnalyzeError>() {
        Some(AnalyzeError::InputTooLarge { .. }) => EXIT_USAGE,
        Some(AnalyzeError::EmptyInput | AnalyzeError::NoThreadsFound) => EXIT_DATAERR,
        Some(AnalyzeError::Io(_)) | None => EXIT_ERROR,
    }
}

/// Read the whole dump, refusing more than `limit` bytes.
///
/// Invalid UTF-8 is replaced rather than rejected.
fn read_capped<R: Read>(reader: R, limit: u64) -> Result<String, AnalyzeError> {
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    let size = bytes.len() as u64;
    if size > limit {
        return Err(AnalyzeError::InputTooLarge { size, limit });
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_dump(args: &Args) -> Result<String> {
    if args.reads_stdin() {
        return Ok(read_capped(io::stdin().lock(), args.max_bytes)?);
    }

    let path = &args.dump;
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);
    if size > args.max_bytes {
        return Err(AnalyzeError::InputTooLarge { size, limit: args.max_bytes }.into());
    }
    read_capped(file, args.max_bytes).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_threads(args: &Args, content: &str) -> Result<Vec<ThreadRecord>, AnalyzeError> {
    let threads = if args.document_order { parse_checked(content)? } else { analyze_dump(content)? };

    let filter = args.filter();
    if filter.is_empty() {
        return Ok(threads);
    }
    let total = threads.len();
    let kept: Vec<ThreadRecord> = threads.into_iter().filter(|t| filter.matches(t)).collect();
    info!("Filter kept {} of {total} threads", kept.len());
    if kept.is_empty() {
        warn!("No threads match the given filter");
    }
    Ok(kept)
}

fn run() -> Result<()> {
    let args = Args::parse();

    let content = read_dump(&args)?;
    let threads = match load_threads(&args, &content) {
        Ok(threads) => threads,
        Err(e) => {
            if args.json {
                println!("{}", error_json(&e.to_string()));
            }
            return Err(e.into());
        }
    };

    let exporter = ThreadJsonExporter::new().pretty(args.pretty);

    if let Some(path) = &args.export {
        exporter
            .export_to_file(path, &threads)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        if !args.quiet {
            eprintln!("Exported {} threads to {}", threads.len(), path.display());
        }
    }

    if args.json {
        let mut stdout = io::stdout().lock();
        exporter.export(&mut stdout, &threads)?;
        writeln!(stdout)?;
        return Ok(());
    }

    if args.headless {
        let mut stdout = io::stdout().lock();
        write_report(&mut stdout, &threads, TOP_THREADS)?;
        return Ok(());
    }

    let source = if args.reads_stdin() {
        "stdin".to_string()
    } else {
        args.dump.file_name().map_or_else(
            || args.dump.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    };
    tui::App::new(threads, source).run()?;

    Ok(())
}
