//! arclog - Batch EVTC combat log processor.
//!
//! Memory-maps each input file, runs the full processing pipeline over
//! all files in parallel and emits one JSON summary per file to
//! stdout. Rotation documents for the external comparison renderer go
//! to a directory when `--rotation-dir` is given.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use memmap2::Mmap;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use arclog_core::pipeline::{process_batch, BatchEntry, ProcessedLog};
use arclog_core::rotation::RotationDocument;
use arclog_core::statistics::LogStatistics;
use arclog_core::ProcessingOptions;

#[derive(Parser)]
#[command(version, about = "Batch EVTC combat log processor")]
struct Cli {
    /// Log files to process.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write one rotation JSON document per file into this directory.
    #[arg(long)]
    rotation_dir: Option<PathBuf>,

    /// Skip rotation extraction regardless of the config file.
    #[arg(long)]
    no_rotations: bool,

    /// Pretty-print the JSON summaries.
    #[arg(long)]
    pretty: bool,
}

/// One line of stdout per input file.
#[derive(Serialize)]
struct FileSummary<'a> {
    file: &'a str,
    statistics: &'a LogStatistics,
    elapsed_ms: u128,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options: ProcessingOptions = confy::load("arclog", "config").unwrap_or_default();
    if cli.no_rotations {
        options.extract_rotations = false;
    }

    let mut failed = false;

    // Map everything up front so the batch borrows plain byte slices.
    let mut mapped: Vec<(String, Mmap)> = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match map_file(path) {
            Ok(mmap) => mapped.push((path.display().to_string(), mmap)),
            Err(reason) => {
                error!(file = %path.display(), %reason, "skipping unreadable file");
                failed = true;
            }
        }
    }

    let entries: Vec<BatchEntry<'_>> = mapped
        .iter()
        .map(|(name, mmap)| BatchEntry { name: name.clone(), bytes: &mmap[..] })
        .collect();

    let timer = std::time::Instant::now();
    let cancel = AtomicBool::new(false);
    let results = process_batch(&entries, &options, &cancel);
    info!(files = results.len(), elapsed_ms = timer.elapsed().as_millis(), "batch complete");

    for (name, result) in &results {
        match result {
            Ok(processed) => {
                if let Err(reason) = report(name, processed, &cli, timer.elapsed().as_millis()) {
                    error!(file = %name, %reason, "failed to write output");
                    failed = true;
                }
            }
            Err(err) => {
                error!(file = %name, reason = %err, "processing failed");
                failed = true;
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn map_file(path: &Path) -> Result<Mmap, String> {
    let file = fs::File::open(path).map_err(|e| e.to_string())?;
    // Inputs are finished log files, not ones still being written.
    unsafe { Mmap::map(&file) }.map_err(|e| e.to_string())
}

fn report(
    name: &str,
    processed: &ProcessedLog,
    cli: &Cli,
    elapsed_ms: u128,
) -> Result<(), String> {
    let summary = FileSummary { file: name, statistics: &processed.statistics, elapsed_ms };
    let json = if cli.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    }
    .map_err(|e| e.to_string())?;
    println!("{json}");

    if let (Some(dir), Some(rotations)) = (&cli.rotation_dir, &processed.rotations) {
        fs::create_dir_all(dir).map_err(|e| e.to_string())?;
        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("log");
        let document = RotationDocument::build(
            &processed.log,
            rotations,
            stem,
            &processed.encounter.name,
        );
        let path = dir.join(format!("{stem}.json"));
        let body = serde_json::to_string_pretty(&document).map_err(|e| e.to_string())?;
        fs::write(&path, body).map_err(|e| e.to_string())?;
        info!(file = %name, rotation = %path.display(), "wrote rotation document");
    }

    Ok(())
}
