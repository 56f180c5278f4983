//! Batch command for multiple resume files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use super::config::load_config;
use super::extract::{extract_file, format_extraction, Engine, Extraction, OutputFormat};
use crate::source::is_supported;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction engine
    #[arg(short, long, value_enum, default_value = "auto")]
    engine: Engine,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    extraction: Option<Extraction>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One line of `summary.csv`.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'static str,
    source: &'static str,
    engine: &'static str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    jobs: usize,
    education: usize,
    skills: usize,
    languages: usize,
    warnings: usize,
    processing_time_ms: u64,
    error: &'a str,
}

impl<'a> SummaryRow<'a> {
    fn new(result: &'a FileResult) -> Self {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let mut row = Self {
            filename,
            status: "error",
            source: "",
            engine: "",
            first_name: "",
            last_name: "",
            email: "",
            phone: "",
            jobs: 0,
            education: 0,
            skills: 0,
            languages: 0,
            warnings: 0,
            processing_time_ms: result.processing_time_ms,
            error: result.error.as_deref().unwrap_or(""),
        };

        if let Some(extraction) = &result.extraction {
            let record = &extraction.record;
            row.status = "success";
            row.source = extraction.source.as_str();
            row.engine = extraction.engine.as_str();
            row.first_name = record.first_name.as_deref().unwrap_or("");
            row.last_name = record.last_name.as_deref().unwrap_or("");
            row.email = record.email.as_deref().unwrap_or("");
            row.phone = record.phone.as_deref().unwrap_or("");
            row.jobs = record.work_experience.as_ref().map_or(0, Vec::len);
            row.education = record.education.as_ref().map_or(0, Vec::len);
            row.skills = record.skills.as_ref().map_or(0, Vec::len);
            row.languages = record.language_skills.as_ref().map_or(0, Vec::len);
            row.warnings = extraction.warnings.len();
        }

        row
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = extract_file(&path, args.engine, &config, None).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(extraction) => {
                if let Some(output_dir) = &args.output_dir {
                    write_output(output_dir, &path, &extraction, &args, &config)?;
                }
                results.push(FileResult {
                    path,
                    extraction: Some(extraction),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        extraction: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_output(
    output_dir: &Path,
    path: &Path,
    extraction: &Extraction,
    args: &BatchArgs,
    config: &resumex_core::ResumexConfig,
) -> anyhow::Result<()> {
    let output_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");
    let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

    fs::write(&output_path, format_extraction(extraction, args.format, config)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        wtr.serialize(SummaryRow::new(result))?;
    }

    wtr.flush()?;
    Ok(())
}
