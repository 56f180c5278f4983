//! Extract command - pull candidate data from a single resume.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use resumex_core::{
    ExtractedRecord, FormPrefill, HeuristicResumeParser, ResumeParser, ResumexConfig, SectionKind,
};

use super::config::load_config;
use crate::llm_client::LlmClient;
use crate::source::{self, Source, SourceKind};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (text, PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction engine
    #[arg(short, long, value_enum, default_value = "auto")]
    engine: Engine,

    /// Print extraction warnings
    #[arg(long)]
    warnings: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON record
    Json,
    /// Indented JSON record
    Pretty,
    /// Plain text summary
    Text,
    /// Prefilled candidate form as JSON
    Form,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Pretty | OutputFormat::Form => "json",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Engine {
    /// Heuristics for text, the LLM for images and scanned PDFs
    Auto,
    /// Pattern-based parser only
    Heuristic,
    /// LLM collaborator only
    Llm,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Auto => "auto",
            Engine::Heuristic => "heuristic",
            Engine::Llm => "llm",
        }
    }
}

/// Outcome of extracting one file.
pub struct Extraction {
    pub record: ExtractedRecord,
    pub warnings: Vec<String>,
    pub sections: Vec<SectionKind>,
    pub source: SourceKind,
    /// Engine that actually ran; never `Auto`.
    pub engine: Engine,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Reading {}...", args.input.display()));

    let result = extract_file(&args.input, args.engine, &config, Some(&pb)).await;
    pb.finish_and_clear();
    let extraction = result?;

    if args.warnings {
        for warning in &extraction.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let output = format_extraction(&extraction, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Run the chosen engine over one file.
pub async fn extract_file(
    path: &Path,
    engine: Engine,
    config: &ResumexConfig,
    pb: Option<&ProgressBar>,
) -> anyhow::Result<Extraction> {
    let source = source::load(path, &config.pdf)?;
    let kind = source.kind();
    info!("Loaded {} as {}", path.display(), kind.as_str());

    match (source, engine) {
        (Source::Text { text, .. }, Engine::Auto | Engine::Heuristic) => {
            if let Some(pb) = pb {
                pb.set_message("Extracting fields...");
            }
            let result = HeuristicResumeParser::from_config(&config.extraction).parse(&text)?;
            Ok(Extraction {
                record: result.record,
                warnings: result.warnings,
                sections: result.sections,
                source: kind,
                engine: Engine::Heuristic,
            })
        }
        (Source::Image { .. }, Engine::Heuristic) => anyhow::bail!(
            "{} input has no text layer and needs the llm engine",
            kind.as_str()
        ),
        (source, _) => {
            if let Some(pb) = pb {
                pb.set_message("Waiting for the language model...");
            }
            let input = match source {
                Source::Text { text, .. } => resumex_core::LlmInput::Text(text),
                Source::Image { input, .. } => input,
            };
            let client = LlmClient::from_env(&config.llm)?;
            let record = client.extract(&input).await?;
            Ok(Extraction {
                record,
                warnings: Vec::new(),
                sections: Vec::new(),
                source: kind,
                engine: Engine::Llm,
            })
        }
    }
}

pub fn format_extraction(
    extraction: &Extraction,
    format: OutputFormat,
    config: &ResumexConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&extraction.record)?),
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(&extraction.record)?),
        OutputFormat::Text => Ok(format_text(&extraction.record)),
        OutputFormat::Form => {
            let form = FormPrefill::new(&config.form).prefill(&extraction.record);
            Ok(serde_json::to_string_pretty(&form)?)
        }
    }
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();

    let name = [record.first_name.as_deref(), record.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !name.is_empty() {
        let _ = writeln!(output, "Name: {}", name);
    }
    for (label, value) in [
        ("Email", &record.email),
        ("Phone", &record.phone),
        ("Title", &record.title),
    ] {
        if let Some(value) = value {
            let _ = writeln!(output, "{}: {}", label, value);
        }
    }

    if let Some(jobs) = &record.work_experience {
        output.push_str("\nExperience:\n");
        for job in jobs {
            let _ = write!(output, "  {}, {}", job.title, job.company_name);
            if let Some(dates) = &job.dates {
                let _ = write!(output, " ({})", dates);
            }
            output.push('\n');
            for line in job.responsibilities.iter().flat_map(|r| r.lines()) {
                let _ = writeln!(output, "    - {}", line);
            }
        }
    }

    if let Some(entries) = &record.education {
        output.push_str("\nEducation:\n");
        for entry in entries {
            let parts = [entry.degree.as_deref(), entry.institution.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(output, "  {}", parts);
            if let Some(year) = &entry.year {
                let _ = write!(output, " ({})", year);
            }
            output.push('\n');
        }
    }

    if let Some(skills) = &record.skills {
        let _ = writeln!(output, "\nSkills: {}", skills.join(", "));
    }

    if let Some(languages) = &record.language_skills {
        output.push_str("\nLanguages:\n");
        for language in languages {
            let levels = [
                ("speaking", &language.speaking),
                ("reading", &language.reading),
                ("writing", &language.writing),
            ]
            .into_iter()
            .filter_map(|(skill, level)| level.as_ref().map(|l| format!("{skill}: {l}")))
            .collect::<Vec<_>>();

            if levels.is_empty() {
                let _ = writeln!(output, "  {}", language.language);
            } else {
                let _ = writeln!(output, "  {} ({})", language.language, levels.join(", "));
            }
        }
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumex_core::{Education, WorkExperience};

    #[test]
    fn test_format_text() {
        let record = ExtractedRecord {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@mail.com".to_string()),
            work_experience: Some(vec![WorkExperience {
                company_name: "Acme Corp".to_string(),
                title: "Engineer".to_string(),
                dates: Some("2020".to_string()),
                responsibilities: Some("Built APIs\nLed team".to_string()),
            }]),
            education: Some(vec![Education {
                degree: Some("BSc".to_string()),
                institution: Some("MIT".to_string()),
                year: None,
            }]),
            ..Default::default()
        };

        let text = format_text(&record);
        assert_eq!(
            text,
            "Name: Jane Doe\nEmail: jane@mail.com\n\nExperience:\n  Engineer, Acme Corp (2020)\n    - Built APIs\n    - Led team\n\nEducation:\n  BSc, MIT"
        );
    }

    #[tokio::test]
    async fn test_heuristic_rejects_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, b"png").unwrap();

        let result = extract_file(&path, Engine::Heuristic, &ResumexConfig::default(), None).await;
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("needs the llm engine"));
    }
}
