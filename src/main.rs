//! piiscan - Pattern and checksum based PII detection
//!
//! Scans documents, stdin or chat transcripts for personal data and
//! prints a grouped report.

use anyhow::Result;
use clap::{Parser, Subcommand};
use piiscan::{
    config::{default_config_path, OutputFormat, PiiScanConfig},
    intake::Intake,
    messages::{message_texts, parse_transcript},
    pii::{summary_message, DetectedPii, PiiDetector, PiiFinding, Report},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "piiscan")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Detect personal data in documents and chat transcripts")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PIISCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan documents (or stdin when no paths are given)
    Scan {
        /// Documents to scan
        paths: Vec<PathBuf>,

        /// Print findings with offsets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan a JSON chat transcript
    Messages {
        /// Transcript file
        path: PathBuf,
    },

    /// List the recognizer catalog
    Catalog,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

/// Findings for one scanned source
#[derive(Serialize)]
struct SourceFindings {
    source: String,
    findings: Vec<DetectedPii>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("piiscan={}", log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match cli.command {
        Commands::Scan { paths, json } => {
            let format = if json {
                OutputFormat::Json
            } else {
                config.report.format
            };
            run_scan(&config, &paths, format).await?;
        }
        Commands::Messages { path } => {
            run_messages(&config, &path).await?;
        }
        Commands::Catalog => {
            show_catalog()?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PiiScanConfig> {
    let mut config = match path {
        Some(path) => PiiScanConfig::load(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => PiiScanConfig::load(path)?,
            None => PiiScanConfig::default(),
        },
    };
    config.apply_env_overrides();
    Ok(config)
}

/// Result of scanning a set of sources
#[derive(Default)]
struct ScanOutcome {
    sources: Vec<SourceFindings>,
    skipped: Vec<(PathBuf, String)>,
}

impl ScanOutcome {
    fn findings(&self) -> Vec<PiiFinding> {
        self.sources
            .iter()
            .flat_map(|s| s.findings.iter().cloned().map(PiiFinding::from))
            .collect()
    }

    /// Text output. With skipped documents an empty result is never
    /// reported as "no PII".
    fn render_text(&self, summary: bool) -> String {
        let findings = self.findings();
        let mut sections = Vec::new();

        if self.skipped.is_empty() || !findings.is_empty() {
            sections.push(Report::build(&findings).render());
            if summary {
                sections.push(summary_message(&findings));
            }
        }

        if !self.skipped.is_empty() {
            let mut lines = vec![format!(
                "{} of {} documents could not be scanned:",
                self.skipped.len(),
                self.sources.len() + self.skipped.len()
            )];
            lines.extend(
                self.skipped
                    .iter()
                    .map(|(path, reason)| format!("- {}: {}", path.display(), reason)),
            );
            sections.push(lines.join("\n"));
        }

        sections.join("\n\n")
    }
}

async fn scan_documents(
    detector: &PiiDetector,
    intake: &Intake,
    paths: &[PathBuf],
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for (path, result) in paths.iter().zip(intake.read_documents(paths).await) {
        match result {
            Ok(doc) => outcome.sources.push(SourceFindings {
                source: doc.path.display().to_string(),
                findings: detector.detect(&doc.text),
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Skipping document: {}", e);
                outcome.skipped.push((path.clone(), e.to_string()));
            }
        }
    }
    outcome
}

async fn run_scan(config: &PiiScanConfig, paths: &[PathBuf], format: OutputFormat) -> Result<()> {
    let detector = PiiDetector::shared()?;
    let intake = Intake::new(&config.intake);

    let outcome = if paths.is_empty() {
        let text = intake.read_stream(tokio::io::stdin()).await?;
        ScanOutcome {
            sources: vec![SourceFindings {
                source: "<stdin>".to_string(),
                findings: detector.detect(&text),
            }],
            skipped: Vec::new(),
        }
    } else {
        scan_documents(detector, &intake, paths).await
    };

    tracing::info!(
        sources = outcome.sources.len(),
        skipped = outcome.skipped.len(),
        "Scan complete"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome.sources)?),
        OutputFormat::Text => println!("{}", outcome.render_text(config.report.summary)),
    }

    if !outcome.skipped.is_empty() {
        anyhow::bail!(
            "{} of {} documents could not be scanned",
            outcome.skipped.len(),
            paths.len()
        );
    }

    Ok(())
}

async fn run_messages(config: &PiiScanConfig, path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(path).await?;
    let messages = parse_transcript(&content)?;
    tracing::debug!(messages = messages.len(), "Transcript parsed");

    let findings = PiiDetector::shared()?.detect_across_messages(message_texts(&messages));

    match config.report.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&findings)?),
        OutputFormat::Text => {
            println!("{}", Report::build(&findings).render());
            if config.report.summary {
                println!();
                println!("{}", summary_message(&findings));
            }
        }
    }

    Ok(())
}

fn show_catalog() -> Result<()> {
    let detector = PiiDetector::shared()?;
    for recognizer in detector.catalog().recognizers() {
        println!("{:<12} {}", recognizer.category.label(), recognizer.pattern.as_str());
    }
    Ok(())
}

fn show_config(config: Option<&PiiScanConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
