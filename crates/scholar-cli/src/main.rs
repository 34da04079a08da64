//! scholar - command-line front end for the scholar study toolkit.
//!
//! Every subcommand reads plain text or JSON (from a file, or stdin when the
//! file is omitted) and prints JSON to stdout. Logs go to stderr.
//!
//! # Configuration
//!
//! - `--config scholar.toml` loads a TOML, JSON or YAML config file
//! - otherwise `SCHOLAR_LLM_PROVIDER`, `SCHOLAR_LLM_MODEL`, `OPENAI_API_KEY`
//!   and `SCHOLAR_SCHEDULER` are read (a `.env` file is honored)
//! - `RUST_LOG` controls log verbosity

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scholar_core::config::{ScholarConfig, StrategyKind};

mod commands;

#[derive(Parser)]
#[command(name = "scholar")]
#[command(about = "Concept extraction, review scheduling and quizzes for study notes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (.toml, .json, .yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Extract candidate study terms from scanned text
    Extract {
        /// Text file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Turn scanned text into concept records
    Ingest {
        /// Text file (stdin when omitted)
        file: Option<PathBuf>,

        /// Terms to use instead of extracting them
        #[arg(short, long)]
        term: Vec<String>,

        /// Terms already stored, which are skipped
        #[arg(long)]
        existing: Vec<String>,
    },

    /// Classify text into a subject category
    Classify {
        /// Text to classify
        text: String,
    },

    /// Compute the next review after a quiz
    Schedule {
        /// Reviews completed before this one
        #[arg(long, default_value = "0")]
        review_count: u32,

        /// Mastery level before this review (0-5)
        #[arg(long, default_value = "0")]
        mastery: u8,

        /// Quiz score as a percentage
        #[arg(long)]
        score: f64,

        /// Scheduling strategy: bucketed or sm2
        #[arg(long)]
        strategy: Option<String>,

        /// SM-2 ease factor before this review
        #[arg(long)]
        ease_factor: Option<f64>,

        /// SM-2 interval in days before this review
        #[arg(long, default_value = "0")]
        interval: u32,

        /// SM-2 successful repetitions before this review
        #[arg(long, default_value = "0")]
        repetitions: u32,
    },

    /// Build the knowledge graph for a JSON array of concepts
    Graph {
        /// Concepts file (stdin when omitted)
        file: Option<PathBuf>,

        /// Keep only nodes of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Build a quiz for a concept read from JSON
    Quiz {
        /// Concept file (stdin when omitted)
        file: Option<PathBuf>,

        /// Skip the AI generator and use template questions
        #[arg(long)]
        offline: bool,

        /// Quiz title
        #[arg(long)]
        title: Option<String>,
    },

    /// Enrich a term with explanations and examples
    Enhance {
        /// Term to explain
        term: String,

        /// Skip the AI enhancer and use the template
        #[arg(long)]
        offline: bool,
    },

    /// Describe when a review is due
    Status {
        /// Scheduled review time (RFC 3339); unscheduled when omitted
        #[arg(long)]
        next_review: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Stdout carries the JSON result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let output = match cli.command {
        Command::Extract { file } => commands::extract(&config, file.as_deref())?,
        Command::Ingest {
            file,
            term,
            existing,
        } => commands::ingest(&config, file.as_deref(), &term, &existing)?,
        Command::Classify { text } => commands::classify(&text),
        Command::Schedule {
            review_count,
            mastery,
            score,
            strategy,
            ease_factor,
            interval,
            repetitions,
        } => {
            let mut scheduling = config.scheduling.clone();
            if let Some(name) = strategy {
                scheduling.strategy = StrategyKind::from_name(&name)
                    .with_context(|| format!("unknown strategy '{}'", name))?;
            }
            let prior = commands::PriorReview {
                review_count,
                mastery,
                ease_factor,
                interval,
                repetitions,
            };
            commands::schedule(&scheduling, &prior, score)?
        }
        Command::Graph { file, category } => {
            commands::graph(file.as_deref(), category.as_deref())?
        }
        Command::Quiz {
            file,
            offline,
            title,
        } => commands::quiz(&config, file.as_deref(), offline, title.as_deref()).await?,
        Command::Enhance { term, offline } => commands::enhance(&config, &term, offline).await,
        Command::Status { next_review } => commands::status(next_review.as_deref())?,
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<ScholarConfig> {
    match path {
        Some(path) => ScholarConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ScholarConfig::from_env()),
    }
}
