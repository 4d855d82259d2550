// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. Parses arguments
// with clap, builds the pipeline once, and prints results.
// All decision logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `ask`     — answer one question
//   2. `batch`   — answer a file of questions
//   3. `inspect` — show scope and ranking without extracting
//
// Answers go to stdout; logs go to stderr.

// Declare the commands submodule
pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use std::time::Duration;

use commands::{AskArgs, BatchArgs, Commands, ExtractorArg, InspectArgs, OutputFormat, PipelineArgs};

use crate::application::ask_use_case::AskUseCase;
use crate::application::batch_use_case::{read_questions, BatchUseCase, QaRecord};
use crate::data::loader::JsonRecordLoader;
use crate::data::store::DocumentStore;
use crate::domain::traits::{AnswerExtractor, QuestionAnswerer};
use crate::infra::config::PipelineConfig;
use crate::ml::heuristic::HeuristicExtractor;
use crate::ml::http_extractor::HttpExtractor;
use crate::ml::timeout::TimeoutGuard;

/// Env var holding the bearer token for the QA endpoint
const TOKEN_ENV: &str = "QA_API_TOKEN";

#[derive(Parser, Debug)]
#[command(
    name = "dept-site-qa",
    version,
    about = "Answer questions about a department website from crawled page records."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch. The CLI only routes
    /// and prints; it never decides answers.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)     => run_ask(args),
            Commands::Batch(args)   => run_batch(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_ask(args: AskArgs) -> Result<()> {
    let use_case = build_use_case(&args.pipeline)?;
    let record = QaRecord {
        answer:   use_case.answer(&args.question),
        question: args.question,
    };

    if args.json {
        println!("{}", serde_json::to_string(&record)?);
    } else {
        print_text(&record);
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let questions = read_questions(&args.questions)?;
    let use_case  = build_use_case(&args.pipeline)?;
    let records   = BatchUseCase::new(&use_case).run(&questions);

    for record in &records {
        match args.format {
            OutputFormat::Text  => print_text(record),
            OutputFormat::Jsonl => println!("{}", serde_json::to_string(record)?),
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let use_case = build_use_case(&args.pipeline)?;
    let report   = use_case.inspect(&args.question);

    match &report.course_code {
        Some(code) => println!("Course code: {code}"),
        None       => println!("Course code: none"),
    }
    println!(
        "Scope:       {} ({} of {} documents)",
        report.scope.label(),
        report.ranked.len(),
        use_case.store().len()
    );

    for (rank, (passage, text)) in report.ranked.iter().take(args.limit).enumerate() {
        println!("{:>3}. [{:>8.4}] #{:<5} {}", rank + 1, passage.score, passage.index, snippet(text, 90));
    }
    Ok(())
}

fn print_text(record: &QaRecord) {
    println!("Question: {}", record.question);
    println!("Answer: {}", record.answer);
}

/// First `max` characters of `text` on one line.
fn snippet(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}

/// Load the store once and wire the orchestrator with the chosen extractor.
fn build_use_case(args: &PipelineArgs) -> Result<AskUseCase<Box<dyn AnswerExtractor>>> {
    let config = args.resolve_config()?;

    let loader = JsonRecordLoader::new(&args.store).with_cleaning(args.clean.into());
    let store  = DocumentStore::load(&loader)?;
    if store.is_empty() {
        tracing::warn!("'{}' holds no usable records; every question will be refused", args.store.display());
    }

    let extractor = build_extractor(args, &config)?;
    AskUseCase::new(store, extractor, config)
}

fn build_extractor(args: &PipelineArgs, config: &PipelineConfig) -> Result<Box<dyn AnswerExtractor>> {
    let timeout = Duration::from_secs(config.extractor_timeout_secs);

    let inner: Box<dyn AnswerExtractor + Send + Sync> = match args.extractor {
        ExtractorArg::Heuristic => Box::new(HeuristicExtractor::new()),
        ExtractorArg::Http => {
            let Some(endpoint) = args.endpoint.clone() else {
                bail!("--endpoint is required with --extractor http");
            };
            let token = std::env::var(TOKEN_ENV).ok();
            // reqwest treats a zero timeout as "fail immediately"
            let http_timeout = if timeout.is_zero() { Duration::from_secs(3600) } else { timeout };
            tracing::info!("Using QA endpoint {}", endpoint);
            Box::new(HttpExtractor::new(endpoint, token, http_timeout)?)
        }
    };

    let extractor: Box<dyn AnswerExtractor> = if timeout.is_zero() {
        inner
    } else {
        Box::new(TimeoutGuard::new(inner, timeout))
    };
    Ok(extractor)
}
