// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `ask`, `batch` and `inspect`,
// and the pipeline flags they share.
//
// Flags that tune the pipeline are Options: when a flag is not
// given, the value from the config file (or the profile preset)
// stands.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::data::preprocessor::CleanMode;
use crate::infra::config::{PipelineConfig, Profile, Strictness};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question
    Ask(AskArgs),

    /// Answer every question in a file, one per line
    Batch(BatchArgs),

    /// Show the course code, search scope and passage ranking for a question
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Print the pair as one JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one question per line ('#' starts a comment line)
    #[arg(long)]
    pub questions: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output format for the answers
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// The question to inspect
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// How many ranked passages to show
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// Crawler output: a JSON array of {title, content} records
    #[arg(long, default_value = "scraped_info.json")]
    pub store: PathBuf,

    /// Threshold preset to start from
    #[arg(long, value_enum, default_value_t = ProfileArg::Distilbert)]
    pub profile: ProfileArg,

    /// JSON file overriding preset fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Cleaning applied to page content when the store is loaded
    #[arg(long, value_enum, default_value_t = CleanArg::None)]
    pub clean: CleanArg,

    /// Which answer extractor to use
    #[arg(long, value_enum, default_value_t = ExtractorArg::Heuristic)]
    pub extractor: ExtractorArg,

    /// QA inference endpoint (required with --extractor http).
    /// A bearer token is read from QA_API_TOKEN if set.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Subject name that prefixes course numbers
    #[arg(long)]
    pub subject: Option<String>,

    /// Answers shorter than this many words are retried
    #[arg(long)]
    pub min_answer_words: Option<usize>,

    /// Passages ranked first when a course code matched
    #[arg(long)]
    pub narrow_top_n: Option<usize>,

    /// Passages ranked first over the whole store
    #[arg(long)]
    pub broad_top_n: Option<usize>,

    /// Passages ranked on the retry
    #[arg(long)]
    pub escalated_top_n: Option<usize>,

    /// Final check after the retry
    #[arg(long, value_enum)]
    pub strictness: Option<StrictnessArg>,

    /// Text returned when no answer is acceptable
    #[arg(long)]
    pub refusal: Option<String>,

    /// Seconds one extractor call may take (0 = no limit)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl PipelineArgs {
    /// Preset → config file → flags.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let profile: Profile = self.profile.into();
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load(profile, path)?,
            None       => PipelineConfig::for_profile(profile),
        };

        if let Some(ref s) = self.subject         { cfg.subject = s.clone(); }
        if let Some(n) = self.min_answer_words    { cfg.min_answer_words = n; }
        if let Some(n) = self.narrow_top_n        { cfg.narrow_top_n = n; }
        if let Some(n) = self.broad_top_n         { cfg.broad_top_n = n; }
        if let Some(n) = self.escalated_top_n     { cfg.escalated_top_n = n; }
        if let Some(s) = self.strictness          { cfg.strictness = s.into(); }
        if let Some(ref r) = self.refusal         { cfg.refusal = r.clone(); }
        if let Some(t) = self.timeout_secs        { cfg.extractor_timeout_secs = t; }

        cfg.validate()?;
        Ok(cfg)
    }
}

// ─── Value enums ──────────────────────────────────────────────────────────────
// clap-facing mirrors of the application enums, so the inner
// layers never see clap types.

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileArg {
    Bert,
    Distilbert,
    Roberta,
}

impl From<ProfileArg> for Profile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Bert       => Profile::Bert,
            ProfileArg::Distilbert => Profile::Distilbert,
            ProfileArg::Roberta    => Profile::Roberta,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrictnessArg {
    Strict,
    Lenient,
}

impl From<StrictnessArg> for Strictness {
    fn from(s: StrictnessArg) -> Self {
        match s {
            StrictnessArg::Strict  => Strictness::Strict,
            StrictnessArg::Lenient => Strictness::Lenient,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CleanArg {
    None,
    Basic,
    Strict,
}

impl From<CleanArg> for CleanMode {
    fn from(c: CleanArg) -> Self {
        match c {
            CleanArg::None   => CleanMode::None,
            CleanArg::Basic  => CleanMode::Basic,
            CleanArg::Strict => CleanMode::Strict,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractorArg {
    /// Offline sentence picker
    Heuristic,
    /// Hosted extractive QA model
    Http,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// "Question: ..." / "Answer: ..." lines
    Text,
    /// One {"question", "answer"} JSON object per line
    Jsonl,
}
