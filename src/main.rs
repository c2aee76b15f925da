//! commitwise - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commitwise::commit::{DEFAULT_MAX_DIFF_CHARS, FailureClassifier, PhraseTable};
use commitwise::flow::{CommitFlow, FlowConfig, FlowOutcome};
use commitwise::git::GitRepository;
use commitwise::llm::{CliGenerator, Provider};
use commitwise::select::DialoguerTerminal;

/// Suggest commit messages for staged changes using an AI CLI.
#[derive(Parser, Debug)]
#[command(name = "commitwise")]
#[command(about = "Suggest commit messages for staged changes using Claude or Codex")]
#[command(version)]
struct Cli {
    /// AI CLI used to generate suggestions
    #[arg(long, value_enum, default_value_t = Provider::Claude)]
    provider: Provider,

    /// Repository root to commit in
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// Maximum diff characters sent to the provider (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_DIFF_CHARS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_diff_chars: usize,

    /// JSON file overriding the commit failure phrase table
    #[arg(long)]
    phrases: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Step 1: Check prerequisites
    let generator = CliGenerator::new(cli.provider);
    generator
        .check_installed()
        .await
        .with_context(|| format!("{} CLI is required", cli.provider))?;

    // Step 2: Load failure phrases
    let table = match &cli.phrases {
        Some(path) => PhraseTable::load(path)
            .with_context(|| format!("Failed to load phrase table {}", path.display()))?,
        None => PhraseTable::default(),
    };
    let classifier = FailureClassifier::new(&table).context("Invalid phrase table")?;

    // Step 3: Run the commit flow
    let repo = GitRepository::open(&cli.repo);
    debug!("Using repository at {}", repo.workdir().display());

    let config = FlowConfig {
        max_diff_chars: cli.max_diff_chars,
        classifier,
    };
    let mut terminal = DialoguerTerminal::new();
    let outcome = CommitFlow::new(&repo, &generator, &mut terminal, &config)
        .run()
        .await;
    debug!("Flow finished: {:?}", outcome);

    // In-flow outcomes were already reported; only a created commit is news.
    if let FlowOutcome::Committed(result) = &outcome
        && result.is_success()
    {
        debug!("Commit created in {}", repo.workdir().display());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
