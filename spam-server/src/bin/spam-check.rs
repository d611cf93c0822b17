//! Check a single message from the command line
//!
//! # Usage
//!
//! ```bash
//! # Classify an argument
//! spam-check "WIN a FREE iPhone, reply now"
//!
//! # Classify stdin, showing the normalized text
//! echo "see you at lunch" | spam-check --show-normalized
//!
//! # Only run text normalization
//! spam-check --normalize-only "Running runs ran"
//! ```

use clap::Parser;
use spam_server::cli::{check_message, read_message};
use spam_server::{build_classifier, build_normalizer, logging, Config};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spam-check")]
#[command(about = "Check whether a message is spam", long_about = None)]
struct Cli {
    /// Message to check; read from stdin when omitted
    message: Option<String>,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vectorizer artifact, overrides the config
    #[arg(long)]
    vectorizer: Option<PathBuf>,

    /// Classifier artifact, overrides the config
    #[arg(long)]
    classifier: Option<PathBuf>,

    /// Print the normalized message as well
    #[arg(long)]
    show_normalized: bool,

    /// Print the normalized message and exit without loading artifacts
    #[arg(long)]
    normalize_only: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.vectorizer {
        config.artifacts.vectorizer_path = path;
    }
    if let Some(path) = cli.classifier {
        config.artifacts.classifier_path = path;
    }
    logging::init(&config.logging)?;

    let message = read_message(cli.message, std::io::stdin().lock())?;

    if cli.normalize_only {
        let normalizer = build_normalizer(&config.text)?;
        println!("{}", normalizer.normalize(&message));
        return Ok(ExitCode::SUCCESS);
    }

    let classifier = build_classifier(&config)?;
    let code = check_message(
        &classifier,
        &message,
        cli.show_normalized,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )?;

    Ok(ExitCode::from(code))
}
