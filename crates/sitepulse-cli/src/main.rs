mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sitepulse")]
#[command(about = "Evidence and health engine for local-business website audits")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the Evidence Pack for an audit job
    Evidence {
        /// Path to the audit job JSON
        job: PathBuf,
    },
    /// Score the health snapshot for an audit job
    Health {
        /// Path to the audit job JSON
        job: PathBuf,
        /// Previously stored snapshot; reused only if its version is current
        #[arg(long)]
        stored: Option<PathBuf>,
    },
    /// Detect issues and assemble the top-issues list and backlog
    Backlog {
        /// Path to the audit job JSON
        job: PathBuf,
        /// Extra raw issues (JSON array) from other detectors
        #[arg(long)]
        issues: Option<PathBuf>,
    },
    /// Produce every artifact at once
    Audit {
        /// Path to the audit job JSON
        job: PathBuf,
        /// Previously stored snapshot; reused only if its version is current
        #[arg(long)]
        stored: Option<PathBuf>,
        /// Extra raw issues (JSON array) from other detectors
        #[arg(long)]
        issues: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sitepulse_core::load_engine_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let vocabulary = sitepulse_core::load_niche_vocabulary(config.niche_vocab_path.as_deref())?;
    let engine = run::Engine {
        config: &config,
        vocabulary: &vocabulary,
    };

    let output = match cli.command {
        Commands::Evidence { job } => engine.evidence(&job)?,
        Commands::Health { job, stored } => engine.health(&job, stored.as_deref())?,
        Commands::Backlog { job, issues } => engine.backlog(&job, issues.as_deref())?,
        Commands::Audit {
            job,
            stored,
            issues,
        } => engine.audit(&job, stored.as_deref(), issues.as_deref())?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests;
