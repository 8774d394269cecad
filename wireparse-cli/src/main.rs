use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use extractors::{PressReleaseExtractor, RuleSentenceSplitter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

mod annotator;
mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(name = "wireparse", author, version, about = "Extract structured entities from press releases", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run extraction over source documents
    Extract(commands::extract::ExtractArgs),

    /// List the opening sentence of every output record in a directory
    FirstSentences {
        #[arg(long, value_name = "DIR")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file_path.as_deref());

    match cli.command {
        Command::Extract(args) => {
            let (config, config_path) =
                config::AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
            tracing::info!("Loaded config from {:?}", config_path);

            let annotator = annotator::build_annotator(&config.annotator)?;
            let pipeline = PressReleaseExtractor::new(
                annotator,
                Arc::new(RuleSentenceSplitter::new()),
                config.extraction.clone(),
            )?;

            let summary = commands::extract::run(args, Arc::new(pipeline), &config.runtime).await?;
            if summary.processed == 0 && summary.failed > 0 {
                anyhow::bail!("All {} documents failed", summary.failed);
            }
        }
        Command::FirstSentences { dir } => {
            commands::first_sentences::run(&dir, &RuleSentenceSplitter::new())?;
        }
    }

    Ok(())
}

/// Logs go to stderr, leaving stdout for JSON output. The returned guard
/// flushes the optional log file and must live until exit.
fn init_tracing(log_file_path: Option<&str>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("wireparse.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .try_init();
        Some(guard)
    } else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .try_init();
        None
    }
}
