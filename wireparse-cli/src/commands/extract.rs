use crate::commands::json_files_in;
use crate::config::RuntimeConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use extractors::text::clean_flat_text;
use extractors::PressReleaseExtractor;
use serde::{Deserialize, Serialize};
use shared_types::{ArticleEntities, SourceDocument};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Source document JSON file, or a directory of them
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Write one `<n>.json` per document here instead of JSON lines to stdout
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// One processed article as written to disk or stdout.
#[derive(Debug, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(flatten)]
    pub entities: ArticleEntities,
    pub body: String,
    /// Flat text after cleanup, as the extractors saw it.
    pub text: String,
    pub extracted_at: DateTime<Utc>,
    pub extractor_version: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub processed: usize,
    pub failed: usize,
}

/// A source document and where it came from, for log messages.
#[derive(Debug)]
pub struct InputDocument {
    pub origin: String,
    pub document: SourceDocument,
}

pub enum OutputSink {
    Directory(PathBuf),
    Stdout,
}

impl OutputSink {
    fn write(&self, counter: usize, record: &OutputRecord) -> Result<()> {
        match self {
            OutputSink::Directory(dir) => {
                let path = dir.join(format!("{}.json", counter));
                let json = serde_json::to_string_pretty(record)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {:?}", path))
            }
            OutputSink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                serde_json::to_writer(&mut stdout, record)?;
                writeln!(stdout)?;
                Ok(())
            }
        }
    }
}

pub async fn run(
    args: ExtractArgs,
    pipeline: Arc<PressReleaseExtractor>,
    runtime: &RuntimeConfig,
) -> Result<ExtractSummary> {
    let (documents, unreadable) = load_inputs(&args.input)?;

    let sink = match args.output_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create output directory {:?}", dir))?;
            OutputSink::Directory(dir)
        }
        None => OutputSink::Stdout,
    };

    let mut summary = extract_documents(pipeline, documents, runtime, &sink).await?;
    summary.failed += unreadable;

    info!(
        processed = summary.processed,
        failed = summary.failed,
        "Extraction finished"
    );
    Ok(summary)
}

/// Read source documents from a file (one document or an array of them) or
/// from every `*.json` file of a directory.
///
/// Files that cannot be read or parsed are logged and counted, not fatal,
/// unless the input is a single file.
pub fn load_inputs(input: &Path) -> Result<(Vec<InputDocument>, usize)> {
    if !input.is_dir() {
        return Ok((read_documents(input)?, 0));
    }

    let mut documents = Vec::new();
    let mut unreadable = 0;
    for path in json_files_in(input)? {
        match read_documents(&path) {
            Ok(mut found) => documents.append(&mut found),
            Err(e) => {
                error!("Skipping {:?}: {:#}", path, e);
                unreadable += 1;
            }
        }
    }
    Ok((documents, unreadable))
}

fn read_documents(path: &Path) -> Result<Vec<InputDocument>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {:?}", path))?;

    let origin = path.display().to_string();
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| -> Result<InputDocument> {
                let document = serde_json::from_value(item).with_context(|| {
                    format!("Invalid source document #{} in {:?}", index, path)
                })?;
                Ok(InputDocument {
                    origin: format!("{}#{}", origin, index),
                    document,
                })
            })
            .collect(),
        other => {
            let document = serde_json::from_value(other)
                .with_context(|| format!("Invalid source document in {:?}", path))?;
            Ok(vec![InputDocument { origin, document }])
        }
    }
}

/// Run the pipeline over every document, at most `max_concurrent_documents`
/// at a time. Records are written in input order and numbered from 1 over
/// the documents that succeeded. A document whose record cannot be written
/// counts as failed.
pub async fn extract_documents(
    pipeline: Arc<PressReleaseExtractor>,
    documents: Vec<InputDocument>,
    runtime: &RuntimeConfig,
    sink: &OutputSink,
) -> Result<ExtractSummary> {
    let semaphore = Arc::new(Semaphore::new(runtime.max_concurrent_documents.max(1)));
    let timeout = Duration::from_secs(runtime.document_timeout_secs);

    let mut tasks = Vec::with_capacity(documents.len());
    for input in documents {
        let pipeline = pipeline.clone();
        let semaphore = semaphore.clone();
        let origin = input.origin.clone();

        let handle = tokio::spawn(extract_one(pipeline, semaphore, input.document, timeout));
        tasks.push((origin, handle));
    }

    let mut summary = ExtractSummary::default();
    for (origin, handle) in tasks {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(join_error) => Err(anyhow::anyhow!("Extraction task failed: {}", join_error)),
        };

        match outcome {
            Ok((entities, document)) => {
                let record = OutputRecord {
                    entities,
                    text: clean_flat_text(&document.text),
                    body: document.body,
                    extracted_at: Utc::now(),
                    extractor_version: env!("CARGO_PKG_VERSION").to_string(),
                };
                let counter = summary.processed + 1;
                match sink.write(counter, &record) {
                    Ok(()) => summary.processed = counter,
                    Err(e) => {
                        error!("Failed to write output for {}: {:#}", origin, e);
                        summary.failed += 1;
                    }
                }
            }
            Err(e) => {
                warn!("Failed to extract {}: {:#}", origin, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn extract_one(
    pipeline: Arc<PressReleaseExtractor>,
    semaphore: Arc<Semaphore>,
    document: SourceDocument,
    timeout: Duration,
) -> Result<(ArticleEntities, SourceDocument)> {
    let permit = semaphore.acquire_owned().await?;
    // The permit moves into the blocking task so that a timed-out document
    // still counts against the limit until it really ends
    let work = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let result = pipeline.extract_document(&document);
        result.map(|entities| (entities, document))
    });

    match tokio::time::timeout(timeout, work).await {
        Ok(Ok(Ok(output))) => Ok(output),
        Ok(Ok(Err(e))) => Err(e.into()),
        Ok(Err(join_error)) => Err(anyhow::anyhow!("Extraction task failed: {}", join_error)),
        Err(_) => Err(anyhow::anyhow!("Timed out after {:?}", timeout)),
    }
}
