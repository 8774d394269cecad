use crate::config::{AnnotatorConfig, AnnotatorKind};
use anyhow::{Context, Result};
use extractors::FixtureAnnotator;
use serde::{Deserialize, Serialize};
use shared_types::{
    AnnotationError, AnnotationProvider, EntityAnnotation, HeadPos, NounChunk, SyntacticRole,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Client for an annotation service that exposes named entities and noun
/// chunks over HTTP.
///
/// Calls block the current thread, so the annotator must only be used from
/// blocking tasks (`spawn_blocking`), never directly on a runtime worker.
pub struct HttpAnnotator {
    client: reqwest::Client,
    runtime: Handle,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntitiesResponse {
    #[serde(default)]
    entities: Vec<EntityAnnotation>,
}

#[derive(Debug, Deserialize)]
struct ChunksResponse {
    #[serde(default)]
    chunks: Vec<RawChunk>,
}

/// Noun chunk as the service reports it, with raw dependency and POS tags.
#[derive(Debug, Deserialize)]
struct RawChunk {
    text: String,
    dep: String,
    pos: String,
    #[serde(default)]
    ent_type: String,
}

impl From<RawChunk> for NounChunk {
    fn from(raw: RawChunk) -> Self {
        NounChunk {
            text: raw.text,
            role: SyntacticRole::from_dependency(&raw.dep),
            head_pos: HeadPos::from_tag(&raw.pos),
            head_entity_type: raw.ent_type,
        }
    }
}

impl HttpAnnotator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let runtime = Handle::try_current()
            .context("HTTP annotator must be created inside a tokio runtime")?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            runtime,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        text: &str,
    ) -> Result<T, AnnotationError> {
        let url = self.endpoint(path);
        self.runtime.block_on(async {
            let response = self
                .client
                .post(&url)
                .json(&AnnotateRequest { text })
                .send()
                .await
                .map_err(map_send_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(AnnotationError::Request(format!("{} returned {}", url, status)));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| AnnotationError::InvalidResponse(e.to_string()))
        })
    }
}

fn map_send_error(err: reqwest::Error) -> AnnotationError {
    if err.is_connect() || err.is_timeout() {
        AnnotationError::Unavailable(err.to_string())
    } else {
        AnnotationError::Request(err.to_string())
    }
}

impl AnnotationProvider for HttpAnnotator {
    fn annotate_line(&self, text: &str) -> Result<Vec<EntityAnnotation>, AnnotationError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response: EntitiesResponse = self.post("entities", text)?;
        Ok(response.entities)
    }

    fn annotate_sentence(&self, text: &str) -> Result<Vec<NounChunk>, AnnotationError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response: ChunksResponse = self.post("noun_chunks", text)?;
        Ok(response.chunks.into_iter().map(NounChunk::from).collect())
    }

    fn provider_id(&self) -> &str {
        "http"
    }
}

pub fn build_annotator(config: &AnnotatorConfig) -> Result<Arc<dyn AnnotationProvider>> {
    match config.kind {
        AnnotatorKind::Http => {
            let annotator =
                HttpAnnotator::new(&config.base_url, Duration::from_secs(config.timeout_secs))?;
            tracing::info!("Using annotation service at {}", annotator.base_url);
            Ok(Arc::new(annotator))
        }
        AnnotatorKind::Fixture => {
            let path = config
                .fixture_path
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("annotator.fixture_path is required for kind = \"fixture\""))?;
            let annotator = FixtureAnnotator::from_file(path)
                .with_context(|| format!("Failed to load annotation fixture {:?}", path))?;
            tracing::info!("Using annotation fixture {:?}", path);
            Ok(Arc::new(annotator))
        }
    }
}
