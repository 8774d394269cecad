use serde::{Deserialize, Serialize};
use shared_types::{
    AnnotationError, AnnotationProvider, EntityAnnotation, ExtractionError, NounChunk,
};
use std::collections::HashMap;
use std::path::Path;

/// Annotation provider backed by a precomputed lookup table.
///
/// Lines and sentences are looked up verbatim. Text that is not in the table
/// has no entities and no noun chunks, unless the annotator is `strict`, in
/// which case a miss is reported as [`AnnotationError::MissingFixture`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureAnnotator {
    #[serde(default)]
    lines: HashMap<String, Vec<EntityAnnotation>>,
    #[serde(default)]
    sentences: HashMap<String, Vec<NounChunk>>,
    #[serde(default)]
    strict: bool,
}

impl FixtureAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ExtractionError> {
        serde_json::from_str(json)
            .map_err(|e| ExtractionError::InvalidInput(format!("Invalid annotation fixture: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self, ExtractionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExtractionError::ConfigError(format!(
                "Failed to read annotation fixture {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Register an entity for a line; entities keep insertion order.
    pub fn with_entity(mut self, line: &str, label: &str, text: &str) -> Self {
        self.lines
            .entry(line.to_string())
            .or_default()
            .push(EntityAnnotation::new(label, text));
        self
    }

    /// Register the full chunk list of a sentence.
    pub fn with_chunks(mut self, sentence: &str, chunks: Vec<NounChunk>) -> Self {
        self.sentences.insert(sentence.to_string(), chunks);
        self
    }
}

impl AnnotationProvider for FixtureAnnotator {
    fn annotate_line(&self, text: &str) -> Result<Vec<EntityAnnotation>, AnnotationError> {
        match self.lines.get(text) {
            Some(entities) => Ok(entities.clone()),
            None if self.strict && !text.trim().is_empty() => {
                Err(AnnotationError::MissingFixture(text.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn annotate_sentence(&self, text: &str) -> Result<Vec<NounChunk>, AnnotationError> {
        match self.sentences.get(text) {
            Some(chunks) => Ok(chunks.clone()),
            None if self.strict => Err(AnnotationError::MissingFixture(text.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn provider_id(&self) -> &str {
        "fixture"
    }
}
