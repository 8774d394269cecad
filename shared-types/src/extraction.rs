use crate::annotation::AnnotationError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Core trait that all press-release extractors implement
pub trait Extractor {
    /// What this extractor produces for one article
    type Output;

    /// Extract from the article text
    fn extract(&self, input: &ArticleText<'_>) -> Result<Self::Output, ExtractionError>;

    /// What data type does this extractor target?
    fn data_type(&self) -> DataType;

    /// Get extractor version for tracking
    fn version(&self) -> String {
        "1.0.0".to_string()
    }
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Types of records that can be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    Contact,
    CompanyTicker,
    CompanyMention,
    PublishedDate,
}

/// The two renderings of an article every extractor works from
#[derive(Debug, Clone, Copy)]
pub struct ArticleText<'a> {
    /// Plain article body, starting with the dateline and opening sentence
    pub body: &'a str,
    /// Flat text of the whole page, including the contacts block
    pub flat_text: &'a str,
}

impl<'a> ArticleText<'a> {
    pub fn new(body: &'a str, flat_text: &'a str) -> Self {
        Self { body, flat_text }
    }
}
