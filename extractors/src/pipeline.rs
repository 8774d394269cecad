use crate::companies::{RoleCompanyExtractor, TickerCompanyExtractor};
use crate::contacts::{ContactBlockExtractor, DEFAULT_CONTACTS_HEADING};
use crate::published_date::DateTimeExtractor;
use crate::sentence::RuleSentenceSplitter;
use crate::text::clean_flat_text;
use serde::{Deserialize, Serialize};
use shared_types::{
    AnnotationProvider, ArticleEntities, ArticleText, ExtractionError, Extractor,
    SentenceSplitter, SourceDocument,
};
use std::sync::Arc;
use tracing::{debug_span, info};

/// Tunable extraction policies, read from the `[extraction]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Read phone/email from the same line that names a new contact. Off by
    /// default, which drops that information.
    pub capture_same_line_contact_fields: bool,
    pub contacts_heading: String,
    /// Image URLs containing any of these substrings are left out.
    pub excluded_image_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            capture_same_line_contact_fields: false,
            contacts_heading: DEFAULT_CONTACTS_HEADING.to_string(),
            excluded_image_markers: vec!["icon_search".to_string(), "bwlogo".to_string()],
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.contacts_heading.trim().is_empty() {
            return Err(ExtractionError::ConfigError(
                "contacts_heading must not be empty".to_string(),
            ));
        }
        if self.contacts_heading.contains('\n') {
            return Err(ExtractionError::ConfigError(
                "contacts_heading must be a single line".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs every extractor over one press release and assembles the record.
///
/// Holds no per-document state, so one instance can serve many documents
/// concurrently.
pub struct PressReleaseExtractor {
    config: ExtractionConfig,
    contacts: ContactBlockExtractor,
    tickers: TickerCompanyExtractor,
    roles: RoleCompanyExtractor,
    dates: DateTimeExtractor,
}

impl PressReleaseExtractor {
    pub fn new(
        annotator: Arc<dyn AnnotationProvider>,
        splitter: Arc<dyn SentenceSplitter>,
        config: ExtractionConfig,
    ) -> Result<Self, ExtractionError> {
        config.validate()?;

        Ok(Self {
            contacts: ContactBlockExtractor::new(annotator.clone())
                .with_heading(config.contacts_heading.clone())
                .with_same_line_capture(config.capture_same_line_contact_fields),
            tickers: TickerCompanyExtractor::new(splitter),
            roles: RoleCompanyExtractor::new(annotator.clone()),
            dates: DateTimeExtractor::new(annotator),
            config,
        })
    }

    /// Default policies with the rule-based sentence splitter.
    pub fn with_defaults(annotator: Arc<dyn AnnotationProvider>) -> Self {
        Self {
            contacts: ContactBlockExtractor::new(annotator.clone()),
            tickers: TickerCompanyExtractor::new(Arc::new(RuleSentenceSplitter::new())),
            roles: RoleCompanyExtractor::new(annotator.clone()),
            dates: DateTimeExtractor::new(annotator),
            config: ExtractionConfig::default(),
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract contacts, companies and the publication date from an article's
    /// body and its flat text. Metadata is left empty.
    pub fn extract(
        &self,
        body_text: &str,
        flat_text: &str,
    ) -> Result<ArticleEntities, ExtractionError> {
        let input = ArticleText::new(body_text, flat_text);

        Ok(ArticleEntities {
            contacts: run(&self.contacts, &input)?,
            tickers: run(&self.tickers, &input)?,
            companies: run(&self.roles, &input)?,
            published: run(&self.dates, &input)?,
            ..ArticleEntities::default()
        })
    }

    /// Full record for a source document: cleaned flat text, extracted
    /// entities, filtered images and the annotated release timestamp.
    pub fn extract_document(
        &self,
        document: &SourceDocument,
    ) -> Result<ArticleEntities, ExtractionError> {
        let flat_text = clean_flat_text(&document.text);
        let mut entities = self.extract(&document.body, &flat_text)?;

        if let Some(timestamp) = document.published_date_time.as_deref() {
            entities.release_timestamp = self.dates.annotate_timestamp(timestamp)?;
        }

        let mut metadata = document.metadata();
        metadata.images = self.select_images(&document.images);
        entities.metadata = metadata;

        info!(
            url = entities.metadata.url.as_deref().unwrap_or("<none>"),
            contacts = entities.contacts.len(),
            tickers = entities.tickers.len(),
            "Processed article"
        );
        Ok(entities)
    }

    pub fn select_images(&self, images: &[String]) -> Vec<String> {
        images
            .iter()
            .filter(|url| {
                !self
                    .config
                    .excluded_image_markers
                    .iter()
                    .any(|marker| url.contains(marker.as_str()))
            })
            .cloned()
            .collect()
    }
}

fn run<E: Extractor>(extractor: &E, input: &ArticleText<'_>) -> Result<E::Output, ExtractionError> {
    let span = debug_span!(
        "extractor",
        data_type = ?extractor.data_type(),
        version = %extractor.version()
    );
    let _guard = span.enter();
    extractor.extract(input)
}
