use crate::text::split_lines;
use shared_types::{
    labels, AnnotationProvider, ArticleText, DataType, DateTimeResult, ExtractionError, Extractor,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Finds the release date line: a line that starts with a DATE entity and
/// also carries a TIME entity.
pub struct DateTimeExtractor {
    annotator: Arc<dyn AnnotationProvider>,
}

impl DateTimeExtractor {
    pub fn new(annotator: Arc<dyn AnnotationProvider>) -> Self {
        Self { annotator }
    }

    pub fn extract_from_text(&self, text: &str) -> Result<DateTimeResult, ExtractionError> {
        for line in split_lines(text) {
            let entities = self.annotator.annotate_line(line)?;

            // Later entities with the same label win
            let by_label: HashMap<&str, &str> = entities
                .iter()
                .map(|entity| (entity.label.as_str(), entity.text.as_str()))
                .collect();

            if let (Some(date), Some(time)) = (by_label.get(labels::DATE), by_label.get(labels::TIME))
            {
                if line.starts_with(date) {
                    return Ok(DateTimeResult::both(*date, *time));
                }
            }
        }

        Ok(DateTimeResult::default())
    }

    /// Read DATE and TIME out of a standalone release timestamp such as
    /// `February 7, 2019 08:00 AM Eastern Standard Time`. Unlike the line
    /// scan, either part may be missing.
    pub fn annotate_timestamp(&self, timestamp: &str) -> Result<DateTimeResult, ExtractionError> {
        let mut result = DateTimeResult::default();

        for entity in self.annotator.annotate_line(timestamp.trim())? {
            if entity.is(labels::DATE) {
                result.date = Some(entity.text);
            } else if entity.is(labels::TIME) {
                result.time = Some(entity.text);
            }
        }

        Ok(result)
    }
}

impl Extractor for DateTimeExtractor {
    type Output = DateTimeResult;

    fn extract(&self, input: &ArticleText<'_>) -> Result<Self::Output, ExtractionError> {
        let published = self.extract_from_text(input.flat_text)?;
        debug!(date = ?published.date, time = ?published.time, "Extracted publication date");
        Ok(published)
    }

    fn data_type(&self) -> DataType {
        DataType::PublishedDate
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
