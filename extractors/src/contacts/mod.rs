mod machine;
mod patterns;

pub use machine::{line_events, ContactMachine, ContactState, LineEvent};
pub use patterns::{find_email, find_phone};

use crate::text::split_lines;
use shared_types::{
    labels, AnnotationProvider, ArticleText, ContactRecord, DataType, ExtractionError, Extractor,
};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_CONTACTS_HEADING: &str = "Contacts";

/// Extracts the people listed under the press release's contacts heading.
pub struct ContactBlockExtractor {
    annotator: Arc<dyn AnnotationProvider>,
    heading: String,
    capture_same_line_fields: bool,
}

impl ContactBlockExtractor {
    pub fn new(annotator: Arc<dyn AnnotationProvider>) -> Self {
        Self {
            annotator,
            heading: DEFAULT_CONTACTS_HEADING.to_string(),
            capture_same_line_fields: false,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Also read phone and email from the line that names a new contact.
    pub fn with_same_line_capture(mut self, enabled: bool) -> Self {
        self.capture_same_line_fields = enabled;
        self
    }

    /// Text after the last `<heading>\n` marker, if the marker occurs at all.
    pub fn contacts_region<'a>(&self, text: &'a str) -> Option<&'a str> {
        let marker = format!("{}\n", self.heading);
        text.rfind(&marker)
            .map(|position| &text[position + marker.len()..])
    }

    pub fn extract_from_text(&self, text: &str) -> Result<Vec<ContactRecord>, ExtractionError> {
        let Some(region) = self.contacts_region(text) else {
            debug!("No '{}' heading found, skipping contact extraction", self.heading);
            return Ok(Vec::new());
        };

        let mut machine = ContactMachine::new(self.capture_same_line_fields);

        for line in split_lines(region) {
            let entities = self.annotator.annotate_line(line)?;
            let person = entities
                .iter()
                .find(|entity| entity.is(labels::PERSON))
                .map(|entity| entity.text.as_str());

            for event in line_events(line, person) {
                machine.feed(event);
            }
        }

        let contacts = machine.finish();
        debug!(count = contacts.len(), "Extracted contacts");
        Ok(contacts)
    }
}

impl Extractor for ContactBlockExtractor {
    type Output = Vec<ContactRecord>;

    fn extract(&self, input: &ArticleText<'_>) -> Result<Self::Output, ExtractionError> {
        self.extract_from_text(input.flat_text)
    }

    fn data_type(&self) -> DataType {
        DataType::Contact
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
