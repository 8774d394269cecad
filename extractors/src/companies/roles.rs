use crate::text::has_title_case_run;
use regex::Regex;
use shared_types::{
    labels, AnnotationProvider, ArticleText, CompanyMentionPair, DataType, ExtractionError,
    Extractor, HeadPos, NounChunk, SyntacticRole,
};
use std::sync::{Arc, LazyLock};
use tracing::debug;

static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("parenthesized span pattern is valid"));

/// Picks the acting company (subject) and the counterpart company (object)
/// from the syntax of the article body.
pub struct RoleCompanyExtractor {
    annotator: Arc<dyn AnnotationProvider>,
}

impl RoleCompanyExtractor {
    pub fn new(annotator: Arc<dyn AnnotationProvider>) -> Self {
        Self { annotator }
    }

    pub fn extract_from_body(&self, body: &str) -> Result<CompanyMentionPair, ExtractionError> {
        let text = strip_dateline(body);
        let chunks = self.annotator.annotate_sentence(&text)?;
        Ok(pick_companies(&chunks))
    }
}

/// Drop parenthesized spans, then keep the text after the last `--`
/// separator (the `CITY--(WIRE SERVICE)--` dateline). Separators are found
/// left to right without overlap, so `A---B` keeps `-B`.
pub fn strip_dateline(body: &str) -> String {
    let without_parens = PARENTHESIZED.replace_all(body, "");
    without_parens
        .split("--")
        .last()
        .unwrap_or_default()
        .to_string()
}

/// First title-case subject and first proper-noun object that is not a date.
///
/// The scan stops at the first qualifying object, so a subject that only
/// appears after it is never picked up.
pub fn pick_companies(chunks: &[NounChunk]) -> CompanyMentionPair {
    let mut companies = CompanyMentionPair::default();

    for chunk in chunks {
        if chunk.role == SyntacticRole::Nsubj && companies.first_company.is_none() {
            if has_title_case_run(&chunk.text) {
                companies.first_company = Some(chunk.text.clone());
            }
        } else if chunk.role.is_object()
            && chunk.head_pos == HeadPos::ProperNoun
            && chunk.head_entity_type != labels::DATE
        {
            companies.second_company = Some(chunk.text.clone());
            break;
        }
    }

    companies
}

impl Extractor for RoleCompanyExtractor {
    type Output = CompanyMentionPair;

    fn extract(&self, input: &ArticleText<'_>) -> Result<Self::Output, ExtractionError> {
        let companies = self.extract_from_body(input.body)?;
        debug!(
            first = ?companies.first_company,
            second = ?companies.second_company,
            "Extracted company mentions"
        );
        Ok(companies)
    }

    fn data_type(&self) -> DataType {
        DataType::CompanyMention
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}
