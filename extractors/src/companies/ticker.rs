use crate::sentence::first_sentence;
use crate::text::has_title_case_run;
use regex::Regex;
use shared_types::{
    ArticleText, CompanyTickerPair, DataType, ExtractionError, Extractor, SentenceSplitter,
};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// `(EXCHANGE:TICKER)`, with at most one whitespace character after the colon.
static TICKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z]+:\s?[A-Z]+\)").expect("ticker pattern is valid"));

/// Finds `Company Name (EXCHANGE: TICKER)` mentions in an article's opening
/// sentence.
pub struct TickerCompanyExtractor {
    splitter: Arc<dyn SentenceSplitter>,
}

impl TickerCompanyExtractor {
    pub fn new(splitter: Arc<dyn SentenceSplitter>) -> Self {
        Self { splitter }
    }

    pub fn extract_from_body(&self, body: &str) -> Vec<CompanyTickerPair> {
        match first_sentence(self.splitter.as_ref(), body) {
            Some(sentence) => companies_in_sentence(&sentence),
            None => Vec::new(),
        }
    }
}

/// One pair per ticker in the sentence, in order of appearance.
pub fn companies_in_sentence(sentence: &str) -> Vec<CompanyTickerPair> {
    TICKER
        .find_iter(sentence)
        .map(|ticker| CompanyTickerPair {
            company_name: name_before(&sentence[..ticker.start()]),
            stock_name: stock_name(ticker.as_str()),
        })
        .collect()
}

/// The run of title-case words immediately preceding a ticker.
fn name_before(preceding: &str) -> String {
    let mut words: Vec<&str> = preceding
        .split_whitespace()
        .rev()
        .take_while(|word| has_title_case_run(word))
        .collect();
    words.reverse();
    words.join(" ")
}

/// `(NASDAQ: ACME)` becomes `NASDAQ:ACME`.
fn stock_name(ticker: &str) -> String {
    ticker
        .chars()
        .filter(|c| !matches!(c, '(' | ')') && !c.is_whitespace())
        .collect()
}

impl Extractor for TickerCompanyExtractor {
    type Output = Vec<CompanyTickerPair>;

    fn extract(&self, input: &ArticleText<'_>) -> Result<Self::Output, ExtractionError> {
        let tickers = self.extract_from_body(input.body);
        debug!(count = tickers.len(), "Extracted ticker companies");
        Ok(tickers)
    }

    fn data_type(&self) -> DataType {
        DataType::CompanyTicker
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::RuleSentenceSplitter;

    fn pair(company_name: &str, stock_name: &str) -> CompanyTickerPair {
        CompanyTickerPair {
            company_name: company_name.to_string(),
            stock_name: stock_name.to_string(),
        }
    }

    #[test]
    fn test_single_ticker() {
        let companies =
            companies_in_sentence("Acme Robotics Inc. (NASDAQ: ACME) announced today a new robot.");
        assert_eq!(companies, vec![pair("Acme Robotics Inc.", "NASDAQ:ACME")]);
    }

    #[test]
    fn test_ticker_without_space() {
        let companies = companies_in_sentence("Shares of Widget Corp (NYSE:WDG) rose.");
        assert_eq!(companies, vec![pair("Widget Corp", "NYSE:WDG")]);
    }

    #[test]
    fn test_multiple_tickers_stop_at_lowercase_words() {
        let companies = companies_in_sentence(
            "SAN JOSE, Calif.--(BUSINESS WIRE)--Acme Inc. (NASDAQ: ACME) and Widget Labs (NYSE: WDG) today announced a merger.",
        );
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].stock_name, "NASDAQ:ACME");
        assert_eq!(companies[1], pair("Widget Labs", "NYSE:WDG"));
    }

    #[test]
    fn test_ticker_without_preceding_name() {
        let companies = companies_in_sentence("shares of (NASDAQ: ACME) rose");
        assert_eq!(companies, vec![pair("", "NASDAQ:ACME")]);

        let companies = companies_in_sentence("(NYSE: IBM) rose");
        assert_eq!(companies, vec![pair("", "NYSE:IBM")]);
    }

    #[test]
    fn test_non_ticker_parentheses_are_ignored() {
        assert!(companies_in_sentence("Acme (the Company) grew (nasdaq: acme).").is_empty());
        assert!(companies_in_sentence("Acme (NASDAQ:  ACME) grew.").is_empty());
        assert!(companies_in_sentence("").is_empty());
    }

    #[test]
    fn test_only_first_sentence_is_scanned() {
        let extractor = TickerCompanyExtractor::new(Arc::new(RuleSentenceSplitter::new()));
        let body = "Acme Robotics Inc. (NASDAQ: ACME) announced today a robot. Widget Labs (NYSE: WDG) agreed.";

        let companies = extractor.extract_from_body(body);
        assert_eq!(companies, vec![pair("Acme Robotics Inc.", "NASDAQ:ACME")]);

        assert!(extractor.extract_from_body("").is_empty());
    }

    #[test]
    fn test_abbreviated_city_dateline_keeps_ticker() {
        let extractor = TickerCompanyExtractor::new(Arc::new(RuleSentenceSplitter::new()));

        let companies = extractor.extract_from_body(
            "ST. LOUIS--(BUSINESS WIRE)--Acme Inc. (NYSE: ACM) opened a plant. Hiring starts now.",
        );
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].stock_name, "NYSE:ACM");
        assert!(companies[0].company_name.ends_with("Acme Inc."));

        let companies = extractor.extract_from_body(
            "NEW YORK--(BUSINESS WIRE)--Feb. 7, 2019--Acme Inc. (NYSE: ACM) grew. Shares rose.",
        );
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].stock_name, "NYSE:ACM");
    }

    #[test]
    fn test_stock_name_shape() {
        let name_part = Regex::new(r"^[A-Z]+:[A-Z]+$").unwrap();
        let companies = companies_in_sentence("A (NYSE: A), B (NASDAQ:BB) and C (LSE: CCC).");
        assert_eq!(companies.len(), 3);
        for company in companies {
            assert!(name_part.is_match(&company.stock_name));
        }
    }
}
