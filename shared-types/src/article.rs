use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A person listed in the contacts section of a press release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactRecord {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub other_information: Vec<String>,
}

impl ContactRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
            email: None,
            other_information: Vec::new(),
        }
    }
}

/// Company name paired with the `EXCHANGE:TICKER` symbol that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyTickerPair {
    /// Empty when no title-case words precede the ticker.
    pub company_name: String,
    pub stock_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompanyMentionPair {
    pub first_company: Option<String>,
    pub second_company: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DateTimeResult {
    pub date: Option<String>,
    pub time: Option<String>,
}

impl DateTimeResult {
    pub fn both(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none()
    }
}

/// Article details supplied by the upstream document provider and carried
/// through to the output unchanged (apart from image filtering).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleMetadata {
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub sub_title: Option<String>,
    pub published_date: Option<String>,
    pub published_date_time: Option<String>,
}

/// Everything extracted from a single press release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArticleEntities {
    pub metadata: ArticleMetadata,
    pub contacts: Vec<ContactRecord>,
    pub tickers: Vec<CompanyTickerPair>,
    pub companies: CompanyMentionPair,
    /// Date and time found together at the start of a line of the flat text.
    pub published: DateTimeResult,
    /// Date and time read from the release timestamp string, each independently.
    pub release_timestamp: DateTimeResult,
}

/// A press release as handed over by the upstream document provider.
///
/// `body` is the plain article body, `text` the flat rendering of the whole
/// page (which is where the contacts block and dateline live).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    pub url: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub text: String,
    pub sub_title: Option<String>,
    pub published_date: Option<String>,
    pub published_date_time: Option<String>,
}

impl SourceDocument {
    pub fn metadata(&self) -> ArticleMetadata {
        ArticleMetadata {
            url: self.url.clone(),
            title: self.title.clone(),
            images: self.images.clone(),
            sub_title: self.sub_title.clone(),
            published_date: self.published_date.clone(),
            published_date_time: self.published_date_time.clone(),
        }
    }
}
