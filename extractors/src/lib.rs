//! Extractors Crate
//!
//! This crate turns press-release text into structured records: the people
//! in the contacts section, company/ticker pairs from the opening sentence,
//! the acting and counterpart companies, and the release date and time.
//!
//! # Architecture
//!
//! - **Types**: Records, annotation interfaces and the `Extractor` trait are
//!   defined in the `shared-types` crate
//! - **Implementations**: Concrete extractors are implemented in this crate
//!
//! Linguistic annotation (named entities, noun chunks) is never computed
//! here. Every extractor that needs it is handed an `AnnotationProvider`.
//!
//! # Available Extractors
//!
//! - `ContactBlockExtractor`: Contact people listed under the `Contacts` heading
//! - `TickerCompanyExtractor`: `Company (EXCHANGE: TICKER)` pairs in the first sentence
//! - `RoleCompanyExtractor`: Subject and object companies from noun-chunk roles
//! - `DateTimeExtractor`: Release date and time from the dateline
//! - `PressReleaseExtractor`: Runs all of the above over one article
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{FixtureAnnotator, PressReleaseExtractor};
//! use std::sync::Arc;
//!
//! let pipeline = PressReleaseExtractor::with_defaults(Arc::new(FixtureAnnotator::new()));
//! let entities = pipeline.extract(&body, &flat_text)?;
//! ```

pub mod annotation;
pub mod companies;
pub mod contacts;
pub mod pipeline;
pub mod published_date;
pub mod sentence;
pub mod text;

// Re-export commonly used types
pub use annotation::FixtureAnnotator;
pub use companies::{RoleCompanyExtractor, TickerCompanyExtractor};
pub use contacts::ContactBlockExtractor;
pub use pipeline::{ExtractionConfig, PressReleaseExtractor};
pub use published_date::DateTimeExtractor;
pub use sentence::{first_sentence, RuleSentenceSplitter};

// Re-export the Extractor trait from shared-types for convenience
pub use shared_types::Extractor;
