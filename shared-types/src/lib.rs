pub mod annotation;
pub mod article;
pub mod extraction;

pub use annotation::{
    labels, AnnotationError, AnnotationProvider, EntityAnnotation, HeadPos, NounChunk,
    SentenceSplitter, SyntacticRole,
};
pub use article::{
    ArticleEntities, ArticleMetadata, CompanyMentionPair, CompanyTickerPair, ContactRecord,
    DateTimeResult, SourceDocument,
};
pub use extraction::*;
