//! Interfaces to the linguistic annotation collaborators.
//!
//! The extractors never load a language model themselves. They are handed an
//! [`AnnotationProvider`] (named entities per line, noun chunks per sentence)
//! and a [`SentenceSplitter`], and only ever talk to those traits.

use serde::{Deserialize, Serialize};

/// Entity labels the extractors look for.
pub mod labels {
    pub const PERSON: &str = "PERSON";
    pub const DATE: &str = "DATE";
    pub const TIME: &str = "TIME";
}

/// A named entity found in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub label: String,
    pub text: String,
}

impl EntityAnnotation {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn is(&self, label: &str) -> bool {
        self.label == label
    }
}

/// Grammatical function of a noun chunk relative to its governing verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SyntacticRole {
    Nsubj,
    Dobj,
    Pobj,
    Other,
}

impl SyntacticRole {
    pub fn from_dependency(dep: &str) -> Self {
        match dep {
            "nsubj" => Self::Nsubj,
            "dobj" => Self::Dobj,
            "pobj" => Self::Pobj,
            _ => Self::Other,
        }
    }

    pub fn is_object(self) -> bool {
        matches!(self, Self::Dobj | Self::Pobj)
    }
}

impl From<String> for SyntacticRole {
    fn from(dep: String) -> Self {
        Self::from_dependency(&dep)
    }
}

/// Part of speech of a noun chunk's head word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum HeadPos {
    #[serde(rename = "PROPN")]
    ProperNoun,
    #[serde(rename = "OTHER")]
    Other,
}

impl HeadPos {
    pub fn from_tag(tag: &str) -> Self {
        if tag == "PROPN" {
            Self::ProperNoun
        } else {
            Self::Other
        }
    }
}

impl From<String> for HeadPos {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

/// A noun phrase of a sentence together with the syntax of its head word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    pub role: SyntacticRole,
    pub head_pos: HeadPos,
    /// Entity type of the head word, empty when it is not part of an entity.
    #[serde(default)]
    pub head_entity_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("Annotation provider unavailable: {0}")]
    Unavailable(String),

    #[error("Annotation request failed: {0}")]
    Request(String),

    #[error("Invalid annotation response: {0}")]
    InvalidResponse(String),

    #[error("No fixture annotations for: {0}")]
    MissingFixture(String),
}

/// Named-entity and syntactic annotation of text.
///
/// Implementations must return the same annotations for the same input within
/// a run, and must be callable from several documents' pipelines at once.
pub trait AnnotationProvider: Send + Sync {
    /// Named entities of a single line (or short span) of text, in order.
    fn annotate_line(&self, text: &str) -> Result<Vec<EntityAnnotation>, AnnotationError>;

    /// Noun chunks of a sentence (or passage), left to right.
    fn annotate_sentence(&self, text: &str) -> Result<Vec<NounChunk>, AnnotationError>;

    /// Human-readable provider identifier, used in logs.
    fn provider_id(&self) -> &str;
}

pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_dependency_label() {
        assert_eq!(SyntacticRole::from_dependency("nsubj"), SyntacticRole::Nsubj);
        assert_eq!(SyntacticRole::from_dependency("pobj"), SyntacticRole::Pobj);
        assert_eq!(SyntacticRole::from_dependency("nsubjpass"), SyntacticRole::Other);
        assert!(SyntacticRole::Dobj.is_object());
        assert!(!SyntacticRole::Nsubj.is_object());
    }

    #[test]
    fn test_noun_chunk_deserialization() {
        let chunk: NounChunk = serde_json::from_str(
            r#"{"text":"Acme Robotics","role":"nsubj","head_pos":"PROPN","head_entity_type":"ORG"}"#,
        )
        .unwrap();
        assert_eq!(chunk.role, SyntacticRole::Nsubj);
        assert_eq!(chunk.head_pos, HeadPos::ProperNoun);

        let chunk: NounChunk =
            serde_json::from_str(r#"{"text":"a deal","role":"attr","head_pos":"NOUN"}"#).unwrap();
        assert_eq!(chunk.role, SyntacticRole::Other);
        assert_eq!(chunk.head_pos, HeadPos::Other);
        assert!(chunk.head_entity_type.is_empty());
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&SyntacticRole::Dobj).unwrap();
        assert_eq!(json, "\"dobj\"");

        let json = serde_json::to_string(&HeadPos::ProperNoun).unwrap();
        assert_eq!(json, "\"PROPN\"");
    }
}
