use crate::commands::json_files_in;
use anyhow::Result;
use extractors::first_sentence;
use serde::{Deserialize, Serialize};
use shared_types::{ArticleMetadata, SentenceSplitter};
use std::path::Path;
use tracing::warn;

/// The parts of an output record this listing needs.
#[derive(Debug, Deserialize)]
struct StoredRecord {
    #[serde(default)]
    metadata: ArticleMetadata,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirstSentenceEntry {
    pub first_sentence: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Opening sentence of every output record in `dir`. Records that cannot be
/// read are logged and skipped.
pub fn list_first_sentences(
    dir: &Path,
    splitter: &dyn SentenceSplitter,
) -> Result<Vec<FirstSentenceEntry>> {
    let mut entries = Vec::new();

    for path in json_files_in(dir)? {
        let record: StoredRecord = match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from))
        {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        entries.push(FirstSentenceEntry {
            first_sentence: first_sentence(splitter, &record.body),
            url: record.metadata.url,
            title: record.metadata.title,
        });
    }

    Ok(entries)
}

pub fn run(dir: &Path, splitter: &dyn SentenceSplitter) -> Result<()> {
    for entry in list_first_sentences(dir, splitter)? {
        println!("{}", serde_json::to_string(&entry)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extractors::RuleSentenceSplitter;

    #[test]
    fn test_lists_first_sentence_per_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1.json"),
            serde_json::json!({
                "metadata": {"url": "https://a", "title": "Robots"},
                "body": "Acme launched a robot. It walks.",
                "contacts": []
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("2.json"),
            serde_json::json!({"metadata": {"url": "https://b"}, "body": ""}).to_string(),
        )
        .unwrap();
        std::fs::write(dir.path().join("3.json"), "{broken").unwrap();

        let entries = list_first_sentences(dir.path(), &RuleSentenceSplitter::new()).unwrap();
        assert_eq!(
            entries,
            vec![
                FirstSentenceEntry {
                    first_sentence: Some("Acme launched a robot.".to_string()),
                    url: Some("https://a".to_string()),
                    title: Some("Robots".to_string()),
                },
                FirstSentenceEntry {
                    first_sentence: None,
                    url: Some("https://b".to_string()),
                    title: None,
                },
            ]
        );
    }
}
