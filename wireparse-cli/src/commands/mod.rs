pub mod extract;
pub mod first_sentences;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// `*.json` files of a directory (extension matched case-insensitively).
///
/// Numbered files (`2.json`) sort numerically ahead of the rest, which sort
/// by name.
pub fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read directory {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }

    files.sort_by_key(|path| {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        (stem.parse::<u64>().ok().unwrap_or(u64::MAX), path.clone())
    });
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_files_in_orders_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10.json", "2.json", "b.JSON", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names: Vec<String> = json_files_in(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["2.json", "10.json", "a.json", "b.JSON"]);
    }

    #[test]
    fn test_json_files_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(json_files_in(&dir.path().join("missing")).is_err());
    }
}
