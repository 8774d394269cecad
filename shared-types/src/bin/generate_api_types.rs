use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the extraction output
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(ContactRecord::export_to_string()?));

    // Company types
    types.push(clean_type(CompanyTickerPair::export_to_string()?));
    types.push(clean_type(CompanyMentionPair::export_to_string()?));

    // Article types
    types.push(clean_type(DateTimeResult::export_to_string()?));
    types.push(clean_type(ArticleMetadata::export_to_string()?));
    types.push(clean_type(ArticleEntities::export_to_string()?));
    types.push(clean_type(DataType::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strip ts-rs file headers and per-type imports; every type lands in the
/// same bundle, so cross-references resolve without them.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
        + "\n"
}
