use config::{Config, ConfigError, Environment, File};
use extractors::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[extraction]
# Read phone/email from the line that names a contact (dropped by default)
capture_same_line_contact_fields = false
contacts_heading = "Contacts"
excluded_image_markers = ["icon_search", "bwlogo"]

[annotator]
# "http" talks to an annotation service, "fixture" reads precomputed annotations
kind = "http"
base_url = "http://127.0.0.1:8090"
timeout_secs = 10
# fixture_path = "annotations.json"

[runtime]
document_timeout_secs = 60
max_concurrent_documents = 4
"#;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub annotator: AnnotatorConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotatorKind {
    Http,
    Fixture,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub kind: AnnotatorKind,
    pub base_url: String,
    pub timeout_secs: u64,
    pub fixture_path: Option<PathBuf>,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            kind: AnnotatorKind::Http,
            base_url: "http://127.0.0.1:8090".to_string(),
            timeout_secs: 10,
            fixture_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct RuntimeConfig {
    pub document_timeout_secs: u64,
    pub max_concurrent_documents: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            document_timeout_secs: 60,
            max_concurrent_documents: 4,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location (created with defaults
    /// on first run). `WIREPARSE__SECTION__KEY` environment variables
    /// override file values.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Message(format!(
                        "Config file not found at {:?}",
                        path
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let path = get_config_path();
                ensure_default_config(&path)?;
                path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(
                Environment::with_prefix("WIREPARSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }
}

/// Write the commented default config if nothing exists at `path` yet.
pub fn ensure_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }

    // Create config directory if it doesn't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("wireparse").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
