use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::translate::ExportOptions;
use crate::translate::export::DEFAULT_BASE_PATH;

/// Top-level project configuration loaded from `.wad.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WadConfig {
    /// Internal definition file (JSON or YAML).
    pub definition: String,
    /// Directory receiving exported Swagger documents.
    pub output: String,
    /// File stem of the resource listing inside `output`.
    pub listing_file: String,
    pub format: DocumentFormat,
    pub export: ExportConfig,
}

impl Default for WadConfig {
    fn default() -> Self {
        Self {
            definition: "definition.yaml".to_string(),
            output: "swagger".to_string(),
            listing_file: "api-docs".to_string(),
            format: DocumentFormat::Json,
            export: ExportConfig::default(),
        }
    }
}

/// Serialization format of written documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

/// Export tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Base path written when the definition has no endpoint.
    pub placeholder_base_path: String,
    pub derive_nicknames: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            placeholder_base_path: DEFAULT_BASE_PATH.to_string(),
            derive_nicknames: true,
        }
    }
}

impl ExportConfig {
    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            placeholder_base_path: self.placeholder_base_path.clone(),
            derive_nicknames: self.derive_nicknames,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".wad.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<WadConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: WadConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# wad configuration
definition: definition.yaml   # Web API Definition (JSON or YAML)
output: swagger               # where `wad export` writes Swagger 1.2 documents
listing_file: api-docs        # resource listing file stem
format: json                  # json | yaml

export:
  placeholder_base_path: http://example.com  # used when the definition has no endpoint
  derive_nicknames: true      # listPets, getPet, ... for operations without a name
"#
}
