use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// One failed validation check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field}': {message}")]
pub struct ValidationError {
    /// Name of the offending field (e.g. "targetLocales")
    pub field: String,
    /// Human-readable problem description
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for a field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Errors produced while resolving the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error when one or more settings fail validation
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),
}

/// Render collected validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolved options consumed by the sync engine.
///
/// The CLI layer owns flag parsing and defaults; the engine only ever sees
/// this object.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncSettings {
    /// Path of the base-language catalog file.
    pub base_path: PathBuf,

    /// Directory holding one `<locale>.json` per target locale.
    pub output_dir: PathBuf,

    /// Target locale tags, processed in the order supplied.
    pub target_locales: Vec<String>,

    /// Locales translated with the informal register where supported.
    pub informal_locales: Vec<String>,

    /// Pass the catalog key as disambiguation context to the service.
    pub use_context: bool,

    /// Compiled-i18n catalogs store the text in the key; an empty source
    /// string then falls back to the key itself.
    pub key_fallback: bool,

    /// Translation memory file. Defaults to `translation-memory.json`
    /// inside the output directory.
    pub memory_path: Option<PathBuf>,

    /// Translation service credential.
    pub api_key: String,
}

impl SyncSettings {
    /// # Errors
    /// - Base catalog path is empty
    /// - No target locales requested
    /// - Missing service credential
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "basePath",
                "The base catalog path cannot be empty. Example: \"locales/en.json\"",
            ));
        }

        if self.target_locales.is_empty() {
            errors.push(ValidationError::new(
                "targetLocales",
                "At least one target locale is required. Example: [\"de\", \"pt_BR\"]",
            ));
        }

        if self.api_key.trim().is_empty() {
            errors.push(ValidationError::new(
                "apiKey",
                "A service credential is required. Pass --api-key or set DEEPL_API_KEY",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Whether a locale tag is configured for the informal register.
    #[must_use]
    pub fn is_informal(&self, locale: &str) -> bool {
        self.informal_locales.iter().any(|informal| informal == locale)
    }

    /// Effective translation memory file path.
    #[must_use]
    pub fn memory_file(&self) -> PathBuf {
        self.memory_path
            .clone()
            .unwrap_or_else(|| self.output_dir.join("translation-memory.json"))
    }

    /// Target catalog file path for a locale.
    #[must_use]
    pub fn catalog_file(&self, locale: &str) -> PathBuf {
        self.output_dir.join(format!("{locale}.json"))
    }
}
