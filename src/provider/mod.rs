//! Translation service abstraction.
//!
//! The sync engine consumes the service through the [`Translator`] trait;
//! its language detection, formality handling, and tag handling stay a
//! black box behind that boundary.

mod deepl;

pub use deepl::DeepLClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors from the translation service boundary.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when the HTTP request fails or the service rejects it
    #[error("Translation request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Error when the service answers with an unexpected payload
    #[error("Unexpected translation service response: {0}")]
    UnexpectedResponse(String),
}

/// A language supported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Language {
    /// Service language code (e.g. "EN-US", "DE").
    #[serde(rename = "language")]
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the formality option is honored; only reported for target
    /// languages.
    #[serde(default)]
    pub supports_formality: bool,
}

/// Requested register for the translated text.
///
/// The default register sends no formality at all; only the informal
/// variant is ever requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formality {
    /// Informal register ("less" formality).
    Less,
}

/// Per-call options forwarded to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Informal register request, where the target supports it.
    pub formality: Option<Formality>,
    /// Free-text disambiguation context.
    pub context: Option<String>,
}

/// The translation capability consumed by the sync engine.
///
/// Implementations must honor XML tag handling with `x` as an ignored tag
/// so protected placeholders pass through untouched.
#[allow(async_fn_in_trait)]
pub trait Translator {
    /// Translate one text between two resolved language codes.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        options: &TranslateOptions,
    ) -> Result<String, ProviderError>;

    /// Languages accepted as translation sources.
    async fn source_languages(&self) -> Result<Vec<Language>, ProviderError>;

    /// Languages offered as translation targets.
    async fn target_languages(&self) -> Result<Vec<Language>, ProviderError>;
}
