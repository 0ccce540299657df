//! Per-locale synchronization driver.
//!
//! Locales are processed strictly in the order supplied, and keys strictly
//! in base-catalog order; the translation call is the only suspension
//! point. A locale failure is confined to that locale and the loop moves
//! on; only setup errors abort the run.

use thiserror::Error;

use crate::catalog::{
    self,
    Catalog,
    CatalogError,
};
use crate::config::{
    ConfigError,
    SyncSettings,
};
use crate::locale::LocaleMapper;
use crate::memory::{
    self,
    MemoryError,
    TranslationMemory,
};
use crate::placeholder;
use crate::planner;
use crate::plural;
use crate::provider::{
    Formality,
    ProviderError,
    TranslateOptions,
    Translator,
};

/// Fatal setup failures that abort the whole run before any translation
/// work for later locales happens.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Error when the resolved settings are invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Error when the base catalog cannot be loaded
    #[error("Failed to load base catalog '{path}': {source}")]
    BaseCatalog {
        /// Offending file path
        path: String,
        /// Underlying failure
        #[source]
        source: CatalogError,
    },
    /// Error when the base locale has no supported source language
    #[error("No supported source language for base locale '{0}'")]
    UnsupportedSourceLanguage(String),
    /// Error when the supported-language catalogs cannot be fetched
    #[error("Failed to fetch supported languages: {0}")]
    Languages(#[from] ProviderError),
    /// Error when the translation memory cannot be persisted at run end
    #[error("Failed to persist translation memory: {0}")]
    PersistMemory(#[from] MemoryError),
}

/// Errors confined to a single locale's processing.
#[derive(Error, Debug)]
enum LocaleError {
    /// Error while reading or writing the target catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Error from the translation service
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Terminal state of one locale's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleOutcome {
    /// All pending entries were filled in and the catalog was persisted.
    Completed {
        /// Sub-tasks resolved through the translation service.
        translated: usize,
        /// Sub-tasks resolved from the translation memory.
        from_memory: usize,
    },
    /// The locale tag has no supported target language.
    SkippedUnsupportedLanguage,
    /// The existing target catalog failed to parse or validate.
    SkippedParseError,
    /// Nothing to translate.
    SkippedNoWork,
    /// An error interrupted this locale; other locales are unaffected.
    Failed(String),
}

/// Outcome of a whole run, in locale processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-locale outcomes.
    pub locales: Vec<(String, LocaleOutcome)>,
}

impl RunSummary {
    /// Outcome recorded for a locale tag.
    #[must_use]
    pub fn outcome(&self, locale: &str) -> Option<&LocaleOutcome> {
        self.locales.iter().find(|(tag, _)| tag == locale).map(|(_, outcome)| outcome)
    }
}

/// Shared per-run state threaded through the locale loop.
struct RunContext<'a, T> {
    /// Resolved run options.
    settings: &'a SyncSettings,
    /// Translation capability.
    translator: &'a T,
    /// Base-language catalog (read-only).
    base: &'a Catalog,
    /// Resolved source language code.
    source_lang: &'a str,
    /// Locale resolution against the service language catalogs.
    mapper: &'a LocaleMapper,
}

/// Synchronize every configured target locale, then persist the memory.
///
/// Per-locale failures are logged and recorded in the summary; partial
/// success is success. Only setup failures return an error.
///
/// # Errors
/// See [`SyncError`] for the fatal setup taxonomy.
pub async fn run<T: Translator>(
    settings: &SyncSettings,
    translator: &T,
) -> Result<RunSummary, SyncError> {
    settings.validate().map_err(ConfigError::ValidationErrors)?;

    let base = catalog::load_base(&settings.base_path).map_err(|source| {
        SyncError::BaseCatalog { path: settings.base_path.display().to_string(), source }
    })?;

    let mapper =
        LocaleMapper::new(translator.source_languages().await?, translator.target_languages().await?);
    let source_lang = mapper
        .resolve_source(&base.locale)
        .ok_or_else(|| SyncError::UnsupportedSourceLanguage(base.locale.clone()))?
        .code
        .clone();
    tracing::debug!(base_locale = %base.locale, source_lang = %source_lang, "Resolved source language");

    let memory_file = settings.memory_file();
    let mut memory = TranslationMemory::load(&memory_file);

    let context = RunContext { settings, translator, base: &base, source_lang: &source_lang, mapper: &mapper };

    let mut summary = RunSummary::default();
    for locale_tag in &settings.target_locales {
        let outcome = match sync_locale(&context, &mut memory, locale_tag).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(locale = %locale_tag, %error, "Locale failed; continuing with next locale");
                LocaleOutcome::Failed(error.to_string())
            }
        };
        summary.locales.push((locale_tag.clone(), outcome));
    }

    memory.persist(&memory_file)?;
    Ok(summary)
}

/// Drive one locale from resolution to persistence.
async fn sync_locale<T: Translator>(
    context: &RunContext<'_, T>,
    memory: &mut TranslationMemory,
    locale_tag: &str,
) -> Result<LocaleOutcome, LocaleError> {
    let Some(target) = context.mapper.resolve_target(locale_tag) else {
        tracing::warn!(locale = %locale_tag, "No supported target language; skipping");
        return Ok(LocaleOutcome::SkippedUnsupportedLanguage);
    };

    let path = context.settings.catalog_file(locale_tag);
    let mut target_catalog = match catalog::load_or_create(&path, locale_tag) {
        Ok(loaded) => loaded,
        Err(error @ (CatalogError::Parse(_) | CatalogError::InvalidShape(_))) => {
            tracing::warn!(locale = %locale_tag, %error, "Target catalog is invalid; skipping");
            return Ok(LocaleOutcome::SkippedParseError);
        }
        Err(error) => return Err(error.into()),
    };

    let pending = planner::plan(context.base, &target_catalog);
    if pending.is_empty() {
        tracing::info!(locale = %locale_tag, "Catalog already up to date");
        return Ok(LocaleOutcome::SkippedNoWork);
    }
    tracing::info!(locale = %locale_tag, pending = pending.len(), "Synchronizing locale");

    let informal = context.settings.is_informal(locale_tag);
    let formality = (informal && target.supports_formality).then_some(Formality::Less);
    let memory_key = memory::memory_key(&target.code, informal);

    let mut translated = 0_usize;
    let mut from_memory = 0_usize;
    for key in &pending {
        // The plan only ever selects keys present in the base catalog
        let Some(value) = context.base.get(key) else { continue };

        for task in plural::expand(key, value, context.settings.key_fallback) {
            if let Some(hit) = memory.lookup(&memory_key, &task.text) {
                tracing::debug!(key = %task.key, "Memory hit");
                let cached = hit.to_string();
                plural::apply(&mut target_catalog, &task, cached);
                from_memory += 1;
                continue;
            }

            let options = TranslateOptions {
                formality,
                context: context.settings.use_context.then(|| task.key.clone()),
            };
            let protected = placeholder::protect(&task.text);
            let result = context
                .translator
                .translate(&protected, context.source_lang, &target.code, &options)
                .await?;
            let restored = placeholder::restore(&result);

            memory.record(&memory_key, &task.text, &restored);
            plural::apply(&mut target_catalog, &task, restored);
            translated += 1;
        }
    }

    catalog::persist(&target_catalog, &path)?;
    tracing::info!(locale = %locale_tag, translated, from_memory, "Locale synchronized");
    Ok(LocaleOutcome::Completed { translated, from_memory })
}
