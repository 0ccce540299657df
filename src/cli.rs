//! Command-line argument definition and resolution into sync settings.

use std::path::PathBuf;

use clap::Parser;

use crate::config::SyncSettings;

/// i18n-catalog-sync - incremental machine-translation sync for per-locale JSON catalogs
#[derive(Parser, Debug)]
#[command(name = "i18n-catalog-sync")]
#[command(version)]
#[command(about = "Fill missing catalog entries via machine translation", long_about = None)]
pub struct Args {
    /// Base-language catalog file
    #[arg(long)]
    pub base: PathBuf,

    /// Output directory containing one <locale>.json per target locale
    #[arg(long, default_value = "locales")]
    pub out: PathBuf,

    /// Target locale tags, processed in order (e.g. --locale de --locale pt_BR)
    #[arg(long = "locale")]
    pub locales: Vec<String>,

    /// Locales translated with the informal register where supported
    #[arg(long = "informal")]
    pub informal: Vec<String>,

    /// Pass the catalog key as context to the translation service
    #[arg(long)]
    pub context: bool,

    /// Compiled-i18n catalogs: empty source strings fall back to their key
    #[arg(long = "compiled-i18n")]
    pub compiled_i18n: bool,

    /// DeepL API key (falls back to the DEEPL_API_KEY environment variable)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Translation memory file (default: <out>/translation-memory.json)
    #[arg(long)]
    pub memory: Option<PathBuf>,
}

impl Args {
    /// Resolve flags and environment into the settings object the engine
    /// consumes. Credential resolution order: flag, then `DEEPL_API_KEY`.
    #[must_use]
    pub fn into_settings(self) -> SyncSettings {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("DEEPL_API_KEY").ok())
            .unwrap_or_default();

        SyncSettings {
            base_path: self.base,
            output_dir: self.out,
            target_locales: self.locales,
            informal_locales: self.informal,
            use_context: self.context,
            key_fallback: self.compiled_i18n,
            memory_path: self.memory,
            api_key,
        }
    }
}
