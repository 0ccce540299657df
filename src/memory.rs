//! Persisted translation memory.
//!
//! The memory maps (memory key, exact source text) to a previously produced
//! translation so re-running a sync never re-queries the service for text it
//! has already seen. It is loaded once at run start, only grows during a
//! run, and is persisted wholesale at run end.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::locale;

/// Errors while persisting the memory file.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// Error when the memory file cannot be written
    #[error("Failed to write memory file: {0}")]
    Io(#[from] std::io::Error),
    /// Error when the memory cannot be serialized
    #[error("Failed to serialize memory: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Derive the cache namespace for a resolved target language.
///
/// The key is the lowercased primary subtag of the target language code,
/// suffixed with `-informal` when the locale is configured for the informal
/// register. Formal and informal translations of the same text are cached
/// independently.
#[must_use]
pub fn memory_key(target_code: &str, informal: bool) -> String {
    let primary = locale::primary_subtag(target_code).to_ascii_lowercase();
    if informal { format!("{primary}-informal") } else { primary }
}

/// In-memory view of the persisted translation cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMemory {
    /// memory key -> exact source text -> translated text
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl TranslationMemory {
    /// Load the memory file.
    ///
    /// A missing file yields an empty memory. An unreadable or malformed
    /// file is logged and also treated as empty; the wholesale persist at
    /// run end replaces it with a valid one.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No memory file; starting empty");
                return Self::default();
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Failed to read memory file; starting empty");
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => Self { entries },
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Memory file is not valid JSON; starting empty");
                Self::default()
            }
        }
    }

    /// Look up a cached translation by exact source text.
    ///
    /// No normalization is applied; whitespace or punctuation differences
    /// are cache misses.
    #[must_use]
    pub fn lookup(&self, memory_key: &str, source_text: &str) -> Option<&str> {
        self.entries.get(memory_key)?.get(source_text).map(String::as_str)
    }

    /// Record a completed translation.
    pub fn record(&mut self, memory_key: &str, source_text: &str, translated: &str) {
        self.entries
            .entry(memory_key.to_string())
            .or_default()
            .insert(source_text.to_string(), translated.to_string());
    }

    /// True when no entries exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the memory as a whole-file overwrite.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub fn persist(&self, path: &Path) -> Result<(), MemoryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut content = serde_json::to_string_pretty(&self.entries)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("DE", false, "de")]
    #[case("DE", true, "de-informal")]
    #[case("PT-BR", false, "pt")]
    #[case("PT-BR", true, "pt-informal")]
    fn memory_key_cases(#[case] code: &str, #[case] informal: bool, #[case] expected: &str) {
        assert_eq!(memory_key(code, informal), expected);
    }

    #[googletest::test]
    fn lookup_is_exact_on_raw_source_text() {
        let mut memory = TranslationMemory::default();
        memory.record("de", "Hello {$name}", "Hallo {$name}");

        expect_that!(memory.lookup("de", "Hello {$name}"), some(eq("Hallo {$name}")));
        // Whitespace differences are misses
        expect_that!(memory.lookup("de", "Hello {$name} "), none());
        // Other memory keys are fully independent
        expect_that!(memory.lookup("de-informal", "Hello {$name}"), none());
        expect_that!(memory.lookup("fr", "Hello {$name}"), none());
    }

    #[googletest::test]
    fn load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let memory = TranslationMemory::load(&temp_dir.path().join("memory.json"));

        expect_that!(memory.is_empty(), eq(true));
    }

    #[googletest::test]
    fn load_malformed_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");
        fs::write(&path, "not json").unwrap();

        let memory = TranslationMemory::load(&path);

        expect_that!(memory.is_empty(), eq(true));
    }

    #[googletest::test]
    fn persist_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memory.json");

        let mut memory = TranslationMemory::default();
        memory.record("de", "Hello", "Hallo");
        memory.record("de-informal", "Hello", "Hi du");
        memory.persist(&path).unwrap();

        let loaded = TranslationMemory::load(&path);

        assert_eq!(loaded, memory);
        expect_that!(loaded.lookup("de-informal", "Hello"), some(eq("Hi du")));
    }
}
