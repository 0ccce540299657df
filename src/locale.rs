//! Locale tag resolution against the service's supported languages.

use crate::provider::Language;

/// Normalize a locale tag (underscores to hyphens).
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    tag.replace('_', "-")
}

/// The primary-language subtag of a locale tag (e.g. `pt` for `pt-BR`).
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Resolve a locale tag against a supported-language list.
///
/// The tag is normalized, then matched exactly against the service codes;
/// when no full-tag match exists, the bare primary-language subtag is tried.
/// The bare tag `en` is treated as `en-US` first (the service only offers
/// regional English variants as targets).
///
/// Returns `None` when neither matches; the caller logs and skips the
/// locale rather than aborting the run.
#[must_use]
pub fn resolve<'a>(tag: &str, languages: &'a [Language]) -> Option<&'a Language> {
    let normalized = normalize_tag(tag);
    let normalized =
        if normalized.eq_ignore_ascii_case("en") { "en-US".to_string() } else { normalized };

    if let Some(language) =
        languages.iter().find(|language| language.code.eq_ignore_ascii_case(&normalized))
    {
        return Some(language);
    }

    let primary = primary_subtag(&normalized);
    languages.iter().find(|language| language.code.eq_ignore_ascii_case(primary))
}

/// Resolved source/target language lists for one run.
#[derive(Debug, Clone)]
pub struct LocaleMapper {
    /// Languages accepted as translation sources.
    sources: Vec<Language>,
    /// Languages offered as translation targets.
    targets: Vec<Language>,
}

impl LocaleMapper {
    /// Build a mapper from the service's language catalogs.
    #[must_use]
    pub const fn new(sources: Vec<Language>, targets: Vec<Language>) -> Self {
        Self { sources, targets }
    }

    /// Resolve a locale tag to a supported source language.
    #[must_use]
    pub fn resolve_source(&self, tag: &str) -> Option<&Language> {
        resolve(tag, &self.sources)
    }

    /// Resolve a locale tag to a supported target language.
    #[must_use]
    pub fn resolve_target(&self, tag: &str) -> Option<&Language> {
        resolve(tag, &self.targets)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// Typical DeepL-style language catalogs.
    fn targets() -> Vec<Language> {
        [("DE", "German", true), ("EN-US", "English (American)", false), ("PT-BR", "Portuguese (Brazilian)", true)]
            .into_iter()
            .map(|(code, name, supports_formality)| Language {
                code: code.to_string(),
                name: name.to_string(),
                supports_formality,
            })
            .collect()
    }

    fn sources() -> Vec<Language> {
        [("DE", "German"), ("EN", "English"), ("PT", "Portuguese")]
            .into_iter()
            .map(|(code, name)| Language {
                code: code.to_string(),
                name: name.to_string(),
                supports_formality: false,
            })
            .collect()
    }

    #[rstest]
    // Bare "en" resolves to the American English target
    #[case("en", Some("EN-US"))]
    // Underscores are normalized before lookup
    #[case("pt_BR", Some("PT-BR"))]
    #[case("pt-BR", Some("PT-BR"))]
    // Exact match
    #[case("de", Some("DE"))]
    #[case("DE", Some("DE"))]
    // Primary-subtag fallback
    #[case("de-AT", Some("DE"))]
    // Unsupported
    #[case("tlh", None)]
    fn resolve_target_cases(#[case] tag: &str, #[case] expected: Option<&str>) {
        let mapper = LocaleMapper::new(sources(), targets());

        let result = mapper.resolve_target(tag).map(|language| language.code.as_str());

        assert_eq!(result, expected);
    }

    #[rstest]
    // "en" expands to "en-US", which has no exact source entry; the
    // primary-subtag fallback lands on bare "EN"
    #[case("en", Some("EN"))]
    #[case("en-GB", Some("EN"))]
    #[case("pt_BR", Some("PT"))]
    #[case("ja", None)]
    fn resolve_source_cases(#[case] tag: &str, #[case] expected: Option<&str>) {
        let mapper = LocaleMapper::new(sources(), targets());

        let result = mapper.resolve_source(tag).map(|language| language.code.as_str());

        assert_eq!(result, expected);
    }

    #[rstest]
    #[case("pt-BR", "pt")]
    #[case("de", "de")]
    #[case("az-Cyrl-AZ", "az")]
    fn primary_subtag_cases(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(primary_subtag(tag), expected);
    }
}
