//! Catalog data model and JSON boundary validation.
//!
//! Catalog files are validated once, here, into the tagged [`CatalogValue`]
//! union; the rest of the crate never probes raw JSON shapes.

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Errors produced while reading or validating a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Error when the catalog file cannot be read or written
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    /// Error when the file content is not valid JSON
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Error when the JSON does not match the catalog schema
    #[error("Invalid catalog shape: {0}")]
    InvalidShape(String),
}

/// A single catalog entry value.
///
/// Entries are either a plain string or a mapping from plural-category name
/// (e.g. "one", "other") to string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    /// Plain text.
    Flat(String),
    /// Plural-category name to text, in file order.
    Plural(Vec<(String, String)>),
}

impl CatalogValue {
    /// Get the text for a plural category, if present.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&str> {
        match self {
            Self::Flat(_) => None,
            Self::Plural(categories) => categories
                .iter()
                .find(|(category, _)| category == name)
                .map(|(_, text)| text.as_str()),
        }
    }
}

/// A locale catalog: a locale tag plus its keyed translations.
///
/// Entry order matches the underlying file; the sync plan is ordered by the
/// base catalog's entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Locale tag this catalog holds text for (e.g. "en", "pt_BR").
    pub locale: String,
    /// Keyed entries in file order.
    entries: Vec<(String, CatalogValue)>,
}

impl Catalog {
    /// Create an empty catalog for a locale.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        Self { locale: locale.into(), entries: Vec::new() }
    }

    /// Get the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CatalogValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CatalogValue> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Replace the value for a key, appending the entry when absent.
    pub fn set(&mut self, key: &str, value: CatalogValue) {
        if let Some(slot) = self.get_mut(key) {
            *slot = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    /// Iterate entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CatalogValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a parsed JSON document into a catalog.
    ///
    /// Expected shape:
    /// `{ "locale": string, "translations": { key: string | { category: string } } }`
    ///
    /// # Errors
    /// Returns [`CatalogError::InvalidShape`] when any part of the document
    /// does not match the schema (a common cause is an unresolved merge
    /// conflict turning a value into something other than a string).
    pub fn from_json(json: &Value) -> Result<Self, CatalogError> {
        let root = json
            .as_object()
            .ok_or_else(|| CatalogError::InvalidShape("document is not an object".to_string()))?;

        let locale = root
            .get("locale")
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::InvalidShape("missing 'locale' string".to_string()))?;

        let translations = root
            .get("translations")
            .and_then(Value::as_object)
            .ok_or_else(|| CatalogError::InvalidShape("missing 'translations' object".to_string()))?;

        let mut entries = Vec::with_capacity(translations.len());
        for (key, value) in translations {
            entries.push((key.clone(), value_from_json(key, value)?));
        }

        Ok(Self { locale: locale.to_string(), entries })
    }

    /// Serialize the catalog back to its JSON document shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut translations = Map::new();
        for (key, value) in &self.entries {
            let json_value = match value {
                CatalogValue::Flat(text) => Value::String(text.clone()),
                CatalogValue::Plural(categories) => {
                    let mut object = Map::new();
                    for (category, text) in categories {
                        object.insert(category.clone(), Value::String(text.clone()));
                    }
                    Value::Object(object)
                }
            };
            translations.insert(key.clone(), json_value);
        }

        let mut root = Map::new();
        root.insert("locale".to_string(), Value::String(self.locale.clone()));
        root.insert("translations".to_string(), Value::Object(translations));
        Value::Object(root)
    }
}

/// Validate one translation value into the tagged union.
fn value_from_json(key: &str, value: &Value) -> Result<CatalogValue, CatalogError> {
    match value {
        Value::String(text) => Ok(CatalogValue::Flat(text.clone())),
        Value::Object(object) => {
            let mut categories = Vec::with_capacity(object.len());
            for (category, text) in object {
                let text = text.as_str().ok_or_else(|| {
                    CatalogError::InvalidShape(format!(
                        "plural category '{category}' of key '{key}' is not a string"
                    ))
                })?;
                categories.push((category.clone(), text.to_string()));
            }
            Ok(CatalogValue::Plural(categories))
        }
        _ => Err(CatalogError::InvalidShape(format!(
            "value of key '{key}' is neither a string nor a plural object"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn from_json_flat_and_plural() {
        let json = json!({
            "locale": "en",
            "translations": {
                "greet": "Hello {$name}",
                "items": { "one": "1 item", "other": "{$n} items" }
            }
        });

        let catalog = Catalog::from_json(&json).unwrap();

        expect_that!(catalog.locale, eq("en"));
        expect_that!(catalog.len(), eq(2));
        expect_that!(
            catalog.get("greet"),
            some(eq(&CatalogValue::Flat("Hello {$name}".to_string())))
        );
        expect_that!(
            catalog.get("items").and_then(|v| v.category("other")),
            some(eq("{$n} items"))
        );
    }

    #[googletest::test]
    fn from_json_preserves_entry_order() {
        let json = json!({
            "locale": "en",
            "translations": { "b": "B", "a": "A", "c": "C" }
        });

        let catalog = Catalog::from_json(&json).unwrap();

        let keys: Vec<&str> = catalog.entries().map(|(k, _)| k).collect();
        expect_that!(keys, elements_are![eq(&"b"), eq(&"a"), eq(&"c")]);
    }

    #[googletest::test]
    fn from_json_rejects_missing_locale() {
        let json = json!({ "translations": {} });

        let result = Catalog::from_json(&json);

        expect_that!(result, err(pat!(CatalogError::InvalidShape(contains_substring("locale")))));
    }

    #[googletest::test]
    fn from_json_rejects_non_string_values() {
        let json = json!({
            "locale": "en",
            "translations": { "count": 42 }
        });

        let result = Catalog::from_json(&json);

        expect_that!(result, err(pat!(CatalogError::InvalidShape(contains_substring("count")))));
    }

    #[googletest::test]
    fn from_json_rejects_nested_plural_objects() {
        let json = json!({
            "locale": "en",
            "translations": { "items": { "one": { "deep": "no" } } }
        });

        let result = Catalog::from_json(&json);

        expect_that!(result, err(pat!(CatalogError::InvalidShape(anything()))));
    }

    #[googletest::test]
    fn to_json_round_trips() {
        let json = json!({
            "locale": "de",
            "translations": {
                "greet": "Hallo {$name}",
                "items": { "one": "1 Artikel", "other": "{$n} Artikel" }
            }
        });

        let catalog = Catalog::from_json(&json).unwrap();

        assert_eq!(catalog.to_json(), json);
    }

    #[googletest::test]
    fn set_replaces_in_place_and_appends_new_keys() {
        let mut catalog = Catalog::new("de");
        catalog.set("a", CatalogValue::Flat("1".to_string()));
        catalog.set("b", CatalogValue::Flat("2".to_string()));
        catalog.set("a", CatalogValue::Flat("3".to_string()));

        let keys: Vec<&str> = catalog.entries().map(|(k, _)| k).collect();
        expect_that!(keys, elements_are![eq(&"a"), eq(&"b")]);
        expect_that!(catalog.get("a"), some(eq(&CatalogValue::Flat("3".to_string()))));
    }
}
