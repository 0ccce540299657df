//! Diffing a base catalog against a target catalog.

use crate::catalog::{
    Catalog,
    CatalogValue,
};

/// Compute the keys still needing translation, in base-catalog order.
///
/// A key is selected when its target entry is absent, a whitespace-only
/// flat string, or a plural object missing (or holding only whitespace in)
/// a category the base value requires. Keys with non-empty existing values
/// are never selected, so manual edits are never overwritten. An empty plan
/// means the locale is a no-op.
#[must_use]
pub fn plan(base: &Catalog, target: &Catalog) -> Vec<String> {
    base.entries()
        .filter(|(key, value)| needs_translation(value, target.get(key)))
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Decide whether one key's target value still needs translation.
fn needs_translation(base_value: &CatalogValue, existing: Option<&CatalogValue>) -> bool {
    match existing {
        None => true,
        Some(CatalogValue::Flat(text)) => text.trim().is_empty(),
        Some(CatalogValue::Plural(categories)) => match base_value {
            // Done only when every category the base requires is filled in;
            // reconciliation is key-granular, so one missing category
            // selects the whole key.
            CatalogValue::Plural(required) => required.iter().any(|(name, _)| {
                categories
                    .iter()
                    .find(|(category, _)| category == name)
                    .is_none_or(|(_, text)| text.trim().is_empty())
            }),
            // A plural object over a flat base entry is a manual edit;
            // leave it alone unless it is effectively empty.
            CatalogValue::Flat(_) => {
                categories.iter().all(|(_, text)| text.trim().is_empty())
            }
        },
    }
}
