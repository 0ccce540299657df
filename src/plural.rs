//! Expansion of catalog values into translation sub-tasks and reassembly.

use crate::catalog::{
    Catalog,
    CatalogValue,
};

/// A single translation unit: one key's flat value or one plural category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
    /// Catalog key the task belongs to.
    pub key: String,
    /// `None` for flat string values, the category name for plural variants.
    pub category: Option<String>,
    /// Raw source text submitted to memory lookup and translation.
    pub text: String,
}

/// Expand a source value into its translation sub-tasks, in source order.
///
/// With `key_fallback` set (compiled-i18n catalogs store the text in the
/// key), an empty flat source uses the key itself as the text.
#[must_use]
pub fn expand(key: &str, value: &CatalogValue, key_fallback: bool) -> Vec<SyncTask> {
    match value {
        CatalogValue::Flat(text) => {
            let text = if text.is_empty() && key_fallback { key } else { text };
            vec![SyncTask { key: key.to_string(), category: None, text: text.to_string() }]
        }
        CatalogValue::Plural(categories) => categories
            .iter()
            .map(|(category, text)| SyncTask {
                key: key.to_string(),
                category: Some(category.clone()),
                text: text.clone(),
            })
            .collect(),
    }
}

/// Write one completed sub-task result back into the target catalog.
///
/// A flat result overwrites the key's value. A category result is inserted
/// into the key's plural map; when the current value is absent or still a
/// flat string, it is first replaced by a fresh map holding the category.
pub fn apply(target: &mut Catalog, task: &SyncTask, translated: String) {
    let Some(category) = &task.category else {
        target.set(&task.key, CatalogValue::Flat(translated));
        return;
    };

    if let Some(CatalogValue::Plural(categories)) = target.get_mut(&task.key) {
        if let Some(slot) = categories.iter_mut().find(|(name, _)| name == category) {
            slot.1 = translated;
        } else {
            categories.push((category.clone(), translated));
        }
        return;
    }

    target.set(&task.key, CatalogValue::Plural(vec![(category.clone(), translated)]));
}
