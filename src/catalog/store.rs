//! Catalog file loading and persistence.

use std::path::Path;

use serde_json::Value;

use super::{
    Catalog,
    CatalogError,
};

/// Load and validate the base catalog.
///
/// # Errors
/// Any read, parse, or shape failure is returned; base catalog problems are
/// fatal to the run.
pub fn load_base(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&content)?;
    Catalog::from_json(&json)
}

/// Load a target catalog, creating an empty one when the file is absent.
///
/// # Errors
/// - [`CatalogError::Parse`] / [`CatalogError::InvalidShape`] when the file
///   exists but does not hold a valid catalog (caller skips the locale)
/// - [`CatalogError::Io`] for read failures other than a missing file
pub fn load_or_create(path: &Path, locale: &str) -> Result<Catalog, CatalogError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), locale, "Target catalog not found; starting empty");
            return Ok(Catalog::new(locale));
        }
        Err(error) => return Err(error.into()),
    };

    let json: Value = serde_json::from_str(&content)?;
    Catalog::from_json(&json)
}

/// Persist a catalog as a whole-file overwrite.
///
/// The parent directory is created when missing. The file is rewritten in
/// one write so a crash never leaves a half-written catalog alongside a
/// valid one.
///
/// # Errors
/// Returns an error when the directory or file cannot be written.
pub fn persist(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut content = serde_json::to_string_pretty(&catalog.to_json())?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
