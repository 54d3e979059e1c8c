use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use super::{ApiDeclaration, ResourceListing, SwaggerDocument, from_json, from_yaml};
use crate::error::TranslationError;

/// Read a resource listing and every API declaration stored next to it.
///
/// Declarations are the `*.json`, `*.yaml` and `*.yml` files of
/// `declarations_dir` (the listing itself excluded), keyed by file stem in
/// file name order.
pub fn load_documents(
    listing_path: &Path,
    declarations_dir: &Path,
) -> Result<(ResourceListing, IndexMap<String, ApiDeclaration>), TranslationError> {
    let listing: ResourceListing = read_document(listing_path)?;

    let entries = fs::read_dir(declarations_dir).map_err(|e| {
        TranslationError::file(format!("{}: {}", declarations_dir.display(), e))
    })?;

    let listing_canonical = fs::canonicalize(listing_path).ok();
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && document_extension(path).is_some())
        .filter(|path| {
            let canonical = fs::canonicalize(path).ok();
            canonical.is_none() || canonical != listing_canonical
        })
        .collect();
    paths.sort();

    let mut declarations = IndexMap::new();
    for path in paths {
        let Some(section) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let declaration: ApiDeclaration = read_document(&path)?;
        debug!("Loaded API declaration {} from {}", section, path.display());
        declarations.insert(section.to_string(), declaration);
    }

    Ok((listing, declarations))
}

fn read_document<T: SwaggerDocument>(path: &Path) -> Result<T, TranslationError> {
    let content = fs::read_to_string(path)
        .map_err(|e| TranslationError::file(format!("{}: {}", path.display(), e)))?;

    let parsed = match document_extension(path) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    };
    parsed.map_err(|e| {
        debug!("Failed to parse {}: {}", path.display(), e);
        TranslationError::compliance()
    })
}

fn document_extension(path: &Path) -> Option<&str> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext @ ("json" | "yaml" | "yml")) => Some(ext),
        _ => None,
    }
}
