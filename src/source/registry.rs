//! Data source registry
//!
//! Lookup of sources by name or alias.

use super::SourceKind;

/// Get a source by name or alias
pub(crate) fn get_source(name: &str) -> Option<SourceKind> {
    let name_lower = name.trim().to_lowercase();
    SourceKind::ALL
        .into_iter()
        .find(|s| s.name() == name_lower || s.aliases().contains(&name_lower.as_str()))
}

/// Comma-separated list of source names, for error messages
pub(crate) fn source_names() -> String {
    SourceKind::ALL
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}
