//! Read-only queries over a loaded template catalog.

use super::types::{ModelCategory, Template};
use crate::settings::Settings;

/// Find a template by id.
pub fn find<'a>(settings: &'a Settings, id: &str) -> Option<&'a Template> {
    settings.templates.iter().find(|t| t.id == id)
}

/// Names of all templates in a category, in catalog order.
///
/// Used by editing flows for name-uniqueness checks before committing a
/// rename or an import.
pub fn names_by_category(settings: &Settings, category: ModelCategory) -> Vec<String> {
    settings
        .templates
        .iter()
        .filter(|t| t.category == category)
        .map(|t| t.name.clone())
        .collect()
}
