//! Field-level reconciliation of a user document against shipped defaults.
//!
//! The merge is one-directional: the shipped defaults are the skeleton and
//! the user's values are grafted onto it. Fields new in the defaults simply
//! keep their default value; fields the defaults dropped disappear with the
//! old shape. No I/O happens here.

use crate::settings::types::{FIELDS, FieldAuthority, Settings};
use crate::templates;

/// Outcome of a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// The document that becomes the new current configuration.
    pub settings: Settings,
    /// True when a schema version mismatch forced a full reset to defaults.
    /// The caller backs up the discarded user file before persisting.
    pub schema_reset: bool,
}

/// Merge the user's `current` settings with freshly shipped `defaults`.
///
/// A schema version mismatch short-circuits to the defaults verbatim:
/// field-level merging cannot reason about restructured fields. Otherwise
/// every declared field is reconciled in declaration order per its
/// authority in [`FIELDS`], with the template list delegated to
/// [`templates::reconcile`].
pub fn merge(current: &Settings, defaults: &Settings) -> Merged {
    if current.schema_version != defaults.schema_version {
        let mut settings = defaults.clone();
        settings.finish_load();
        return Merged {
            settings,
            schema_reset: true,
        };
    }

    let mut merged = defaults.clone();
    for field in FIELDS {
        match field.authority {
            FieldAuthority::Defaults => {
                // The shipped value is already in place; the template list is
                // the one defaults-authority field with its own merge rules.
                if field.name == "templates" {
                    merged.templates =
                        templates::reconcile(&current.templates, &defaults.templates);
                }
            }
            FieldAuthority::User => copy_user_field(&mut merged, current, field.name),
        }
    }

    merged.finish_load();
    Merged {
        settings: merged,
        schema_reset: false,
    }
}

/// Copy one user-authority field from `current` when it carries a value.
///
/// `Option` fields copy on `Some` and otherwise leave the shipped default;
/// plain fields always carry a value and are copied unconditionally.
fn copy_user_field(merged: &mut Settings, current: &Settings, name: &str) {
    match name {
        "active_template" => {
            if current.active_template.is_some() {
                merged.active_template = current.active_template.clone();
            }
        }
        "device" => merged.device = current.device,
        "threads" => {
            if current.threads.is_some() {
                merged.threads = current.threads;
            }
        }
        "output_dir" => {
            if current.output_dir.is_some() {
                merged.output_dir = current.output_dir.clone();
            }
        }
        "keep_model_loaded" => merged.keep_model_loaded = current.keep_model_loaded,
        "check_updates" => merged.check_updates = current.check_updates,
        "ui" => merged.ui = current.ui.clone(),
        "recent_files" => merged.recent_files = current.recent_files.clone(),
        other => debug_assert!(false, "no merge arm for declared field '{other}'"),
    }
}
