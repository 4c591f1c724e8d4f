//! Settings document types and the per-field merge authority table.

use crate::constants::{DEFAULT_DOWNLOAD_MIRROR, DEFAULT_RECENT_LIMIT, SCHEMA_VERSION};
use crate::templates::Template;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Which document a field's value is taken from during an upgrade merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAuthority {
    /// The freshly shipped defaults always win; the user's prior value is
    /// discarded. Used for fields whose meaning or valid range may change
    /// between releases.
    Defaults,
    /// The user's existing value, when present, overrides the shipped default.
    User,
}

/// Static merge metadata for one declared settings field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name as it appears in the serialized document.
    pub name: &'static str,
    /// Merge authority for the field.
    pub authority: FieldAuthority,
}

/// Declared settings fields in declaration order.
///
/// The upgrade merge walks this table with ordinary code; adding a field to
/// [`Settings`] requires adding a row here and a copy arm in the merge.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "schema_version",
        authority: FieldAuthority::Defaults,
    },
    FieldSpec {
        name: "download_mirror",
        authority: FieldAuthority::Defaults,
    },
    FieldSpec {
        name: "active_template",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "device",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "threads",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "output_dir",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "keep_model_loaded",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "check_updates",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "ui",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "recent_files",
        authority: FieldAuthority::User,
    },
    FieldSpec {
        name: "templates",
        authority: FieldAuthority::Defaults,
    },
];

/// The persisted settings document.
///
/// One section of the shared configuration file; see the `store` module for
/// the on-disk layout. Field declaration order matches [`FIELDS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Document schema version. A mismatch against shipped defaults forces a
    /// full reset instead of a field-level merge.
    pub schema_version: u32,

    /// Vendor-owned base URL for preset and model downloads.
    pub download_mirror: String,

    /// Id of the currently selected template.
    pub active_template: Option<String>,

    /// Inference device preference.
    pub device: DevicePreference,

    /// Worker thread override (`None` = automatic).
    pub threads: Option<u32>,

    /// Directory results are written to (`None` = next to each input).
    pub output_dir: Option<PathBuf>,

    /// Keep the model resident in memory between runs.
    pub keep_model_loaded: bool,

    /// Check for application updates at startup.
    pub check_updates: bool,

    /// UI preferences.
    pub ui: UiSettings,

    /// Recently opened input files, most recent first.
    pub recent_files: Vec<PathBuf>,

    /// Template catalog.
    pub templates: Vec<Template>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            download_mirror: DEFAULT_DOWNLOAD_MIRROR.to_string(),
            active_template: None,
            device: DevicePreference::Auto,
            threads: None,
            output_dir: None,
            keep_model_loaded: false,
            check_updates: true,
            ui: UiSettings::default(),
            recent_files: Vec::new(),
            templates: Vec::new(),
        }
    }
}

impl Settings {
    /// Post-load initialization.
    ///
    /// Runs after every deserialization and after every merge: drops
    /// templates with duplicate ids (first occurrence wins) and clears
    /// `active_template` when it no longer names a catalog entry.
    pub fn finish_load(&mut self) {
        let mut seen = HashSet::new();
        self.templates.retain(|t| {
            let fresh = seen.insert(t.id.clone());
            if !fresh {
                tracing::debug!(id = %t.id, "dropping template with duplicate id");
            }
            fresh
        });

        if let Some(id) = &self.active_template
            && !self.templates.iter().any(|t| &t.id == id)
        {
            tracing::debug!(id = %id, "clearing active template: no longer in catalog");
            self.active_template = None;
        }
    }
}

/// Inference device preference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Automatically select (GPU if available, else CPU).
    #[default]
    Auto,
    /// Force GPU, fail if unavailable.
    Gpu,
    /// Force CPU inference.
    Cpu,
}

/// UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// UI language override as a BCP 47 tag (`None` = follow the system).
    pub language: Option<String>,

    /// Number of entries kept in the recent-files list.
    pub recent_limit: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}
