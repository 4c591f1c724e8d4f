//! Section-scoped document persistence with crash-safe writes.
//!
//! The settings section lives inside a shared TOML file, next to sections
//! owned by other subsystems. A save replaces only that section, serializes
//! the whole document to a temporary sibling, and renames it over the live
//! file. The rename is the only operation that makes new content visible, so
//! a crash or power loss mid-write leaves the previous file intact.

use crate::constants::{SETTINGS_SECTION, TMP_SUFFIX};
use crate::error::{Error, Result};
use crate::settings::paths::{backup_path, sibling_with_suffix};
use crate::settings::types::Settings;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read the document at `path` and deserialize its settings section.
pub fn load_document(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path).map_err(|e| Error::SettingsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: toml::Table = toml::from_str(&contents).map_err(|e| Error::SettingsParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let section = document
        .get(SETTINGS_SECTION)
        .ok_or_else(|| Error::SectionMissing {
            section: SETTINGS_SECTION.to_string(),
            path: path.to_path_buf(),
        })?;

    let mut settings: Settings =
        section
            .clone()
            .try_into()
            .map_err(|e| Error::SettingsDecode {
                path: path.to_path_buf(),
                source: e,
            })?;

    settings.finish_load();
    Ok(settings)
}

/// Persist `settings` into the document at `path`, preserving sibling sections.
///
/// Reads the current document first (a missing file starts an empty one),
/// replaces the settings section, and writes the result atomically.
pub fn save_document(path: &Path, settings: &Settings) -> Result<()> {
    let mut document = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).map_err(|e| Error::SettingsParse {
            path: path.to_path_buf(),
            source: e,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
        Err(e) => {
            return Err(Error::SettingsRead {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let section = toml::Value::try_from(settings).map_err(|e| Error::SettingsSerialize { source: e })?;
    document.insert(SETTINGS_SECTION.to_string(), section);

    write_atomic(path, &document)
}

/// Best-effort backup copy to the `.backup` sibling. Advisory only: failures
/// are swallowed.
pub fn backup_file(path: &Path) {
    let dest = backup_path(path);
    match fs::copy(path, &dest) {
        Ok(_) => tracing::debug!(from = %path.display(), to = %dest.display(), "backed up settings file"),
        Err(e) => tracing::warn!(path = %path.display(), "settings backup failed: {e}"),
    }
}

/// Serialize `document` and atomically replace `path` via a temp-file rename.
///
/// The temporary file is flushed to disk before the rename is issued; on any
/// failure the temporary file is removed and the live file is untouched.
fn write_atomic(path: &Path, document: &toml::Table) -> Result<()> {
    let contents =
        toml::to_string_pretty(document).map_err(|e| Error::SettingsSerialize { source: e })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::SettingsWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let tmp = sibling_with_suffix(path, TMP_SUFFIX);
    if let Err(e) = write_flushed(&tmp, &contents) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::SettingsWrite {
            path: tmp,
            source: e,
        });
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::SettingsWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Write `contents` to `path` and sync before returning.
fn write_flushed(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::types::DevicePreference;
    use tempfile::TempDir;

    fn settings_file(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("settings.toml")
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);

        let mut settings = Settings::default();
        settings.device = DevicePreference::Gpu;
        settings.threads = Some(8);
        settings.recent_files = vec!["/data/a.wav".into()];

        save_document(&path, &settings).unwrap();
        let loaded = load_document(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);

        let settings = Settings::default();
        save_document(&path, &settings).unwrap();
        let first = load_document(&path).unwrap();
        save_document(&path, &first).unwrap();
        let second = load_document(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_save_preserves_sibling_sections() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(
            &path,
            "[window]\nwidth = 1280\nheight = 720\n\n[settings]\ndevice = \"cpu\"\n",
        )
        .unwrap();

        let mut settings = load_document(&path).unwrap();
        settings.keep_model_loaded = true;
        save_document(&path, &settings).unwrap();

        let document: toml::Table = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let window = document["window"].as_table().unwrap();
        assert_eq!(window["width"].as_integer(), Some(1280));
        assert_eq!(window["height"].as_integer(), Some(720));
    }

    #[test]
    fn test_save_leaves_no_temporary_file() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);

        save_document(&path, &Settings::default()).unwrap();

        let tmp = sibling_with_suffix(&path, TMP_SUFFIX);
        assert!(!tmp.exists());
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_document(&settings_file(&dir));

        match result {
            Err(Error::SettingsRead { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected SettingsRead, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_document_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(&path, "this is not toml {{{{").unwrap();

        assert!(matches!(
            load_document(&path),
            Err(Error::SettingsParse { .. })
        ));
    }

    #[test]
    fn test_load_without_section_is_section_missing() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(&path, "[window]\nwidth = 800\n").unwrap();

        assert!(matches!(
            load_document(&path),
            Err(Error::SectionMissing { .. })
        ));
    }

    #[test]
    fn test_load_with_wrong_shape_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(&path, "[settings]\nschema_version = \"not a number\"\n").unwrap();

        assert!(matches!(
            load_document(&path),
            Err(Error::SettingsDecode { .. })
        ));
    }

    #[test]
    fn test_load_runs_post_load_hook() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(
            &path,
            "[settings]\nactive_template = \"gone\"\ndevice = \"cpu\"\n",
        )
        .unwrap();

        let settings = load_document(&path).unwrap();
        assert_eq!(settings.active_template, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_write_leaves_original_intact() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        save_document(&path, &Settings::default()).unwrap();
        let original = fs::read_to_string(&path).unwrap();

        // Read-only directory: the temp file cannot be created.
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();
        let mut changed = Settings::default();
        changed.keep_model_loaded = true;
        let result = save_document(&path, &changed);
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(Error::SettingsWrite { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_backup_file_copies_content() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::write(&path, "[settings]\n").unwrap();

        backup_file(&path);

        let backed = backup_path(&path);
        assert_eq!(fs::read_to_string(backed).unwrap(), "[settings]\n");
    }

    #[test]
    fn test_backup_file_swallows_missing_source() {
        let dir = TempDir::new().unwrap();
        // Must not panic or error.
        backup_file(&settings_file(&dir));
    }
}
